//! Target grid resolution from partial parameters and source dimensions.

use super::charset::RAMP_LEN;
use crate::config::ConversionParams;
use crate::error::ConvertError;

/// Height that preserves the source aspect ratio for a given width.
///
/// Computes `round(width * src_height / src_width)`, never less than 1.
/// Returns 0 only if `src_width` is 0.
pub fn aspect_height(width: u32, src_width: u32, src_height: u32) -> u32 {
    if src_width == 0 {
        return 0;
    }
    let ratio = src_height as f64 / src_width as f64;
    let height = (width as f64 * ratio).round() as u32;
    height.max(1)
}

/// Fill unset parameters from the source image and apply aspect correction.
///
/// - `size_x == 0` becomes the source width, `size_y == 0` the source height.
/// - `nb_symbols == 0` becomes the full ramp length.
/// - With `keep_ratio`, `size_y` is always recomputed from `size_x`, even if
///   it was set explicitly.
///
/// Fails with [`ConvertError::InvalidImage`] if either source dimension is 0.
pub fn resolve_params(
    params: &ConversionParams,
    src_width: u32,
    src_height: u32,
) -> Result<ConversionParams, ConvertError> {
    if src_width == 0 || src_height == 0 {
        return Err(ConvertError::InvalidImage {
            path: params.input.clone(),
            reason: format!("image has zero size ({}x{})", src_width, src_height),
        });
    }

    let mut resolved = params.clone();

    if resolved.size_x == 0 {
        resolved.size_x = src_width;
    }
    if resolved.size_y == 0 {
        resolved.size_y = src_height;
    }
    if resolved.nb_symbols == 0 {
        resolved.nb_symbols = RAMP_LEN;
    }
    if resolved.keep_ratio {
        resolved.size_y = aspect_height(resolved.size_x, src_width, src_height);
    }

    log::debug!(
        "resolved grid {}x{} with {} symbols from {}x{} source",
        resolved.size_x,
        resolved.size_y,
        resolved.nb_symbols,
        src_width,
        src_height
    );

    Ok(resolved)
}
