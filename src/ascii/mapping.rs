//! Luminance quantization and symbol mapping.

use super::charset::symbol;
use crate::pixels::Rgb;

/// Unweighted luminance `(R + G + B) / 3`, truncated.
#[inline]
pub fn luminance(color: Rgb) -> u8 {
    ((color.r as u32 + color.g as u32 + color.b as u32) / 3) as u8
}

/// Map a luminance value to a ramp index in `[0, levels - 1]`.
///
/// The index is `floor(luminance / 255 * (levels - 1))`. Luminance 0 always
/// maps to 0 and 255 to `levels - 1`. `levels == 0` is treated as 1.
#[inline]
pub fn quantize(luminance: u8, levels: u32) -> usize {
    let top = levels.saturating_sub(1);
    let normalized = luminance as f32 / 255.0;
    let idx = (normalized * top as f32) as u32;
    idx.min(top) as usize
}

/// Ramp index for an averaged cell color.
#[inline]
pub fn quantize_color(color: Rgb, levels: u32) -> usize {
    quantize(luminance(color), levels)
}

/// Map a cell color to its ramp symbol using the first `levels` symbols.
///
/// # Example
/// ```ignore
/// assert_eq!(map_to_char(Rgb::BLACK, 39), '@');
/// assert_eq!(map_to_char(Rgb::WHITE, 39), ' ');
/// ```
#[inline]
pub fn map_to_char(color: Rgb, levels: u32) -> char {
    symbol(quantize_color(color, levels))
}
