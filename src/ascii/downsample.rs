//! Block-average downsampling of pixel grids to character grids.

use std::ops::Range;

use crate::pixels::{PixelGrid, Rgb};

/// Integer block factors `(floor(src_w / dst_w), floor(src_h / dst_h))`.
///
/// A factor is 0 when the target is larger than the source along that axis.
pub fn block_factors(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> (u32, u32) {
    let x = if dst_width == 0 { 0 } else { src_width / dst_width };
    let y = if dst_height == 0 { 0 } else { src_height / dst_height };
    (x, y)
}

/// Source pixel range covered by target cell `index` along one axis.
///
/// With a non-zero factor the range is `[index * factor, (index + 1) * factor)`
/// clamped to the source. With a zero factor (upscaling) the cell maps
/// proportionally onto a single source pixel. The range is never empty.
fn axis_span(index: u32, factor: u32, src_len: u32, dst_len: u32) -> Range<u32> {
    if factor == 0 {
        let start = (index as u64 * src_len as u64 / dst_len as u64) as u32;
        start..start + 1
    } else {
        let start = index * factor;
        start..start.saturating_add(factor).min(src_len)
    }
}

/// Per-channel average of a source rectangle, rounded to nearest.
fn average_block(source: &PixelGrid, xs: Range<u32>, ys: Range<u32>) -> Rgb {
    let mut sum_r = 0u64;
    let mut sum_g = 0u64;
    let mut sum_b = 0u64;
    let mut count = 0u64;

    for py in ys {
        for px in xs.clone() {
            let p = source.pixel(px, py);
            sum_r += p.r as u64;
            sum_g += p.g as u64;
            sum_b += p.b as u64;
            count += 1;
        }
    }

    if count == 0 {
        return Rgb::default();
    }

    let half = count / 2;
    Rgb {
        r: ((sum_r + half) / count) as u8,
        g: ((sum_g + half) / count) as u8,
        b: ((sum_b + half) / count) as u8,
    }
}

/// Downsample an RGB grid to `target_width x target_height` cells.
///
/// The source is partitioned into blocks of `floor(W_s / W_t) x floor(H_s / H_t)`
/// pixels starting at the top-left corner. Each cell takes the average color of
/// its block. When both factors are 1, each cell copies the source pixel at the
/// same coordinates without averaging. Source pixels past the last full block
/// are not sampled.
///
/// # Returns
/// The reduced grid, or `None` if a target dimension is zero or the grid
/// is too large to allocate.
///
/// # Example
/// ```ignore
/// // Downsample a 640x480 image to an 80x40 character grid
/// let cells = downsample(&grid, 80, 40).unwrap();
/// assert_eq!(cells.pixel_count(), 80 * 40);
/// ```
pub fn downsample(source: &PixelGrid, target_width: u32, target_height: u32) -> Option<PixelGrid> {
    if target_width == 0 || target_height == 0 {
        return None;
    }

    let src_w = source.width();
    let src_h = source.height();
    let (x_factor, y_factor) = block_factors(src_w, src_h, target_width, target_height);
    log::debug!(
        "downsampling {}x{} -> {}x{} (xFactor, yFactor) = ({}, {})",
        src_w,
        src_h,
        target_width,
        target_height,
        x_factor,
        y_factor
    );

    let byte_len = (target_width as usize)
        .checked_mul(target_height as usize)?
        .checked_mul(PixelGrid::BYTES_PER_PIXEL)?;
    let mut data: Vec<u8> = Vec::new();
    if data.try_reserve_exact(byte_len).is_err() {
        log::warn!("cannot allocate a {}x{} grid", target_width, target_height);
        return None;
    }

    for cy in 0..target_height {
        let ys = axis_span(cy, y_factor, src_h, target_height);
        for cx in 0..target_width {
            let color = if x_factor == 1 && y_factor == 1 {
                source.pixel(cx, cy)
            } else {
                let xs = axis_span(cx, x_factor, src_w, target_width);
                average_block(source, xs, ys.clone())
            };
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
    }

    PixelGrid::from_raw(target_width, target_height, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_grid(width: u32, height: u32, values: &[u8]) -> PixelGrid {
        let pixels: Vec<Rgb> = values.iter().map(|&v| Rgb::new(v, v, v)).collect();
        PixelGrid::from_pixels(width, height, &pixels).unwrap()
    }

    #[test]
    fn test_block_factors() {
        assert_eq!(block_factors(100, 50, 50, 25), (2, 2));
        assert_eq!(block_factors(5, 5, 2, 2), (2, 2));
        assert_eq!(block_factors(3, 3, 6, 3), (0, 1));
    }

    #[test]
    fn test_axis_span_clamps_to_source() {
        assert_eq!(axis_span(0, 2, 5, 2), 0..2);
        assert_eq!(axis_span(1, 2, 5, 2), 2..4);
        assert_eq!(axis_span(2, 3, 7, 3), 6..7);
    }

    #[test]
    fn test_axis_span_upscale_is_never_empty() {
        for index in 0..7 {
            let span = axis_span(index, 0, 3, 7);
            assert_eq!(span.len(), 1);
            assert!(span.end <= 3);
        }
    }

    #[test]
    fn test_downsample_zero_target() {
        let grid = gray_grid(2, 2, &[0, 0, 0, 0]);
        assert!(downsample(&grid, 0, 2).is_none());
        assert!(downsample(&grid, 2, 0).is_none());
    }

    #[test]
    fn test_downsample_oversized_target() {
        let grid = gray_grid(1, 1, &[7]);
        assert!(downsample(&grid, u32::MAX, u32::MAX).is_none());
    }

    #[test]
    fn test_downsample_identity() {
        let grid = gray_grid(3, 2, &[1, 2, 3, 4, 5, 6]);
        let out = downsample(&grid, 3, 2).unwrap();
        assert_eq!(out, grid);
    }

    #[test]
    fn test_downsample_fast_path_copies_top_left() {
        // 3x3 -> 2x2 has factors (1, 1): cells copy pixels, nothing averaged
        let grid = gray_grid(3, 3, &[10, 20, 30, 40, 50, 60, 70, 80, 90]);
        let out = downsample(&grid, 2, 2).unwrap();
        assert_eq!(out.pixel(0, 0).r, 10);
        assert_eq!(out.pixel(1, 0).r, 20);
        assert_eq!(out.pixel(0, 1).r, 40);
        assert_eq!(out.pixel(1, 1).r, 50);
    }

    #[test]
    fn test_downsample_averages_blocks() {
        // 4x2 -> 2x1: left block [0, 100, 0, 100], right block all 200
        let grid = gray_grid(4, 2, &[0, 100, 200, 200, 0, 100, 200, 200]);
        let out = downsample(&grid, 2, 1).unwrap();
        assert_eq!(out.pixel(0, 0).r, 50);
        assert_eq!(out.pixel(1, 0).r, 200);
    }

    #[test]
    fn test_downsample_channels_independent() {
        let pixels = [Rgb::new(255, 0, 10), Rgb::new(0, 255, 20)];
        let grid = PixelGrid::from_pixels(2, 1, &pixels).unwrap();
        let out = downsample(&grid, 1, 1).unwrap();
        assert_eq!(out.pixel(0, 0), Rgb::new(128, 128, 15));
    }

    #[test]
    fn test_downsample_rounds_to_nearest() {
        // (0 + 1) / 2 = 0.5 -> 1, (0 + 0 + 1) / 3 = 0.33 -> 0
        let grid = gray_grid(2, 1, &[0, 1]);
        assert_eq!(downsample(&grid, 1, 1).unwrap().pixel(0, 0).r, 1);

        let grid = gray_grid(3, 1, &[0, 0, 1]);
        assert_eq!(downsample(&grid, 1, 1).unwrap().pixel(0, 0).r, 0);
    }

    #[test]
    fn test_downsample_ignores_trailing_pixels() {
        // 5x1 -> 2x1: factor 2, the last source column is never sampled
        let grid = gray_grid(5, 1, &[10, 10, 20, 20, 255]);
        let out = downsample(&grid, 2, 1).unwrap();
        assert_eq!(out.pixel(0, 0).r, 10);
        assert_eq!(out.pixel(1, 0).r, 20);
    }

    #[test]
    fn test_downsample_upscale() {
        // 2x1 -> 4x2: every cell maps to its proportional source pixel
        let grid = gray_grid(2, 1, &[0, 255]);
        let out = downsample(&grid, 4, 2).unwrap();
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 2);
        let row: Vec<u8> = (0..4).map(|x| out.pixel(x, 1).r).collect();
        assert_eq!(row, vec![0, 0, 255, 255]);
    }

    #[test]
    fn test_downsample_mixed_axes() {
        // Width shrinks (factor 2), height grows (factor 0)
        let grid = gray_grid(4, 1, &[0, 100, 200, 250]);
        let out = downsample(&grid, 2, 3).unwrap();
        for y in 0..3 {
            assert_eq!(out.pixel(0, y).r, 50);
            assert_eq!(out.pixel(1, y).r, 225);
        }
    }
}
