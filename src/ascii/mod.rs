//! Image-to-text conversion primitives.
//!
//! 1. **Parameter resolution** - Fill the target grid size from the source
//! 2. **Downsampling** - Block-average the image to the character grid
//! 3. **Quantization** - Map each cell's luminance to a ramp index
//! 4. **Rendering** - Emit the ramp symbols row by row

mod charset;
mod dimensions;
mod downsample;
mod mapping;

use std::io::Write;

pub use charset::{symbol, RAMP_LEN, SYMBOL_RAMP};
pub use dimensions::{aspect_height, resolve_params};
pub use downsample::{block_factors, downsample};
pub use mapping::{luminance, map_to_char, quantize, quantize_color};

use crate::pixels::PixelGrid;

/// Separator written after every symbol in a row.
pub const SYMBOL_SEPARATOR: &str = "  ";

/// Render one row of cells as text, including the trailing newline.
pub fn render_row(cells: &PixelGrid, row: u32, levels: u32) -> String {
    let width = cells.width() as usize;
    let mut line = String::with_capacity(width * (1 + SYMBOL_SEPARATOR.len()) + 1);
    for x in 0..cells.width() {
        line.push(map_to_char(cells.pixel(x, row), levels));
        line.push_str(SYMBOL_SEPARATOR);
    }
    line.push('\n');
    line
}

/// Write every row of `cells` to `out`, top to bottom.
pub fn render_into<W: Write>(cells: &PixelGrid, levels: u32, out: &mut W) -> std::io::Result<()> {
    for row in 0..cells.height() {
        out.write_all(render_row(cells, row, levels).as_bytes())?;
    }
    Ok(())
}

/// Render `cells` to a string.
pub fn render(cells: &PixelGrid, levels: u32) -> String {
    (0..cells.height())
        .map(|row| render_row(cells, row, levels))
        .collect()
}
