//! Decoded RGB pixel buffers.

use std::path::Path;

use crate::error::ConvertError;

/// RGB color of a single pixel or downsampled cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A decoded image in row-major RGB order (3 bytes per pixel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Raw pixel data in RGB format
    data: Vec<u8>,
    /// Grid width in pixels
    width: u32,
    /// Grid height in pixels
    height: u32,
}

impl PixelGrid {
    /// Bytes per pixel (RGB).
    pub const BYTES_PER_PIXEL: usize = 3;

    /// Build a grid from raw RGB bytes.
    ///
    /// Returns `None` for a zero dimension or if `data` does not hold exactly
    /// `width * height` pixels.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(Self::BYTES_PER_PIXEL)?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Build a grid from a row-major slice of colors.
    pub fn from_pixels(width: u32, height: u32, pixels: &[Rgb]) -> Option<Self> {
        let data = pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect();
        Self::from_raw(width, height, data)
    }

    /// Decode an image file into an RGB grid.
    ///
    /// Fails with [`ConvertError::InvalidImage`] when the file cannot be
    /// decoded or has a zero dimension.
    pub fn load(path: &Path) -> Result<Self, ConvertError> {
        let decoded = image::open(path).map_err(|e| ConvertError::InvalidImage {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        if width == 0 || height == 0 {
            return Err(ConvertError::InvalidImage {
                path: path.to_path_buf(),
                reason: format!("image has zero size ({}x{})", width, height),
            });
        }

        Ok(Self {
            data: rgb.into_raw(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels in the grid.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw RGB bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Color at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} grid",
            x,
            y,
            self.width,
            self.height
        );
        let idx = (y as usize * self.width as usize + x as usize) * Self::BYTES_PER_PIXEL;
        Rgb {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
        }
    }
}
