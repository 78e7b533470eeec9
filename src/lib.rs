//! ascii-converter library crate.
//!
//! Converts raster images into ASCII art by block-averaging the image down to
//! a character grid and mapping each cell's luminance onto a fixed symbol
//! ramp.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod pixels;

pub use config::ConversionParams;
pub use converter::{Converter, ConverterState};
pub use error::ConvertError;
pub use pixels::{PixelGrid, Rgb};
