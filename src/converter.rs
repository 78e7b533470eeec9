//! The image-to-ASCII conversion pipeline.
//!
//! A [`Converter`] owns the output file and the decoded source image for one
//! conversion. The output file is opened (and truncated) by
//! [`Converter::init`] and closed when the converter is dropped.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::ascii;
use crate::config::ConversionParams;
use crate::error::ConvertError;
use crate::pixels::PixelGrid;

/// Lifecycle state of a [`Converter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterState {
    /// Params not yet resolved, no resources held
    Uninitialized,
    /// Output open, image loaded, params resolved
    Initialized,
    /// Conversion in progress
    Running,
    /// Conversion finished and output flushed
    Done,
    /// Output file could not be opened or written
    ErrorOutputFile,
    /// Input image could not be loaded or has zero size
    ErrorLoadingImage,
    /// Config file could not be read or parsed
    ErrorLoadingConfig,
}

impl ConverterState {
    pub fn name(&self) -> &'static str {
        match self {
            ConverterState::Uninitialized => "uninitialized",
            ConverterState::Initialized => "initialized",
            ConverterState::Running => "running",
            ConverterState::Done => "done",
            ConverterState::ErrorOutputFile => "error-output-file",
            ConverterState::ErrorLoadingImage => "error-loading-image",
            ConverterState::ErrorLoadingConfig => "error-loading-config",
        }
    }

    /// True for the three failure states.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ConverterState::ErrorOutputFile
                | ConverterState::ErrorLoadingImage
                | ConverterState::ErrorLoadingConfig
        )
    }
}

impl fmt::Display for ConverterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts one image file into an ASCII-art text file.
pub struct Converter {
    params: ConversionParams,
    state: ConverterState,
    image: Option<PixelGrid>,
    output: Option<BufWriter<File>>,
}

impl Converter {
    /// Create a converter. `0` for `nb_symbols`, `size_x` or `size_y` means
    /// "derive from the image"; `nb_symbols` is clamped to the ramp length.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        nb_symbols: u32,
        size_x: u32,
        size_y: u32,
    ) -> Self {
        Self::from_params(ConversionParams::new(input, output, nb_symbols, size_x, size_y))
    }

    /// Create a converter from existing params.
    pub fn from_params(mut params: ConversionParams) -> Self {
        params.nb_symbols = params.nb_symbols.min(ascii::RAMP_LEN);
        Self {
            params,
            state: ConverterState::Uninitialized,
            image: None,
            output: None,
        }
    }

    /// Enable or disable aspect-ratio preservation (enabled by default).
    pub fn keep_aspect_ratio(&mut self, keep: bool) {
        self.params.keep_ratio = keep;
    }

    pub fn params(&self) -> &ConversionParams {
        &self.params
    }

    pub fn state(&self) -> ConverterState {
        self.state
    }

    /// Open the output file, load the input image and resolve the params.
    ///
    /// The output file is truncated before the image is loaded, so it is left
    /// empty if loading fails.
    pub fn init(&mut self) -> Result<(), ConvertError> {
        self.image = None;
        self.output = None;

        let file = match File::create(&self.params.output) {
            Ok(file) => file,
            Err(source) => {
                log::debug!(
                    "Unable to open output file {}: {}",
                    self.params.output.display(),
                    source
                );
                self.state = ConverterState::ErrorOutputFile;
                return Err(ConvertError::OutputUnavailable {
                    path: self.params.output.clone(),
                    source,
                });
            }
        };
        self.output = Some(BufWriter::new(file));

        let loaded = PixelGrid::load(&self.params.input).and_then(|image| {
            let resolved = ascii::resolve_params(&self.params, image.width(), image.height())?;
            Ok((image, resolved))
        });
        let (image, resolved) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                log::debug!("{}", e);
                self.state = ConverterState::ErrorLoadingImage;
                return Err(e);
            }
        };

        self.params = resolved;
        self.image = Some(image);
        self.state = ConverterState::Initialized;
        Ok(())
    }

    /// Replace the params with those read from a config file.
    ///
    /// The paths, symbol count and target size are reset first; the
    /// aspect-ratio flag survives unless the file sets `keepRatio`. If the file yields resolved params
    /// this delegates to [`Converter::init`]; otherwise it returns
    /// [`ConverterState::Uninitialized`] without opening the output or loading
    /// the image.
    pub fn init_from_config(&mut self, path: &Path) -> Result<ConverterState, ConvertError> {
        self.params.reset();
        self.image = None;
        self.output = None;

        self.params = match self.params.clone().load_over(path) {
            Ok(params) => params,
            Err(source) => {
                log::debug!("Unable to load config {}: {}", path.display(), source);
                self.state = ConverterState::ErrorLoadingConfig;
                return Err(ConvertError::ConfigUnavailable {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if !self.params.is_resolved() {
            log::debug!(
                "config {} is incomplete, missing: {}",
                path.display(),
                self.params.missing_fields().join(", ")
            );
            self.state = ConverterState::Uninitialized;
            return Ok(self.state);
        }

        self.init()?;
        Ok(self.state)
    }

    /// Convert the loaded image and write it to the output file.
    ///
    /// Requires [`ConverterState::Initialized`]. Rows are written as they are
    /// produced and the output is flushed before returning.
    pub fn process_image(&mut self) -> Result<(), ConvertError> {
        if self.state != ConverterState::Initialized {
            return Err(ConvertError::NotInitialized(self.state.name()));
        }
        let (Some(image), Some(output)) = (self.image.as_ref(), self.output.as_mut()) else {
            return Err(ConvertError::NotInitialized(self.state.name()));
        };

        self.state = ConverterState::Running;
        let size_x = self.params.size_x;
        let size_y = self.params.size_y;
        let levels = self.params.nb_symbols;

        let Some(cells) = ascii::downsample(image, size_x, size_y) else {
            self.state = ConverterState::ErrorLoadingImage;
            return Err(ConvertError::InvalidImage {
                path: self.params.input.clone(),
                reason: format!("invalid target size {}x{}", size_x, size_y),
            });
        };

        if let Err(e) = write_document(&cells, levels, output) {
            log::error!(
                "Failed writing {}: {}",
                self.params.output.display(),
                e
            );
            self.state = ConverterState::ErrorOutputFile;
            return Err(ConvertError::Write(e));
        }

        log::info!(
            "Converted {} to {}x{} characters in {}",
            self.params.input.display(),
            size_x,
            size_y,
            self.params.output.display()
        );
        self.state = ConverterState::Done;
        Ok(())
    }
}

fn write_document<W: Write>(cells: &PixelGrid, levels: u32, out: &mut W) -> std::io::Result<()> {
    ascii::render_into(cells, levels, out)?;
    out.flush()
}
