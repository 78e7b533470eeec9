//! Conversion parameters and config file handling.
//!
//! Two config formats are understood:
//!
//! - The line-oriented format: each recognized key sits on its own line and
//!   its value is the next whitespace-delimited token that follows.
//! - TOML (files ending in `.toml`) using the same key names.
//!
//! ```text
//! inputFile
//! photo.png
//! outputFile
//! photo.txt
//! size_x
//! 80
//! keepRatio
//! 1
//! ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::ascii::RAMP_LEN;

pub const KEY_SIZE_X: &str = "size_x";
pub const KEY_SIZE_Y: &str = "size_y";
pub const KEY_NB_SYMBOLS: &str = "nb_symbols";
pub const KEY_INPUT_FILE: &str = "inputFile";
pub const KEY_OUTPUT_FILE: &str = "outputFile";
pub const KEY_KEEP_RATIO: &str = "keepRatio";

/// Template written by `config init`.
pub const CONFIG_TEMPLATE: &str = "inputFile
input.png
outputFile
output.txt
size_x
80
size_y
40
nb_symbols
39
keepRatio
1
";

/// Parameters for one image conversion.
///
/// A value of `0` (or an empty path) means "unset". See
/// [`ConversionParams::is_resolved`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionParams {
    /// Target width in characters
    pub size_x: u32,
    /// Target height in characters
    pub size_y: u32,
    /// Number of ramp symbols to use
    pub nb_symbols: u32,
    /// Image to convert
    pub input: PathBuf,
    /// Text file to write
    pub output: PathBuf,
    /// Derive the height from the width and the source aspect ratio
    pub keep_ratio: bool,
}

impl Default for ConversionParams {
    fn default() -> Self {
        Self {
            size_x: 0,
            size_y: 0,
            nb_symbols: 0,
            input: PathBuf::new(),
            output: PathBuf::new(),
            keep_ratio: true,
        }
    }
}

impl ConversionParams {
    /// Create params, clamping the symbol count to the ramp length.
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        nb_symbols: u32,
        size_x: u32,
        size_y: u32,
    ) -> Self {
        Self {
            size_x,
            size_y,
            nb_symbols: clamp_symbols(nb_symbols),
            input: input.into(),
            output: output.into(),
            keep_ratio: true,
        }
    }

    /// Clear the paths, symbol count and target size.
    ///
    /// `keep_ratio` is a converter setting rather than a per-file value and
    /// is left untouched.
    pub fn reset(&mut self) {
        *self = Self {
            keep_ratio: self.keep_ratio,
            ..Self::default()
        };
    }

    /// True when every required field is set: both paths, symbol count and
    /// both target dimensions.
    pub fn is_resolved(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Config keys of the required fields that are still unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.input.as_os_str().is_empty() {
            missing.push(KEY_INPUT_FILE);
        }
        if self.output.as_os_str().is_empty() {
            missing.push(KEY_OUTPUT_FILE);
        }
        if self.nb_symbols == 0 {
            missing.push(KEY_NB_SYMBOLS);
        }
        if self.size_x == 0 {
            missing.push(KEY_SIZE_X);
        }
        if self.size_y == 0 {
            missing.push(KEY_SIZE_Y);
        }
        missing
    }

    /// Load params from a config file.
    ///
    /// The format is chosen from the extension: `.toml` is parsed as TOML,
    /// anything else as the line-oriented format.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::default().load_over(path)
    }

    /// Load a config file on top of `self`. Keys absent from the file keep
    /// their current value.
    pub fn load_over(self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut params = match ConfigFormat::from_path(path) {
            ConfigFormat::Lines => parse_lines_over(&content, self)?,
            ConfigFormat::Toml => parse_toml_over(&content, self)?,
        };

        if params.nb_symbols > RAMP_LEN {
            log::warn!(
                "nb_symbols {} exceeds the {} available symbols, clamping",
                params.nb_symbols,
                RAMP_LEN
            );
            params.nb_symbols = RAMP_LEN;
        }

        Ok(params)
    }
}

impl fmt::Display for ConversionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  {}: {}", KEY_INPUT_FILE, self.input.display())?;
        writeln!(f, "  {}: {}", KEY_OUTPUT_FILE, self.output.display())?;
        writeln!(f, "  {}: {}", KEY_SIZE_X, self.size_x)?;
        writeln!(f, "  {}: {}", KEY_SIZE_Y, self.size_y)?;
        writeln!(f, "  {}: {}", KEY_NB_SYMBOLS, self.nb_symbols)?;
        write!(f, "  {}: {}", KEY_KEEP_RATIO, self.keep_ratio)
    }
}

fn clamp_symbols(nb_symbols: u32) -> u32 {
    nb_symbols.min(RAMP_LEN)
}

/// Config file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Lines,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Lines,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid value '{value}' for key '{key}'")]
    MalformedValue { key: String, value: String },

    #[error("key '{key}' has no value")]
    MissingValue { key: String },

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("missing required keys: {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
}

/// Parse the line-oriented format.
///
/// A line that equals a recognized key (ignoring trailing whitespace)
/// consumes the next whitespace-delimited token as its value, which may sit on
/// the same line's remainder or any following line. Scanning resumes on the
/// text after the token. Unrecognized lines are skipped.
pub fn parse_lines(content: &str) -> Result<ConversionParams, ConfigError> {
    parse_lines_over(content, ConversionParams::default())
}

/// Parse the line-oriented format on top of existing params.
pub fn parse_lines_over(
    content: &str,
    mut params: ConversionParams,
) -> Result<ConversionParams, ConfigError> {
    let mut rest = content;

    while !rest.is_empty() {
        let (line, tail) = match rest.find('\n') {
            Some(i) => (&rest[..i], &rest[i + 1..]),
            None => (rest, ""),
        };
        rest = tail;

        let key = line.trim_end();
        match key {
            KEY_SIZE_X => params.size_x = parse_u32(key, next_token(&mut rest))?,
            KEY_SIZE_Y => params.size_y = parse_u32(key, next_token(&mut rest))?,
            KEY_NB_SYMBOLS => params.nb_symbols = parse_u32(key, next_token(&mut rest))?,
            KEY_INPUT_FILE => params.input = parse_path(key, next_token(&mut rest))?,
            KEY_OUTPUT_FILE => params.output = parse_path(key, next_token(&mut rest))?,
            KEY_KEEP_RATIO => params.keep_ratio = parse_bool(key, next_token(&mut rest))?,
            _ => continue,
        }
    }

    Ok(params)
}

/// Take the next whitespace-delimited token from `rest`, advancing it.
fn next_token<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let trimmed = rest.trim_start();
    if trimmed.is_empty() {
        *rest = trimmed;
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    let (token, tail) = trimmed.split_at(end);
    *rest = tail;
    Some(token)
}

fn require<'a>(key: &str, token: Option<&'a str>) -> Result<&'a str, ConfigError> {
    token.ok_or_else(|| ConfigError::MissingValue {
        key: key.to_string(),
    })
}

fn parse_u32(key: &str, token: Option<&str>) -> Result<u32, ConfigError> {
    let token = require(key, token)?;
    let value = token.parse().map_err(|_| ConfigError::MalformedValue {
        key: key.to_string(),
        value: token.to_string(),
    })?;
    log::debug!("loaded param {}: {}", key, value);
    Ok(value)
}

fn parse_path(key: &str, token: Option<&str>) -> Result<PathBuf, ConfigError> {
    let token = require(key, token)?;
    log::debug!("loaded param {}: {}", key, token);
    Ok(PathBuf::from(token))
}

fn parse_bool(key: &str, token: Option<&str>) -> Result<bool, ConfigError> {
    let token = require(key, token)?;
    let value = match token {
        "1" | "true" => true,
        "0" | "false" => false,
        _ => {
            return Err(ConfigError::MalformedValue {
                key: key.to_string(),
                value: token.to_string(),
            })
        }
    };
    log::debug!("loaded param {}: {}", key, value);
    Ok(value)
}

/// TOML config file structure. Every key is optional.
#[derive(Debug, Deserialize, Default)]
struct TomlParams {
    #[serde(default)]
    size_x: Option<u32>,
    #[serde(default)]
    size_y: Option<u32>,
    #[serde(default)]
    nb_symbols: Option<u32>,
    #[serde(default, rename = "inputFile")]
    input_file: Option<PathBuf>,
    #[serde(default, rename = "outputFile")]
    output_file: Option<PathBuf>,
    #[serde(default, rename = "keepRatio")]
    keep_ratio: Option<bool>,
}

/// Parse the TOML format.
pub fn parse_toml(content: &str) -> Result<ConversionParams, ConfigError> {
    parse_toml_over(content, ConversionParams::default())
}

/// Parse the TOML format on top of existing params.
pub fn parse_toml_over(
    content: &str,
    defaults: ConversionParams,
) -> Result<ConversionParams, ConfigError> {
    let raw: TomlParams = toml::from_str(content)?;

    let params = ConversionParams {
        size_x: raw.size_x.unwrap_or(defaults.size_x),
        size_y: raw.size_y.unwrap_or(defaults.size_y),
        nb_symbols: raw.nb_symbols.unwrap_or(defaults.nb_symbols),
        input: raw.input_file.unwrap_or(defaults.input),
        output: raw.output_file.unwrap_or(defaults.output),
        keep_ratio: raw.keep_ratio.unwrap_or(defaults.keep_ratio),
    };
    log::debug!("loaded TOML params:\n{}", params);
    Ok(params)
}
