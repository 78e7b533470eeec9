//! Error types for the conversion pipeline.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Errors that terminate a conversion attempt.
///
/// None of these are retried internally. If the output file was already
/// opened when the error occurred, its contents are undefined.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Unable to load config '{}': {source}", .path.display())]
    ConfigUnavailable {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("Unable to open output file '{}': {source}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to load image file '{}': {reason}", .path.display())]
    InvalidImage { path: PathBuf, reason: String },

    #[error("Converter is not initialized (state: {0})")]
    NotInitialized(&'static str),

    #[error("Failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl ConvertError {
    /// Process exit code for this error kind.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::ConfigUnavailable { .. } => 2,
            ConvertError::OutputUnavailable { .. } => 3,
            ConvertError::InvalidImage { .. } => 4,
            ConvertError::NotInitialized(_) | ConvertError::Write(_) => 1,
        }
    }
}
