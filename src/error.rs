//! Error types for icon rendering and export

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, IconError>;

#[derive(Error, Debug)]
pub enum IconError {
    /// Non-positive pixel size
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Directory creation or file write failed
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PNG/ICO encoder rejected the image
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// Packaging tool missing, exited non-zero or timed out
    #[error("External tool unavailable: {0}")]
    ExternalToolUnavailable(String),
}

impl IconError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        IconError::Io { path: path.into(), source }
    }
}
