//! Error types for label file operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing label files.
#[derive(Error, Debug)]
pub enum FormatError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record line could not be parsed
    #[error("Malformed record on line {line}: {message}")]
    MalformedRecord {
        /// 1-based line number within the label file
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// Image path has no file name to derive a label file from
    #[error("Cannot derive a label file path from {path:?}")]
    InvalidImagePath {
        /// The offending image path
        path: PathBuf,
    },
}

impl FormatError {
    /// Create a malformed record error.
    pub fn malformed_record(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid image path error.
    pub fn invalid_image_path(path: impl Into<PathBuf>) -> Self {
        Self::InvalidImagePath { path: path.into() }
    }
}
