//! Results of label file loads and saves.

use std::path::PathBuf;

use crate::model::AnnotationSet;

/// Result of loading a label file.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// The records that parsed, in file order.
    pub annotations: AnnotationSet,

    /// One warning per skipped record.
    pub warnings: Vec<FormatWarning>,
}

impl LoadReport {
    /// Number of records that were skipped.
    pub fn skipped(&self) -> usize {
        self.warnings.len()
    }

    /// Check if there were any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Result of saving a label file.
#[derive(Debug)]
pub struct SaveReport {
    /// File that now holds the annotations.
    pub path: PathBuf,

    /// Number of records written.
    pub records_written: usize,
}

/// Warning generated while reading a label file.
#[derive(Debug, Clone)]
pub struct FormatWarning {
    /// Label file this warning relates to (if applicable).
    pub path: Option<PathBuf>,

    /// 1-based line number (if applicable).
    pub line: Option<usize>,

    /// Human-readable warning message.
    pub message: String,
}

impl FormatWarning {
    /// Create a new warning.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            path: None,
            line: None,
            message: message.into(),
        }
    }

    /// Set the file this warning relates to.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the line this warning relates to.
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl std::fmt::Display for FormatWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.path, self.line) {
            (Some(path), Some(line)) => write!(f, "{}:{}: {}", path.display(), line, self.message),
            (Some(path), None) => write!(f, "{}: {}", path.display(), self.message),
            (None, Some(line)) => write!(f, "line {}: {}", line, self.message),
            (None, None) => f.write_str(&self.message),
        }
    }
}
