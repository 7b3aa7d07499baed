//! Label file persistence.
//!
//! Annotations are stored next to the images in plain text, one file per
//! image and one line per quad:
//!
//! ```text
//! car 10 10 10 50 30 50 30 10
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use quadlabel::format::{LabelFileFormat, load, save};
//!
//! let format = LabelFileFormat::default();
//! let path = format.label_path(Path::new("shots/img.png"))?;
//! let report = load(&path)?;
//! save(&path, &report.annotations)?;
//! ```

mod error;
mod label_file;
mod report;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use label_file::{FIELDS_PER_RECORD, LabelFileFormat, format_record, load, parse_record, save};
pub use report::{FormatWarning, LoadReport, SaveReport};
