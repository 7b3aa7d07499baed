//! Per-image label text files.
//!
//! Each image `<dir>/<name>.<ext>` has its annotations in
//! `<dir>/labels/<name>.txt`, one record per line:
//!
//! ```text
//! <label> <x0> <y0> <x1> <y1> <x2> <y2> <x3> <y3>
//! ```
//!
//! Coordinates are base-10 integers in image pixels. Loading skips records it
//! cannot parse. Saving replaces the whole file through a temporary file and
//! an atomic rename, so an interrupted save leaves the previous file intact.

use std::ffi::OsString;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LABEL_EXTENSION, DEFAULT_LABELS_DIR};
use crate::format::error::FormatError;
use crate::format::report::{FormatWarning, LoadReport, SaveReport};
use crate::model::{Annotation, AnnotationSet, Label, Point, Quad};

/// Number of whitespace-separated fields in a record.
pub const FIELDS_PER_RECORD: usize = 9;

/// Where label files live relative to their images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelFileFormat {
    labels_dir: String,
    extension: String,
}

impl Default for LabelFileFormat {
    fn default() -> Self {
        Self::new(DEFAULT_LABELS_DIR, DEFAULT_LABEL_EXTENSION)
    }
}

impl LabelFileFormat {
    pub fn new(labels_dir: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            labels_dir: labels_dir.into(),
            extension: extension.into(),
        }
    }

    /// Label file for `image`: the final extension is replaced and every
    /// earlier dot in the name is kept (`a.b.png` → `labels/a.b.txt`).
    pub fn label_path(&self, image: &Path) -> Result<PathBuf, FormatError> {
        if image.file_name().is_none() {
            return Err(FormatError::invalid_image_path(image));
        }
        let stem = image
            .file_stem()
            .ok_or_else(|| FormatError::invalid_image_path(image))?;

        let mut file_name = OsString::from(stem);
        file_name.push(".");
        file_name.push(&self.extension);

        let dir = image.parent().unwrap_or_else(|| Path::new(""));
        Ok(dir.join(&self.labels_dir).join(file_name))
    }
}

/// Parse one record. `line` is the 1-based line number used in errors.
pub fn parse_record(text: &str, line: usize) -> Result<Annotation, FormatError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != FIELDS_PER_RECORD {
        return Err(FormatError::malformed_record(
            line,
            format!(
                "expected {} fields, found {}",
                FIELDS_PER_RECORD,
                fields.len()
            ),
        ));
    }

    let label =
        Label::new(fields[0]).map_err(|e| FormatError::malformed_record(line, e.to_string()))?;

    let mut coords = [0i32; 8];
    for (slot, field) in coords.iter_mut().zip(&fields[1..]) {
        *slot = field.parse().map_err(|_| {
            FormatError::malformed_record(line, format!("invalid coordinate '{}'", field))
        })?;
    }

    let quad = Quad::from_points([
        Point::new(coords[0], coords[1]),
        Point::new(coords[2], coords[3]),
        Point::new(coords[4], coords[5]),
        Point::new(coords[6], coords[7]),
    ]);
    Ok(Annotation::new(quad, label))
}

/// Format one record without the trailing newline.
pub fn format_record(annotation: &Annotation) -> String {
    let mut record = annotation.label.to_string();
    for p in annotation.quad.points() {
        record.push_str(&format!(" {} {}", p.x, p.y));
    }
    record
}

/// Load a label file.
///
/// A missing file is an empty set. Blank lines are ignored; any other line
/// that does not parse, including one that is not valid UTF-8, is skipped
/// and reported as a warning.
pub fn load(path: &Path) -> Result<LoadReport, FormatError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("No label file at {:?}, starting empty", path);
            return Ok(LoadReport::default());
        }
        Err(e) => return Err(e.into()),
    };

    let mut report = LoadReport::default();
    for (idx, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let line = idx + 1;
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let parsed = match std::str::from_utf8(raw) {
            Ok(text) if text.trim().is_empty() => continue,
            Ok(text) => parse_record(text, line),
            Err(_) => Err(FormatError::malformed_record(line, "invalid UTF-8")),
        };
        match parsed {
            Ok(Annotation { quad, label }) => report.annotations.push(quad, label),
            Err(e) => {
                log::warn!("Skipping record in {:?}: {}", path, e);
                report
                    .warnings
                    .push(FormatWarning::new(e.to_string()).with_path(path).with_line(line));
            }
        }
    }

    log::info!(
        "Loaded {} annotations from {:?} ({} skipped)",
        report.annotations.len(),
        path,
        report.skipped()
    );
    Ok(report)
}

/// Save `annotations` to `path`, replacing any previous content.
///
/// The containing directory is created if needed. Records are written to a
/// temporary file in the same directory, synced, then renamed over `path`.
pub fn save(path: &Path, annotations: &AnnotationSet) -> Result<SaveReport, FormatError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::Builder::new()
        .prefix(".quadlabel-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        for annotation in annotations {
            writeln!(writer, "{}", format_record(annotation))?;
        }
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| FormatError::Io(e.error))?;

    log::info!("Saved {} annotations to {:?}", annotations.len(), path);
    Ok(SaveReport {
        path: path.to_path_buf(),
        records_written: annotations.len(),
    })
}
