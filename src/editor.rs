//! The editing session for one open image.
//!
//! The host forwards its UI events here and draws whatever
//! [`Editor::render_quads`] and [`Editor::pending_preview`] return after each
//! event. Every call is synchronous; saving on image switch completes before
//! the next image's label file is read.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::EditorConfig;
use crate::format::{self, FormatError, FormatWarning, LabelFileFormat, SaveReport};
use crate::message::EditorMessage;
use crate::model::{
    Annotation, AnnotationSet, ClickOutcome, ClickSession, Edge, Label, LabelError, Point, Quad,
};
use crate::store::AnnotationStore;

/// Errors surfaced to the host.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Reading or writing a label file failed
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Label text was refused
    #[error("Invalid label: {0}")]
    Label(#[from] LabelError),
}

/// What an undo request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UndoOutcome {
    /// A half-finished gesture was discarded; no quad was removed.
    GestureCancelled,
    /// The most recent annotation was removed.
    Removed(Annotation),
    /// There was nothing to undo.
    Nothing,
}

/// One stored quad, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderedQuad<'a> {
    pub index: usize,
    pub quad: &'a Quad,
    pub label: &'a Label,
    /// The most recently committed quad, usually highlighted.
    pub latest: bool,
}

#[derive(Debug, Clone)]
struct OpenImage {
    image_path: PathBuf,
    label_path: PathBuf,
}

/// Editing session state: the open image, its annotations and the gesture in progress.
#[derive(Debug)]
pub struct Editor {
    format: LabelFileFormat,
    store: AnnotationStore,
    session: ClickSession,
    image: Option<OpenImage>,
    display_scale: f64,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            format: config.label_format(),
            store: AnnotationStore::new(config.initial_label(), config.undo_config()),
            session: ClickSession::default(),
            image: None,
            display_scale: config.display_scale,
        }
    }

    /// Dispatch a host event.
    pub fn update(&mut self, message: EditorMessage) -> Result<(), EditorError> {
        match message {
            // Skipped records are already logged by the loader.
            EditorMessage::ImageOpened(path) => {
                self.on_image_opened(&path)?;
            }
            EditorMessage::ImageClosed => self.on_image_closed()?,
            EditorMessage::Clicked { x, y } => {
                self.on_click(x, y);
            }
            EditorMessage::Undo => {
                self.on_undo();
            }
            EditorMessage::Redo => {
                self.on_redo();
            }
            EditorMessage::RotateOrigin => {
                self.on_rotate_origin();
            }
            EditorMessage::LabelTextChanged(text) => self.on_label_text_changed(&text)?,
            EditorMessage::DisplayScaleChanged(scale) => self.set_display_scale(scale),
        }
        Ok(())
    }

    /// Open an image and load its label file.
    ///
    /// The previously open image is saved first. If that save fails, the
    /// previous image stays open with its annotations intact and the error is
    /// returned. Returns the warnings for records skipped while loading.
    pub fn on_image_opened(
        &mut self,
        path: impl AsRef<Path>,
    ) -> Result<Vec<FormatWarning>, EditorError> {
        let image_path = path.as_ref();
        let label_path = self.format.label_path(image_path)?;

        self.on_image_closed()?;

        let report = format::load(&label_path)?;
        log::debug!(
            "🖼️ Opened {:?} with {} annotations",
            image_path,
            report.annotations.len()
        );
        self.store.replace(report.annotations);
        self.image = Some(OpenImage {
            image_path: image_path.to_path_buf(),
            label_path,
        });
        Ok(report.warnings)
    }

    /// Save and close the open image. Does nothing when no image is open.
    ///
    /// On a failed save the image stays open so the save can be retried.
    pub fn on_image_closed(&mut self) -> Result<(), EditorError> {
        self.flush()?;
        if let Some(image) = self.image.take() {
            log::debug!("🖼️ Closed {:?}", image.image_path);
        }
        self.session.reset();
        self.store.clear();
        Ok(())
    }

    /// Write the open image's annotations if they changed since the last load or save.
    pub fn flush(&mut self) -> Result<Option<SaveReport>, EditorError> {
        let Some(image) = &self.image else {
            return Ok(None);
        };
        if !self.store.is_dirty() {
            return Ok(None);
        }
        match format::save(&image.label_path, self.store.annotations()) {
            Ok(report) => {
                self.store.mark_saved();
                Ok(Some(report))
            }
            Err(e) => {
                log::warn!("Failed to save {:?}: {}", image.label_path, e);
                Err(e.into())
            }
        }
    }

    /// Feed a click at display coordinates into the gesture.
    ///
    /// The third click commits a quad with the current label, or discards the
    /// gesture if the points cannot form one.
    pub fn on_click(&mut self, x: f64, y: f64) -> ClickOutcome {
        if self.image.is_none() {
            log::debug!("Click ignored: no image open");
            return ClickOutcome::Ignored;
        }

        let point = Point::from_display(x, y, self.display_scale);
        let outcome = self.session.click(point);
        match outcome {
            ClickOutcome::Started(p) => log::trace!("👆 First corner {}", p),
            ClickOutcome::Preview(edge) => log::trace!("👆 Edge {} → {}", edge.from, edge.to),
            ClickOutcome::Completed(quad) => self.store.commit(quad),
            ClickOutcome::Rejected(err) => log::debug!("✖️ Gesture discarded: {}", err),
            ClickOutcome::Ignored => {}
        }
        outcome
    }

    /// Cancel the pending gesture, or remove the most recent quad.
    pub fn on_undo(&mut self) -> UndoOutcome {
        if self.session.reset() {
            log::debug!("⏪ Gesture cancelled");
            return UndoOutcome::GestureCancelled;
        }
        match self.store.remove_last() {
            Some(annotation) => UndoOutcome::Removed(annotation),
            None => UndoOutcome::Nothing,
        }
    }

    /// Restore the most recently undone quad. Ignored while a gesture is pending.
    pub fn on_redo(&mut self) -> Option<&Annotation> {
        if self.session.is_pending() {
            return None;
        }
        self.store.redo()
    }

    /// Move the last quad's origin to its next corner. Ignored while a gesture is pending.
    pub fn on_rotate_origin(&mut self) -> bool {
        if self.session.is_pending() {
            return false;
        }
        self.store.rotate_last_origin()
    }

    /// Set the label for the next quad. Invalid text leaves the current label unchanged.
    pub fn on_label_text_changed(&mut self, text: &str) -> Result<(), LabelError> {
        let label = Label::new(text)?;
        self.store.set_current_label(label);
        Ok(())
    }

    pub fn current_label(&self) -> &Label {
        self.store.current_label()
    }

    /// Set the display scale used to convert clicks into image pixels.
    pub fn set_display_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.display_scale = scale;
        } else {
            log::warn!("Ignoring invalid display scale {}", scale);
        }
    }

    pub fn display_scale(&self) -> f64 {
        self.display_scale
    }

    /// All stored quads in commit order.
    pub fn render_quads(&self) -> Vec<RenderedQuad<'_>> {
        let annotations = self.store.annotations();
        let last = annotations.len().checked_sub(1);
        annotations
            .iter()
            .enumerate()
            .map(|(index, a)| RenderedQuad {
                index,
                quad: &a.quad,
                label: &a.label,
                latest: Some(index) == last,
            })
            .collect()
    }

    /// The preview line of a half-finished gesture.
    pub fn pending_preview(&self) -> Option<Edge> {
        self.session.preview()
    }

    pub fn session(&self) -> &ClickSession {
        &self.session
    }

    pub fn annotations(&self) -> &AnnotationSet {
        self.store.annotations()
    }

    pub fn image_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|i| i.image_path.as_path())
    }

    pub fn label_path(&self) -> Option<&Path> {
        self.image.as_ref().map(|i| i.label_path.as_path())
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.image.is_some() && self.store.is_dirty()
    }
}
