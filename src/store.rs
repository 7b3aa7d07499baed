//! Annotation storage for the image being edited.

use crate::model::{Annotation, AnnotationSet, Label, Quad};
use crate::undo::{Command, UndoConfig, UndoStack};

/// The current image's annotations, the label for the next quad, and the
/// undo history.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    annotations: AnnotationSet,
    history: UndoStack,
    current_label: Label,
    /// Set by every edit, cleared when the set is loaded or saved.
    dirty: bool,
}

impl AnnotationStore {
    pub fn new(current_label: Label, undo: UndoConfig) -> Self {
        Self {
            annotations: AnnotationSet::new(),
            history: UndoStack::with_config(undo),
            current_label,
            dirty: false,
        }
    }

    pub fn annotations(&self) -> &AnnotationSet {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Append a quad with an explicit label.
    pub fn append(&mut self, quad: Quad, label: Label) {
        self.history.record(Command::AddAnnotation {
            label: label.clone(),
        });
        self.annotations.push(quad, label);
        self.dirty = true;
    }

    /// Append a quad with the current label.
    pub fn commit(&mut self, quad: Quad) {
        self.append(quad, self.current_label.clone());
    }

    /// Remove the most recent annotation.
    ///
    /// The current label then becomes the label of the new last annotation, so
    /// repeated removals walk back through the labels. Does nothing when empty.
    pub fn remove_last(&mut self) -> Option<Annotation> {
        let removed = self.annotations.pop()?;
        if let Some(last) = self.annotations.last() {
            self.current_label = last.label.clone();
        }
        self.history.record(Command::RemoveAnnotation {
            annotation: removed.clone(),
        });
        self.dirty = true;
        Some(removed)
    }

    /// Rotate the origin of the most recent quad. Returns false when empty.
    pub fn rotate_last_origin(&mut self) -> bool {
        if !self.annotations.rotate_last_origin() {
            return false;
        }
        self.history.record(Command::RotateOrigin);
        self.dirty = true;
        true
    }

    /// Restore the most recently removed annotation.
    pub fn redo(&mut self) -> Option<&Annotation> {
        let Annotation { quad, label } = self.history.pop_redo()?;
        self.annotations.push(quad, label);
        self.dirty = true;
        self.annotations.last()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn current_label(&self) -> &Label {
        &self.current_label
    }

    pub fn set_current_label(&mut self, label: Label) {
        if label != self.current_label {
            log::debug!("🏷️ Current label: '{}'", label);
            self.current_label = label;
        }
    }

    /// Replace the contents with a freshly loaded set. History is dropped.
    pub fn replace(&mut self, annotations: AnnotationSet) {
        self.annotations = annotations;
        self.history.clear();
        self.dirty = false;
    }

    /// Drop all annotations and history.
    pub fn clear(&mut self) {
        self.replace(AnnotationSet::new());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
