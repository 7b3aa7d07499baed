//! Undo/redo history for annotation edits.
//!
//! Undo always removes the most recently committed annotation, so the history
//! only has to remember what was removed in order to redo it. Rendering is
//! rebuilt from the annotation set after every edit, so no pixel snapshots are
//! kept.

use crate::constants::DEFAULT_MAX_HISTORY;
use crate::model::{Annotation, Label};

// ============================================================================
// Command Types
// ============================================================================

/// An edit applied to the annotation set.
#[derive(Debug, Clone)]
pub enum Command {
    /// A quad was committed
    AddAnnotation {
        /// Label of the committed quad
        label: Label,
    },
    /// The last quad was removed
    RemoveAnnotation {
        /// The removed annotation (kept for redo)
        annotation: Annotation,
    },
    /// The last quad's origin moved to its next corner
    RotateOrigin,
}

impl Command {
    /// Get a human-readable description of this command
    pub fn description(&self) -> String {
        match self {
            Command::AddAnnotation { label } => format!("Add '{}'", label),
            Command::RemoveAnnotation { annotation } => {
                format!("Delete '{}'", annotation.label)
            }
            Command::RotateOrigin => "Rotate origin".to_string(),
        }
    }
}

// ============================================================================
// Undo Stack
// ============================================================================

/// Configuration for the undo stack
#[derive(Debug, Clone)]
pub struct UndoConfig {
    /// Maximum number of removed annotations to keep for redo
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// Redo history.
///
/// Undone annotations are pushed onto `redo_stack` (most recent at the end).
/// Any other edit clears it, since a redo after a new edit would restore a
/// quad out of order.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    /// Annotations that can be restored
    redo_stack: Vec<Annotation>,
    /// Configuration
    config: UndoConfig,
}

impl UndoStack {
    /// Create a new empty undo stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Record an edit that was just applied.
    pub fn record(&mut self, command: Command) {
        log::debug!("📝 Edit: '{}'", command.description());
        match command {
            Command::RemoveAnnotation { annotation } => {
                self.redo_stack.push(annotation);
                while self.redo_stack.len() > self.config.max_history {
                    self.redo_stack.remove(0);
                }
            }
            Command::AddAnnotation { .. } | Command::RotateOrigin => self.redo_stack.clear(),
        }
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop the most recently undone annotation. The rest of the redo history
    /// is kept, so repeated redos walk forward again.
    pub fn pop_redo(&mut self) -> Option<Annotation> {
        let annotation = self.redo_stack.pop()?;
        log::debug!("⏩ Redo: '{}'", annotation.label);
        Some(annotation)
    }

    /// Get the description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack
            .last()
            .map(|a| format!("Restore '{}'", a.label))
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.redo_stack.clear();
        log::debug!("🗑️ Undo history cleared");
    }

    /// Get the number of annotations that can be redone
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Point, Quad};

    fn annotation(label: &str, offset: i32) -> Annotation {
        Annotation::new(
            Quad::from_points([
                Point::new(offset, 0),
                Point::new(offset, 5),
                Point::new(offset + 5, 5),
                Point::new(offset + 5, 0),
            ]),
            Label::new(label).unwrap(),
        )
    }

    #[test]
    fn test_undo_stack_basic() {
        let mut stack = UndoStack::new();
        assert!(!stack.can_redo());

        stack.record(Command::RemoveAnnotation {
            annotation: annotation("car", 0),
        });
        assert!(stack.can_redo());
        assert_eq!(stack.redo_description().as_deref(), Some("Restore 'car'"));

        let redone = stack.pop_redo();
        assert_eq!(redone, Some(annotation("car", 0)));
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_redo_is_last_in_first_out() {
        let mut stack = UndoStack::new();
        stack.record(Command::RemoveAnnotation {
            annotation: annotation("bus", 10),
        });
        stack.record(Command::RemoveAnnotation {
            annotation: annotation("car", 0),
        });

        assert_eq!(stack.pop_redo().unwrap().label.as_str(), "car");
        assert_eq!(stack.pop_redo().unwrap().label.as_str(), "bus");
        assert!(stack.pop_redo().is_none());
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut stack = UndoStack::new();
        stack.record(Command::RemoveAnnotation {
            annotation: annotation("car", 0),
        });
        stack.record(Command::AddAnnotation {
            label: Label::default(),
        });
        assert!(!stack.can_redo());

        stack.record(Command::RemoveAnnotation {
            annotation: annotation("car", 0),
        });
        stack.record(Command::RotateOrigin);
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_pop_redo_keeps_remaining_history() {
        let mut stack = UndoStack::new();
        for i in 0..2 {
            stack.record(Command::RemoveAnnotation {
                annotation: annotation("car", i),
            });
        }
        assert_eq!(stack.pop_redo(), Some(annotation("car", 1)));
        assert_eq!(stack.redo_count(), 1);
        assert_eq!(stack.redo_description().as_deref(), Some("Restore 'car'"));
    }

    #[test]
    fn test_max_history() {
        let mut stack = UndoStack::with_config(UndoConfig { max_history: 3 });

        for i in 0..5 {
            stack.record(Command::RemoveAnnotation {
                annotation: annotation("car", i),
            });
        }

        assert_eq!(stack.redo_count(), 3);
        assert_eq!(stack.pop_redo(), Some(annotation("car", 4)));
    }

    #[test]
    fn test_command_descriptions() {
        let add = Command::AddAnnotation {
            label: Label::new("truck").unwrap(),
        };
        assert_eq!(add.description(), "Add 'truck'");

        let remove = Command::RemoveAnnotation {
            annotation: annotation("car", 0),
        };
        assert_eq!(remove.description(), "Delete 'car'");

        assert_eq!(Command::RotateOrigin.description(), "Rotate origin");
    }
}
