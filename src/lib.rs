//! quadlabel - quadrilateral image annotation engine
//!
//! Turns three clicks into a rectangle-like quad, keeps an ordered list of
//! labelled quads per image with undo, and stores them in plain text label
//! files next to the images.

pub mod config;
pub mod constants;
pub mod editor;
pub mod format;
pub mod message;
pub mod model;
pub mod store;
pub mod undo;

pub use config::{ConfigError, EditorConfig, LogLevel};
pub use editor::{Editor, EditorError, RenderedQuad, UndoOutcome};
pub use message::{EditorMessage, ParseMessageError};
pub use model::{
    Annotation, AnnotationSet, ClickOutcome, ClickSession, Edge, GeometryError, Label, LabelError,
    Point, Quad, complete_quad,
};
