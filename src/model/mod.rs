//! Data models for quad annotation.

mod annotation;
mod click_session;
mod geometry;

pub use annotation::{Annotation, AnnotationSet, Label, LabelError};
pub use click_session::{ClickOutcome, ClickSession};
pub use geometry::{Edge, GeometryError, Point, Quad, complete_quad};
