//! The three-click gesture that builds a quad.

use crate::model::geometry::{Edge, GeometryError, Point, Quad, complete_quad};

/// Progress of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClickSession {
    /// No point collected yet.
    #[default]
    Empty,
    /// First corner collected.
    OneCollected(Point),
    /// First edge collected; the next click completes the quad.
    TwoCollected(Point, Point),
}

/// What a single click did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// First corner stored, nothing to draw yet.
    Started(Point),
    /// First edge stored; draw it as a preview line.
    Preview(Edge),
    /// Third click completed a quad.
    Completed(Quad),
    /// Third click could not form a quad; the gesture was discarded.
    Rejected(GeometryError),
    /// The click was not accepted (no image is open).
    Ignored,
}

impl ClickSession {
    /// Feed one click into the gesture.
    ///
    /// The third click always returns the session to [`ClickSession::Empty`],
    /// whether or not a quad could be built.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        match std::mem::take(self) {
            ClickSession::Empty => {
                *self = ClickSession::OneCollected(point);
                ClickOutcome::Started(point)
            }
            ClickSession::OneCollected(p0) => {
                *self = ClickSession::TwoCollected(p0, point);
                ClickOutcome::Preview(Edge::new(p0, point))
            }
            ClickSession::TwoCollected(p0, p1) => match complete_quad(p0, p1, point) {
                Ok(quad) => ClickOutcome::Completed(quad),
                Err(err) => ClickOutcome::Rejected(err),
            },
        }
    }

    /// Drop any pending points. Returns true if a gesture was in progress.
    pub fn reset(&mut self) -> bool {
        let was_pending = self.is_pending();
        *self = ClickSession::Empty;
        was_pending
    }

    /// Number of points collected so far (0, 1 or 2).
    pub fn count(&self) -> usize {
        match self {
            ClickSession::Empty => 0,
            ClickSession::OneCollected(_) => 1,
            ClickSession::TwoCollected(..) => 2,
        }
    }

    pub fn is_pending(&self) -> bool {
        !matches!(self, ClickSession::Empty)
    }

    /// The preview line once two points are collected.
    pub fn preview(&self) -> Option<Edge> {
        match self {
            ClickSession::TwoCollected(p0, p1) => Some(Edge::new(*p0, *p1)),
            _ => None,
        }
    }
}
