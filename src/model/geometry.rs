//! Integer geometry for completing a rectangle from three clicked corners.
//!
//! The first two clicks fix one edge of the quad. The third click only has to
//! indicate the direction and distance of the opposite edge: it is snapped onto
//! the perpendicular through the second click, and the fourth corner is derived
//! from the same kind of line intersection. All arithmetic is integer, and every
//! division truncates toward zero.

use std::fmt;
use std::ops::Index;

use thiserror::Error;

/// A point in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a position on the display surface into image pixels by dividing
    /// out the display scale factor. Fractions are truncated toward zero.
    ///
    /// A non-finite or non-positive scale is treated as `1.0`.
    pub fn from_display(x: f64, y: f64, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        Self::new((x / scale) as i32, (y / scale) as i32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A directed segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: Point,
    pub to: Point,
}

impl Edge {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Edge vector as `(dx, dy)`.
    pub fn vector(&self) -> (i64, i64) {
        (
            i64::from(self.to.x) - i64::from(self.from.x),
            i64::from(self.to.y) - i64::from(self.from.y),
        )
    }
}

/// Four corners in traversal order P0 → P1 → P2 → P3.
///
/// Quads built by [`complete_quad`] never have a zero-length first or second
/// edge. Quads read back from storage are taken as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad {
    points: [Point; 4],
}

impl Quad {
    pub const fn from_points(points: [Point; 4]) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point; 4] {
        &self.points
    }

    /// Move the origin to the next corner: (P0, P1, P2, P3) becomes (P1, P2, P3, P0).
    pub fn rotate_origin(&mut self) {
        self.points.rotate_left(1);
    }

    /// The four closing edges, starting with P0 → P1.
    ///
    /// The first edge marks the quad's orientation and is usually drawn in a
    /// different colour from the other three.
    pub fn edges(&self) -> [Edge; 4] {
        let p = &self.points;
        [
            Edge::new(p[0], p[1]),
            Edge::new(p[1], p[2]),
            Edge::new(p[2], p[3]),
            Edge::new(p[3], p[0]),
        ]
    }
}

impl From<[Point; 4]> for Quad {
    fn from(points: [Point; 4]) -> Self {
        Self::from_points(points)
    }
}

impl Index<usize> for Quad {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

/// Errors from quad construction.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// An edge collapsed to a single point, so the construction lines are parallel.
    #[error("degenerate edge: {from} and {to} coincide")]
    DegenerateEdge { from: Point, to: Point },

    /// A derived corner does not fit in pixel coordinates.
    #[error("derived corner is outside the representable coordinate range")]
    CoordinateOverflow,
}

/// Line `a·x + b·y + c = 0`.
#[derive(Debug, Clone, Copy)]
struct Line {
    a: i128,
    b: i128,
    c: i128,
}

impl Line {
    /// The line through `through` whose normal vector is `(nx, ny)`.
    fn with_normal(nx: i128, ny: i128, through: Point) -> Self {
        let (x, y) = (i128::from(through.x), i128::from(through.y));
        Self {
            a: nx,
            b: ny,
            c: -nx * x - ny * y,
        }
    }

    /// Intersection point, or `None` when the lines are parallel.
    ///
    /// Integer division truncates toward zero, which fixes the rounding of
    /// every derived corner.
    fn intersect(&self, other: &Line) -> Option<Result<Point, GeometryError>> {
        let det = self.a * other.b - other.a * self.b;
        if det == 0 {
            return None;
        }
        let x = -(self.c * other.b - other.c * self.b) / det;
        let y = -(self.a * other.c - other.a * self.c) / det;
        Some(to_point(x, y))
    }
}

fn to_point(x: i128, y: i128) -> Result<Point, GeometryError> {
    let x = i32::try_from(x).map_err(|_| GeometryError::CoordinateOverflow)?;
    let y = i32::try_from(y).map_err(|_| GeometryError::CoordinateOverflow)?;
    Ok(Point::new(x, y))
}

fn delta(from: Point, to: Point) -> (i128, i128) {
    (
        i128::from(to.x) - i128::from(from.x),
        i128::from(to.y) - i128::from(from.y),
    )
}

/// Complete a rectangle from three clicks.
///
/// `p0` and `p1` define the first edge. `p2` is snapped onto the line through
/// `p1` perpendicular to that edge, giving the third corner `p2'`. The fourth
/// corner is where the line through `p0` parallel to (`p1`, `p2'`) meets the
/// line through `p2'` perpendicular to it. Returns `[p0, p1, p2', p3]`.
///
/// Fails with [`GeometryError::DegenerateEdge`] when `p0 == p1`, or when `p2`
/// snaps onto `p1` (it lies on the line through the first edge).
pub fn complete_quad(p0: Point, p1: Point, p2: Point) -> Result<Quad, GeometryError> {
    if p0 == p1 {
        return Err(GeometryError::DegenerateEdge { from: p0, to: p1 });
    }

    // Normal of the perpendicular through p1 runs along the first edge.
    let (ex, ey) = delta(p1, p0);
    let perpendicular = Line::with_normal(ex, ey, p1);
    let parallel = Line::with_normal(-ey, ex, p2);
    let p2 = perpendicular
        .intersect(&parallel)
        .ok_or(GeometryError::DegenerateEdge { from: p0, to: p1 })??;

    let (sx, sy) = delta(p1, p2);
    let through_origin = Line::with_normal(ex, ey, p0);
    let closing = Line::with_normal(sx, sy, p2);
    let p3 = through_origin
        .intersect(&closing)
        .ok_or(GeometryError::DegenerateEdge { from: p1, to: p2 })??;

    log::trace!("Completed quad {} {} {} {}", p0, p1, p2, p3);
    Ok(Quad::from_points([p0, p1, p2, p3]))
}
