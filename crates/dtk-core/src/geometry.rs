//! Geometry primitives shared by hosts and tools.
//!
//! Document coordinates are y-down (kurbo's convention), so a positive
//! angle turns clockwise on screen and 0° points right. All angles in
//! this module are in degrees.

pub use kurbo::{Point, Rect, Size, Vec2};

/// A relative position inside a rectangle: `(0, 0)` is the top-left
/// corner, `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    pub x: f64,
    pub y: f64,
}

impl Spot {
    pub const TOP_LEFT: Spot = Spot::new(0.0, 0.0);
    pub const CENTER: Spot = Spot::new(0.5, 0.5);
    pub const BOTTOM_RIGHT: Spot = Spot::new(1.0, 1.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Spot on the circle inscribed in the unit box, at `angle` degrees
    /// from its center: `(0.5 + 0.5·cos θ, 0.5 + 0.5·sin θ)`.
    pub fn on_circle(angle: f64) -> Self {
        let p = rotate_deg(Vec2::new(0.5, 0.0), angle);
        Self::new(0.5 + p.x, 0.5 + p.y)
    }

    /// Resolve this spot to a document point inside `rect`.
    pub fn point_in(&self, rect: Rect) -> Point {
        Point::new(
            rect.x0 + self.x * rect.width(),
            rect.y0 + self.y * rect.height(),
        )
    }
}

/// Reduce an angle into `[0, 360)`.
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round tiny negatives up to exactly 360
    if a >= 360.0 { 0.0 } else { a }
}

/// Rotate a vector by `angle` degrees. Quarter turns are exact so that
/// handles on the axes land on whole coordinates.
pub fn rotate_deg(v: Vec2, angle: f64) -> Vec2 {
    let a = normalize_deg(angle);
    let (sin, cos) = if a == 0.0 {
        (0.0, 1.0)
    } else if a == 90.0 {
        (1.0, 0.0)
    } else if a == 180.0 {
        (0.0, -1.0)
    } else if a == 270.0 {
        (-1.0, 0.0)
    } else {
        a.to_radians().sin_cos()
    };
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Direction from `from` towards `to` in `[0, 360)`. Coincident points
/// give 0; axis-aligned directions are exact.
pub fn direction_deg(from: Point, to: Point) -> f64 {
    let d = to - from;
    if d.x == 0.0 {
        if d.y > 0.0 {
            90.0
        } else if d.y < 0.0 {
            270.0
        } else {
            0.0
        }
    } else if d.y == 0.0 {
        if d.x > 0.0 { 0.0 } else { 180.0 }
    } else {
        normalize_deg(d.atan2().to_degrees())
    }
}

/// True when every coordinate of `rect` is finite.
pub fn is_real(rect: Rect) -> bool {
    rect.x0.is_finite() && rect.y0.is_finite() && rect.x1.is_finite() && rect.y1.is_finite()
}
