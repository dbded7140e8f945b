//! Plain 2D geometry shared by the gauge core and its renderers.
//!
//! Coordinates follow the usual screen convention: x grows to the right,
//! y grows downwards, angles are in degrees with 0° at 3 o'clock and
//! positive angles turning clockwise.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle stored by its edges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle at the origin with the given size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// True if the rectangle has no drawable area or carries NaN/inf edges.
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.left, self.top, self.right, self.bottom]
            .iter()
            .all(|v| v.is_finite());
        !finite || self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Shrink every edge by `amount`.
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    /// Largest square with the same center that fits inside this rectangle.
    pub fn centered_square(&self) -> Self {
        let side = self.width().min(self.height());
        let c = self.center();
        Self::new(
            c.x - side / 2.0,
            c.y - side / 2.0,
            c.x + side / 2.0,
            c.y + side / 2.0,
        )
    }
}
