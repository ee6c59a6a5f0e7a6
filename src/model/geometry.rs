//! Page-space boxes and surface-space rectangles.

use serde::{Deserialize, Serialize};

/// A fragment's bounding box in page units: `[x0, y0, x1, y1]`.
///
/// Components are kept exactly as the extractor reported them; nothing here
/// normalizes or validates them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BBox(pub [f64; 4]);

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self([x0, y0, x1, y1])
    }

    /// Left edge.
    pub fn x0(&self) -> f64 {
        self.0[0]
    }

    /// Top edge.
    pub fn y0(&self) -> f64 {
        self.0[1]
    }

    /// Right edge.
    pub fn x1(&self) -> f64 {
        self.0[2]
    }

    /// Bottom edge.
    pub fn y1(&self) -> f64 {
        self.0[3]
    }

    /// The four components in `[x0, y0, x1, y1]` order.
    pub fn components(&self) -> [f64; 4] {
        self.0
    }

    /// Check that every component is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Check whether every component is within `tolerance` of `other`'s.
    ///
    /// The comparison is strict: a delta equal to `tolerance` does not match.
    /// Equal components always match, so infinities match themselves and NaN
    /// matches NaN.
    pub fn approx_eq(&self, other: &BBox, tolerance: f64) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(&a, &b)| same_component(a, b) || (a - b).abs() < tolerance)
    }

    /// Project into a surface's pixel space (`pixel = component * scale`).
    pub fn to_pixels(&self, scale: f32) -> Rect {
        let scale = f64::from(scale);
        Rect::new(
            (self.x0() * scale) as f32,
            (self.y0() * scale) as f32,
            ((self.x1() - self.x0()) * scale) as f32,
            ((self.y1() - self.y0()) * scale) as f32,
        )
    }
}

fn same_component(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl From<[f64; 4]> for BBox {
    fn from(components: [f64; 4]) -> Self {
        Self(components)
    }
}

/// An axis-aligned rectangle in a rendering surface's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Check if a point falls inside the rectangle (edges inclusive).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Check if `other` lies entirely within the vertical extent of this rectangle.
    pub fn contains_vertically(&self, other: &Rect) -> bool {
        other.y >= self.y && other.bottom() <= self.bottom()
    }

    /// Shift the rectangle by the given offsets.
    pub fn translate(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}
