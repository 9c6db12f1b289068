//! Small 2D primitives used by the layout engine

use serde::{Deserialize, Serialize};

/// Coordinates are snapped to this grid when a path is assembled.
pub const QUANTUM: f64 = 1e-6;
const STEPS_PER_UNIT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn quantized(&self) -> Self {
        Self::new(quantize(self.x), quantize(self.y))
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Snap a coordinate to [`QUANTUM`].
pub fn quantize(value: f64) -> f64 {
    let snapped = (value * STEPS_PER_UNIT).round() / STEPS_PER_UNIT;
    // fold -0.0
    snapped + 0.0
}

/// Append `point` unless it repeats the last point.
pub fn push_unique_point(path: &mut Vec<Point>, point: Point) {
    if let Some(last) = path.last() {
        if (point.x - last.x).abs() < QUANTUM && (point.y - last.y).abs() < QUANTUM {
            return;
        }
    }
    path.push(point);
}

/// Axis-aligned rectangle, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow by `pad` on every side.
    pub fn inflate(&self, pad: f64) -> Self {
        Self::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.x,
            min_y: self.y,
            max_x: self.right(),
            max_y: self.bottom(),
        }
    }
}

/// Bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Bounds of a point set, `None` when empty or when no point is finite.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let mut iter = points.iter().filter(|p| p.is_finite());
        let first = iter.next()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in iter {
            bounds.min_x = bounds.min_x.min(p.x);
            bounds.min_y = bounds.min_y.min(p.y);
            bounds.max_x = bounds.max_x.max(p.x);
            bounds.max_y = bounds.max_y.max(p.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// True when the vertical extent overlaps the band `[top, bottom)`.
    pub fn intersects_band(&self, top: f64, bottom: f64) -> bool {
        self.max_y > top && self.min_y < bottom
    }
}
