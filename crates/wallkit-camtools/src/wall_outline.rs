//! Wall Outline
//!
//! A wall panel is cut as one closed path. With finger joints enabled the
//! two short edges are divided into pieces one material thickness tall.
//! Even pieces stick out of the left edge as tabs and are cut into the right
//! edge as slots, so the right edge of one panel receives the left edge of
//! the next one at a corner.

use crate::geometry::{push_unique_point, Bounds, Point, QUANTUM};

/// Finest joint pitch; thinner material is cut without joints.
pub const MIN_JOINT_PITCH: f64 = 0.01;

/// One piece of a jointed edge, measured down from the top of the wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSegment {
    pub start: f64,
    pub end: f64,
    /// Tab on the left edge, slot on the right edge
    pub is_tab: bool,
}

impl JointSegment {
    pub fn height(&self) -> f64 {
        self.end - self.start
    }
}

/// Split an edge of `height` into pieces of `pitch`, the last one shorter if needed.
///
/// Returns nothing for a non-positive or non-finite height, and for a pitch
/// that is not finite or finer than [`MIN_JOINT_PITCH`].
pub fn joint_segments(height: f64, pitch: f64) -> Vec<JointSegment> {
    if !(height.is_finite() && pitch.is_finite()) || height <= 0.0 || pitch < MIN_JOINT_PITCH {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut offset = 0.0;
    let mut index = 0usize;
    while height - offset > QUANTUM {
        let piece = pitch.min(height - offset);
        let end = if height - (offset + piece) <= QUANTUM {
            height
        } else {
            offset + piece
        };
        segments.push(JointSegment {
            start: offset,
            end,
            is_tab: index % 2 == 0,
        });
        offset = end;
        index += 1;
    }
    segments
}

/// Closed cut path of one wall panel
#[derive(Debug, Clone, PartialEq)]
pub struct WallOutline {
    points: Vec<Point>,
    jointed: bool,
}

impl WallOutline {
    /// Outline of a `width` by `height` panel whose top-left corner is `origin`.
    ///
    /// With `thickness > 0` and joints requested, tabs reach `thickness` to
    /// the left of `origin.x` and slots are cut `thickness` deep into the
    /// right edge.
    pub fn build(origin: Point, width: f64, height: f64, thickness: f64, joints: bool) -> Self {
        let segments = if joints {
            joint_segments(height, thickness)
        } else {
            Vec::new()
        };
        if segments.is_empty() {
            return Self::rectangle(origin, width, height);
        }

        let top = origin.y;
        let bottom = origin.y + height;
        let inner_left = origin.x;
        let outer_left = origin.x - thickness;
        let inner_right = origin.x + width;
        let outer_right = inner_right - thickness;

        let mut raw = Vec::with_capacity(segments.len() * 6 + 4);
        raw.push(Point::new(inner_left, top));
        raw.push(Point::new(inner_right, top));

        for seg in &segments {
            let y = top + seg.start;
            let next_y = top + seg.end;
            if seg.is_tab {
                raw.push(Point::new(outer_right, y));
                raw.push(Point::new(outer_right, next_y));
                raw.push(Point::new(inner_right, next_y));
            } else {
                raw.push(Point::new(inner_right, next_y));
            }
        }

        raw.push(Point::new(inner_left, bottom));

        for seg in segments.iter().rev() {
            let y = top + seg.end;
            let prev_y = top + seg.start;
            if seg.is_tab {
                raw.push(Point::new(outer_left, y));
                raw.push(Point::new(outer_left, prev_y));
                raw.push(Point::new(inner_left, prev_y));
            } else {
                raw.push(Point::new(inner_left, prev_y));
            }
        }

        Self {
            points: assemble(raw),
            jointed: true,
        }
    }

    pub fn rectangle(origin: Point, width: f64, height: f64) -> Self {
        let raw = vec![
            origin,
            Point::new(origin.x + width, origin.y),
            Point::new(origin.x + width, origin.y + height),
            Point::new(origin.x, origin.y + height),
        ];
        Self {
            points: assemble(raw),
            jointed: false,
        }
    }

    /// Vertices in drawing order; the last one repeats the first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_jointed(&self) -> bool {
        self.jointed
    }

    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 2 && first == last,
            _ => false,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// Snap, drop repeats and straight-through vertices, then close the ring.
fn assemble(raw: Vec<Point>) -> Vec<Point> {
    let mut path: Vec<Point> = Vec::with_capacity(raw.len() + 1);
    for point in raw.into_iter().map(|p| p.quantized()) {
        push_unique_point(&mut path, point);
        while path.len() >= 3 {
            let n = path.len();
            if collinear(path[n - 3], path[n - 2], path[n - 1]) {
                path.remove(n - 2);
            } else {
                break;
            }
        }
    }

    // the ring wraps through the first vertex too
    while path.len() >= 3 {
        let n = path.len();
        if collinear(path[n - 2], path[n - 1], path[0]) || path[n - 1] == path[0] {
            path.pop();
        } else {
            break;
        }
    }
    while path.len() >= 3 && collinear(path[path.len() - 1], path[0], path[1]) {
        path.remove(0);
    }

    if let Some(first) = path.first().copied() {
        path.push(first);
    }
    path
}

/// Axis-aligned collinearity, which also catches a path doubling back on itself.
fn collinear(a: Point, b: Point, c: Point) -> bool {
    (a.x == b.x && b.x == c.x) || (a.y == b.y && b.y == c.y)
}
