//! Wall Merger
//!
//! Every room contributes four sides. Sides that lie on the same line and
//! touch (or nearly touch) belong to one physical wall, so they are merged
//! into a single span that remembers which room sides it came from.

use std::collections::HashMap;

use tracing::debug;
use wallkit_core::{Orientation, Room, Side, WallKey};

/// Sides closer than this along their line are merged.
pub const MERGE_TOLERANCE: f64 = 0.5;

/// Shorter sides and spans are dropped.
pub const MIN_SEGMENT_LENGTH: f64 = 1.0;

/// One side of one room
#[derive(Debug, Clone, PartialEq)]
pub struct WallSegment {
    pub room_id: String,
    pub side: Side,
    pub orientation: Orientation,
    /// y of a horizontal side, x of a vertical side
    pub axis: f64,
    pub start: f64,
    pub end: f64,
}

impl WallSegment {
    /// The given side of `room`, running left to right or top to bottom.
    pub fn from_room_side(room: &Room, side: Side) -> Self {
        let (axis, start, end) = match side {
            Side::Top => (room.y, room.x, room.x + room.width),
            Side::Bottom => (room.y + room.height, room.x, room.x + room.width),
            Side::Left => (room.x, room.y, room.y + room.height),
            Side::Right => (room.x + room.width, room.y, room.y + room.height),
        };
        Self {
            room_id: room.id.clone(),
            side,
            orientation: side.orientation(),
            axis,
            start,
            end,
        }
    }

    pub fn length(&self) -> f64 {
        self.end - self.start
    }
}

/// A merged physical wall
#[derive(Debug, Clone, PartialEq)]
pub struct WallSpan {
    pub orientation: Orientation,
    pub axis: f64,
    pub start: f64,
    pub end: f64,
    /// Contributing room sides, in start order
    pub segments: Vec<WallSegment>,
}

impl WallSpan {
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    pub fn key(&self) -> WallKey {
        WallKey::new(self.orientation, self.axis, self.start, self.end)
    }

    /// The first contributing side, used for labels.
    pub fn primary(&self) -> Option<&WallSegment> {
        self.segments.first()
    }

    /// This span as a single segment attributed to its first contributor.
    pub fn to_segment(&self) -> WallSegment {
        let (room_id, side) = match self.primary() {
            Some(seg) => (seg.room_id.clone(), seg.side),
            None => (
                String::new(),
                match self.orientation {
                    Orientation::Horizontal => Side::Top,
                    Orientation::Vertical => Side::Left,
                },
            ),
        };
        WallSegment {
            room_id,
            side,
            orientation: self.orientation,
            axis: self.axis,
            start: self.start,
            end: self.end,
        }
    }
}

/// All usable sides of all valid rooms, in room order then top, bottom, left, right.
pub fn collect_segments(rooms: &[Room]) -> Vec<WallSegment> {
    let mut segments = Vec::with_capacity(rooms.len() * 4);
    for room in rooms {
        if !room.is_valid() {
            debug!("Skipping room {} with invalid geometry", room.id);
            continue;
        }
        for side in Side::ALL {
            let segment = WallSegment::from_room_side(room, side);
            if segment.length() < MIN_SEGMENT_LENGTH {
                continue;
            }
            segments.push(segment);
        }
    }
    segments
}

fn line_key(orientation: Orientation, axis: f64) -> (Orientation, i64) {
    (orientation, (axis * 10.0).round() as i64)
}

/// Merge collinear, touching segments.
///
/// Segments are grouped by orientation and axis (to 0.1 px). Groups come out
/// in the order they were first seen; within a group spans are sorted by start.
pub fn merge_segments(segments: Vec<WallSegment>) -> Vec<WallSpan> {
    let segment_count = segments.len();
    let mut order: Vec<(Orientation, i64)> = Vec::new();
    let mut groups: HashMap<(Orientation, i64), Vec<WallSegment>> = HashMap::new();

    for segment in segments {
        if !segment.axis.is_finite() || !segment.start.is_finite() || !segment.end.is_finite() {
            continue;
        }
        let key = line_key(segment.orientation, segment.axis);
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(segment);
    }

    let mut spans = Vec::new();
    for key in order {
        let Some(mut group) = groups.remove(&key) else {
            continue;
        };
        group.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut current: Option<WallSpan> = None;
        for segment in group {
            match current.as_mut() {
                Some(span) if segment.start <= span.end + MERGE_TOLERANCE => {
                    span.end = span.end.max(segment.end);
                    span.segments.push(segment);
                }
                _ => {
                    if let Some(done) = current.take() {
                        spans.push(done);
                    }
                    current = Some(WallSpan {
                        orientation: segment.orientation,
                        axis: segment.axis,
                        start: segment.start,
                        end: segment.end,
                        segments: vec![segment],
                    });
                }
            }
        }
        if let Some(done) = current {
            spans.push(done);
        }
    }

    spans.retain(|span| span.length() >= MIN_SEGMENT_LENGTH);
    debug!(
        "Merged {} wall segments into {} spans",
        segment_count,
        spans.len()
    );
    spans
}

/// Collect and merge the walls of every room.
pub fn merge_rooms(rooms: &[Room]) -> Vec<WallSpan> {
    merge_segments(collect_segments(rooms))
}
