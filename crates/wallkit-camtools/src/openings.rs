//! Opening Cutter
//!
//! Doors and windows are attached to a room side, but holes are cut into the
//! merged wall. Each opening is moved from its side's frame into the span's
//! frame, clipped to the span, and given a vertical extent measured up from
//! the floor line at the bottom of the panel.

use tracing::trace;
use wallkit_core::constants::{DOOR_HEIGHT_M, WINDOW_HEIGHT_DEFAULT_M};
use wallkit_core::{m_to_px, FloorPlan, OpeningKind};

use crate::geometry::Rect;
use crate::wall_merger::{WallSpan, MIN_SEGMENT_LENGTH};

/// Doors never take more than this share of the wall height.
pub const DOOR_MAX_WALL_FRACTION: f64 = 0.95;

/// A hole in wall-local coordinates
///
/// `rect.x` is measured from the start of the span, `rect.y` down from the
/// top of the panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Hole {
    pub opening_id: String,
    pub kind: OpeningKind,
    pub rect: Rect,
}

/// Clip an opening to a span.
///
/// `offset` is already relative to the span start. Returns the clipped
/// `(offset, length)`, or `None` when less than one pixel remains.
pub fn clip_to_span(offset: f64, length: f64, span_length: f64) -> Option<(f64, f64)> {
    let offset = if offset.is_finite() { offset } else { 0.0 };
    let length = if length.is_finite() { length } else { 0.0 };

    let offset = offset.clamp(0.0, span_length.max(0.0));
    let mut length = length.max(0.0);
    if offset + length > span_length {
        length = span_length - offset;
    }
    if length < MIN_SEGMENT_LENGTH {
        return None;
    }
    Some((offset, length))
}

/// Vertical placement of a hole as `(top, height)` from the top of a panel
/// `wall_height_px` tall.
///
/// Doors stand on the floor. Windows hang from their head height, capped at
/// the wall height. Returns `None` when nothing is left to cut.
pub fn vertical_extent(
    kind: &OpeningKind,
    wall_height_px: f64,
    wall_height_m: f64,
) -> Option<(f64, f64)> {
    match kind {
        OpeningKind::Door => {
            let height = m_to_px(DOOR_HEIGHT_M).min(wall_height_px * DOOR_MAX_WALL_FRACTION);
            (height > 0.0).then(|| (wall_height_px - height, height))
        }
        OpeningKind::Window { .. } => {
            let mut head_m = kind.window_head_m()?;
            if head_m > wall_height_m {
                head_m = wall_height_m;
            }
            let head_px = m_to_px(head_m.max(0.0));
            let height = m_to_px(WINDOW_HEIGHT_DEFAULT_M).min(head_px);
            (height > 0.0).then(|| ((wall_height_px - head_px).max(0.0), height))
        }
    }
}

/// Holes for every opening on every room side that makes up `span`.
///
/// Order follows the span's segments, then the plan's opening order.
pub fn cut_openings(
    span: &WallSpan,
    plan: &FloorPlan,
    wall_height_px: f64,
    wall_height_m: f64,
) -> Vec<Hole> {
    let span_length = span.length();
    let mut holes = Vec::new();

    for segment in &span.segments {
        for opening in plan.openings_on(&segment.room_id, segment.side) {
            let local = segment.start + opening.offset - span.start;
            let Some((offset, length)) = clip_to_span(local, opening.length, span_length) else {
                trace!("Opening {} falls outside its wall", opening.id);
                continue;
            };
            let Some((top, height)) = vertical_extent(&opening.kind, wall_height_px, wall_height_m)
            else {
                continue;
            };
            holes.push(Hole {
                opening_id: opening.id.clone(),
                kind: opening.kind,
                rect: Rect::new(offset, top, length, height),
            });
        }
    }
    holes
}
