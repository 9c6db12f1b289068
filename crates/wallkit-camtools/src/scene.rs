//! Drawable scene produced by a rebuild
//!
//! The scene is a flat, ordered list of shapes on one tall canvas made of
//! stacked sheets. Cut shapes carry an export flag; helper shapes (hit areas)
//! never export. Shapes that react to clicks carry the toggle key of the wall
//! or floor they belong to.

use serde::Serialize;
use wallkit_core::WallKey;

use crate::geometry::{Bounds, Point, Rect};

/// Font size of panel labels, in canvas units.
pub const LABEL_FONT_SIZE: f64 = 2.0;
/// Distance between label lines, in em.
pub const LABEL_LINE_SPACING_EM: f64 = 1.1;
/// Rough glyph advance used for label bounds, in em.
const GLYPH_WIDTH_EM: f64 = 0.6;
const ASCENT_EM: f64 = 0.8;
const DESCENT_EM: f64 = 0.2;

/// What a shape represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    WallHitArea,
    WallOutline,
    WallLabel,
    Hole,
    FloorHitArea,
    FloorOutline,
    FloorLabel,
}

impl ShapeKind {
    /// Hit areas only exist for pointer interaction.
    pub fn is_helper(&self) -> bool {
        matches!(self, Self::WallHitArea | Self::FloorHitArea)
    }
}

/// Centered multi-line text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub anchor: Point,
    pub lines: Vec<String>,
    /// Shift of the first line relative to the anchor, in em
    pub first_line_dy_em: f64,
    pub font_size: f64,
}

impl Label {
    pub fn new(anchor: Point, lines: Vec<String>, first_line_dy_em: f64) -> Self {
        Self {
            anchor,
            lines,
            first_line_dy_em,
            font_size: LABEL_FONT_SIZE,
        }
    }

    /// Baseline of line `index`.
    pub fn line_y(&self, index: usize) -> f64 {
        self.anchor.y
            + (self.first_line_dy_em + LABEL_LINE_SPACING_EM * index as f64) * self.font_size
    }

    /// Estimated text box; text is measured by character count.
    pub fn bounds(&self) -> Bounds {
        let longest = self
            .lines
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let half_width = longest * GLYPH_WIDTH_EM * self.font_size / 2.0;
        let last = self.lines.len().saturating_sub(1);
        Bounds {
            min_x: self.anchor.x - half_width,
            min_y: self.line_y(0) - ASCENT_EM * self.font_size,
            max_x: self.anchor.x + half_width,
            max_y: self.line_y(last) + DESCENT_EM * self.font_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    /// Closed polygon; the last point repeats the first
    Path { points: Vec<Point> },
    Rect { rect: Rect },
    Text { label: Label },
}

impl Geometry {
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Path { points } => Bounds::from_points(points),
            Self::Rect { rect } => rect.is_finite().then(|| rect.bounds()),
            Self::Text { label } => Some(label.bounds()),
        }
    }
}

/// Identifies the wall or floor patch a click toggles
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "target", content = "key", rename_all = "snake_case")]
pub enum ToggleKey {
    Wall(WallKey),
    Floor(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneShape {
    pub kind: ShapeKind,
    pub geometry: Geometry,
    pub exportable: bool,
    /// Stroke width; hit areas are drawn wide and transparent
    pub stroke_width: f64,
    pub toggle: Option<ToggleKey>,
}

impl SceneShape {
    pub fn bounds(&self) -> Option<Bounds> {
        self.geometry.bounds()
    }
}

/// Where a wall panel ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedWall {
    pub key: WallKey,
    /// Panel rectangle without finger joint tabs
    pub rect: Rect,
    /// Merged span length before the thickness allowance
    pub span_length: f64,
    pub enabled: bool,
    pub sheet: usize,
    pub hole_count: usize,
}

/// Where a floor patch ended up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedFloor {
    pub room_id: String,
    pub rect: Rect,
    pub enabled: bool,
    pub sheet: usize,
}

/// Result of a rebuild
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawableScene {
    pub shapes: Vec<SceneShape>,
    pub walls: Vec<PlacedWall>,
    pub floors: Vec<PlacedFloor>,
    pub sheet_count: usize,
    pub sheet_width: f64,
    pub sheet_height: f64,
}

impl DrawableScene {
    pub fn empty(sheet_width: f64, sheet_height: f64) -> Self {
        Self {
            shapes: Vec::new(),
            walls: Vec::new(),
            floors: Vec::new(),
            sheet_count: 1,
            sheet_width,
            sheet_height,
        }
    }

    /// Height of the whole canvas.
    pub fn total_height(&self) -> f64 {
        self.sheet_height * self.sheet_count as f64
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn exportable_shapes(&self) -> impl Iterator<Item = &SceneShape> {
        self.shapes.iter().filter(|s| s.exportable)
    }

    /// Shapes belonging to one wall or floor patch.
    pub fn shapes_for<'a>(&'a self, key: &'a ToggleKey) -> impl Iterator<Item = &'a SceneShape> {
        self.shapes
            .iter()
            .filter(move |s| s.toggle.as_ref() == Some(key))
    }

    /// Toggle target of the topmost hit area containing `point`.
    pub fn hit_test(&self, point: Point) -> Option<&ToggleKey> {
        self.shapes
            .iter()
            .rev()
            .filter(|s| s.kind.is_helper())
            .find(|s| {
                s.bounds().is_some_and(|b| {
                    let pad = s.stroke_width / 2.0;
                    point.x >= b.min_x - pad
                        && point.x <= b.max_x + pad
                        && point.y >= b.min_y - pad
                        && point.y <= b.max_y + pad
                })
            })
            .and_then(|s| s.toggle.as_ref())
    }
}
