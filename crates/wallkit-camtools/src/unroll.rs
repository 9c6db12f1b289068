//! Wall Unroller
//!
//! Runs the full layout pipeline: merge room sides into walls, pack the
//! panels onto sheets, draw outlines, labels and holes, then (in joined mode)
//! append one floor patch per room. The visibility maps are the only state
//! that survives between rebuilds; unseen walls and floors are recorded as
//! enabled on the way through.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use wallkit_core::constants::DEFAULT_WALL_HEIGHT_M;
use wallkit_core::{format_meters, format_size_label, m_to_px, FloorPlan, Visibility, WallKey};

use crate::error::{CamToolResult, ParameterError};
use crate::geometry::{Point, Rect};
use crate::openings::cut_openings;
use crate::scene::{
    DrawableScene, Geometry, Label, PlacedFloor, PlacedWall, SceneShape, ShapeKind, ToggleKey,
};
use crate::sheet_packer::{FloorPacker, SheetLayout, SheetUsage, WallPacker};
use crate::wall_merger::{merge_rooms, WallSpan, MIN_SEGMENT_LENGTH};
use crate::wall_outline::{WallOutline, MIN_JOINT_PITCH};

/// Stroke width of cut lines.
pub const CUT_STROKE_WIDTH: f64 = 1.0;

const WALL_LABEL_DY_EM: f64 = -0.3;
const FLOOR_LABEL_DY_EM: f64 = -0.6;

/// Input device, which decides how generous hit areas are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    #[default]
    Fine,
    Coarse,
}

impl PointerKind {
    /// Stroke width of the invisible path around a wall panel.
    pub fn wall_hit_stroke(&self) -> f64 {
        match self {
            Self::Fine => 18.0,
            Self::Coarse => 30.0,
        }
    }

    /// Padding around a floor patch's hit rectangle.
    pub fn floor_hit_pad(&self) -> f64 {
        match self {
            Self::Fine => 10.0,
            Self::Coarse => 16.0,
        }
    }
}

/// Settings for one rebuild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnrollParameters {
    /// Wall height in meters
    pub wall_height_m: f64,
    /// Material thickness in plan pixels; also the finger joint pitch
    pub thickness: f64,
    pub finger_joints: bool,
    /// Also lay out one floor patch per room
    pub joined_mode: bool,
    /// Printed on every label as `PHS <name>`
    pub student_name: String,
    pub pointer: PointerKind,
    pub layout: SheetLayout,
}

impl Default for UnrollParameters {
    fn default() -> Self {
        Self {
            wall_height_m: DEFAULT_WALL_HEIGHT_M,
            thickness: 0.0,
            finger_joints: true,
            joined_mode: false,
            student_name: String::new(),
            pointer: PointerKind::Fine,
            layout: SheetLayout::default(),
        }
    }
}

impl UnrollParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if !self.wall_height_m.is_finite() || self.wall_height_m <= 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "wall_height_m".to_string(),
                reason: format!("must be a positive number, got {}", self.wall_height_m),
            });
        }
        let wall_height_px = self.wall_height_px();
        if wall_height_px + self.layout.top_padding + self.layout.bottom_guard
            > self.layout.sheet_height
        {
            return Err(ParameterError::OutOfRange {
                name: "wall_height_m".to_string(),
                value: self.wall_height_m,
                min: 0.0,
                max: (self.layout.sheet_height - self.layout.top_padding - self.layout.bottom_guard)
                    * wallkit_core::constants::SCALE_M_PER_PX,
            });
        }
        if self.thickness.is_nan() || self.thickness < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "thickness".to_string(),
                reason: format!("must be zero or positive, got {}", self.thickness),
            });
        }
        if self.thickness != 0.0
            && (self.thickness < MIN_JOINT_PITCH || self.thickness > wall_height_px)
        {
            return Err(ParameterError::OutOfRange {
                name: "thickness".to_string(),
                value: self.thickness,
                min: MIN_JOINT_PITCH,
                max: wall_height_px,
            });
        }
        self.layout.validate()
    }

    pub fn wall_height_px(&self) -> f64 {
        m_to_px(self.wall_height_m)
    }

    /// Thickness used for layout; anything unusable counts as zero.
    ///
    /// Below [`MIN_JOINT_PITCH`] the joints would be finer than the cut
    /// geometry can resolve.
    pub fn effective_thickness(&self) -> f64 {
        if self.thickness.is_finite() && self.thickness >= MIN_JOINT_PITCH {
            self.thickness
        } else {
            0.0
        }
    }

    pub fn use_joints(&self) -> bool {
        self.finger_joints && self.effective_thickness() > 0.0
    }

    fn student_line(&self) -> String {
        let name = self.student_name.trim();
        if name.is_empty() {
            String::new()
        } else {
            format!("PHS {}", name)
        }
    }

    /// Copy with unusable values replaced by defaults.
    fn sanitized(&self) -> Self {
        let mut params = self.clone();
        if !params.wall_height_m.is_finite() || params.wall_height_m <= 0.0 {
            params.wall_height_m = DEFAULT_WALL_HEIGHT_M;
        }
        params.thickness = params.effective_thickness();
        if params.layout.validate().is_err() {
            params.layout = SheetLayout::default();
        }
        params
    }
}

/// Validated entry point for building layouts
#[derive(Debug, Clone)]
pub struct WallUnroller {
    params: UnrollParameters,
}

impl WallUnroller {
    pub fn new(params: UnrollParameters) -> CamToolResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &UnrollParameters {
        &self.params
    }

    pub fn rebuild(&self, plan: &FloorPlan, visibility: &mut Visibility) -> DrawableScene {
        rebuild(plan, &self.params, visibility)
    }

    /// Flip one wall and rebuild.
    pub fn toggle_wall(
        &self,
        plan: &FloorPlan,
        visibility: &mut Visibility,
        key: &WallKey,
    ) -> DrawableScene {
        let enabled = visibility.toggle_wall(key);
        debug!("Wall {} {}", key, if enabled { "enabled" } else { "disabled" });
        self.rebuild(plan, visibility)
    }

    /// Flip one floor patch and rebuild.
    pub fn toggle_floor(
        &self,
        plan: &FloorPlan,
        visibility: &mut Visibility,
        room_id: &str,
    ) -> DrawableScene {
        let enabled = visibility.toggle_floor(room_id);
        debug!(
            "Floor {} {}",
            room_id,
            if enabled { "enabled" } else { "disabled" }
        );
        self.rebuild(plan, visibility)
    }

    /// Flip whatever a click on the scene hit, then rebuild.
    pub fn toggle(
        &self,
        plan: &FloorPlan,
        visibility: &mut Visibility,
        target: &ToggleKey,
    ) -> DrawableScene {
        match target {
            ToggleKey::Wall(key) => self.toggle_wall(plan, visibility, key),
            ToggleKey::Floor(room_id) => self.toggle_floor(plan, visibility, room_id),
        }
    }
}

/// Build the sheet layout for `plan` from scratch.
///
/// Never fails: invalid rooms, openings and walls are skipped, and unusable
/// parameters fall back to their defaults.
pub fn rebuild(
    plan: &FloorPlan,
    params: &UnrollParameters,
    visibility: &mut Visibility,
) -> DrawableScene {
    let params = params.sanitized();
    let layout = params.layout;
    let mut scene = DrawableScene::empty(layout.sheet_width, layout.sheet_height);

    if plan.rooms().is_empty() {
        return scene;
    }

    let spans = merge_rooms(plan.rooms());
    if spans.is_empty() {
        return scene;
    }

    let thickness = params.effective_thickness();
    let use_joints = params.use_joints();
    let wall_height_px = params.wall_height_px();
    let student_line = params.student_line();

    let mut usage = SheetUsage::new();
    let tab_reach = if use_joints { thickness } else { 0.0 };
    let mut packer = WallPacker::new(
        layout,
        wall_height_px,
        layout.wall_gap(thickness),
        &mut usage,
    )
    .with_tab_reach(tab_reach);

    for span in &spans {
        let base_width = span.length();
        let width = base_width + thickness;
        if !base_width.is_finite() || base_width < MIN_SEGMENT_LENGTH || width < MIN_SEGMENT_LENGTH
        {
            continue;
        }

        let key = span.key();
        let enabled = visibility.wall_enabled(&key);
        let (x, y) = packer.place(width, &mut usage);
        let sheet = packer.sheet_index();

        let hole_count = push_wall(
            &mut scene,
            WallDraw {
                span,
                key: key.clone(),
                origin: Point::new(x, y),
                width,
                height: wall_height_px,
                thickness,
                use_joints,
                enabled,
            },
            plan,
            &params,
            &student_line,
        );

        scene.walls.push(PlacedWall {
            key,
            rect: Rect::new(x, y, width, wall_height_px),
            span_length: base_width,
            enabled,
            sheet,
            hole_count,
        });
    }

    if params.joined_mode {
        let mut floors = FloorPacker::after_walls(layout, packer.baseline(), &mut usage);
        for room in plan.rooms() {
            let (w, h) = (room.width, room.height);
            if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
                continue;
            }
            let enabled = visibility.floor_enabled(&room.id);
            let (x, y) = floors.place(w, h, &mut usage);
            let rect = Rect::new(x, y, w, h);
            push_floor(
                &mut scene,
                &room.id,
                rect,
                enabled,
                plan,
                &params,
                &student_line,
            );
            scene.floors.push(PlacedFloor {
                room_id: room.id.clone(),
                rect,
                enabled,
                sheet: floors.sheet_index(),
            });
        }
    }

    scene.sheet_count = usage.sheet_count();
    info!(
        "Laid out {} walls and {} floor patches on {} sheet(s)",
        scene.walls.len(),
        scene.floors.len(),
        scene.sheet_count
    );
    scene
}

struct WallDraw<'a> {
    span: &'a WallSpan,
    key: WallKey,
    origin: Point,
    width: f64,
    height: f64,
    thickness: f64,
    use_joints: bool,
    enabled: bool,
}

/// Hit area, outline, label and holes of one panel. Returns the hole count.
fn push_wall(
    scene: &mut DrawableScene,
    wall: WallDraw<'_>,
    plan: &FloorPlan,
    params: &UnrollParameters,
    student_line: &str,
) -> usize {
    let outline = WallOutline::build(
        wall.origin,
        wall.width,
        wall.height,
        wall.thickness,
        wall.use_joints,
    );
    let points = outline.into_points();
    let toggle = Some(ToggleKey::Wall(wall.key));

    scene.shapes.push(SceneShape {
        kind: ShapeKind::WallHitArea,
        geometry: Geometry::Path {
            points: points.clone(),
        },
        exportable: false,
        stroke_width: params.pointer.wall_hit_stroke(),
        toggle: toggle.clone(),
    });
    scene.shapes.push(SceneShape {
        kind: ShapeKind::WallOutline,
        geometry: Geometry::Path { points },
        exportable: wall.enabled,
        stroke_width: CUT_STROKE_WIDTH,
        toggle: toggle.clone(),
    });

    let name_line = match wall.span.primary() {
        Some(seg) => format!("{} {}", plan.room_display_name(&seg.room_id), seg.side),
        None => String::new(),
    };
    let label = Label::new(
        Point::new(
            wall.origin.x + wall.width / 4.0,
            wall.origin.y + wall.height / 4.0,
        ),
        vec![
            student_line.to_string(),
            name_line,
            format_meters(wall.width),
        ],
        WALL_LABEL_DY_EM,
    );
    scene.shapes.push(SceneShape {
        kind: ShapeKind::WallLabel,
        geometry: Geometry::Text { label },
        exportable: wall.enabled,
        stroke_width: 0.0,
        toggle,
    });

    if !wall.enabled {
        return 0;
    }

    let holes = cut_openings(wall.span, plan, wall.height, params.wall_height_m);
    let count = holes.len();
    for hole in holes {
        scene.shapes.push(SceneShape {
            kind: ShapeKind::Hole,
            geometry: Geometry::Rect {
                rect: hole.rect.translate(wall.origin.x, wall.origin.y),
            },
            exportable: true,
            stroke_width: CUT_STROKE_WIDTH,
            toggle: None,
        });
    }
    count
}

fn push_floor(
    scene: &mut DrawableScene,
    room_id: &str,
    rect: Rect,
    enabled: bool,
    plan: &FloorPlan,
    params: &UnrollParameters,
    student_line: &str,
) {
    let toggle = Some(ToggleKey::Floor(room_id.to_string()));

    scene.shapes.push(SceneShape {
        kind: ShapeKind::FloorHitArea,
        geometry: Geometry::Rect {
            rect: rect.inflate(params.pointer.floor_hit_pad()),
        },
        exportable: false,
        stroke_width: 0.0,
        toggle: toggle.clone(),
    });
    scene.shapes.push(SceneShape {
        kind: ShapeKind::FloorOutline,
        geometry: Geometry::Rect { rect },
        exportable: enabled,
        stroke_width: CUT_STROKE_WIDTH,
        toggle: toggle.clone(),
    });

    let label = Label::new(
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0),
        vec![
            student_line.to_string(),
            format!("{} floor", plan.room_display_name(room_id)),
            format_size_label(rect.width, rect.height),
        ],
        FLOOR_LABEL_DY_EM,
    );
    scene.shapes.push(SceneShape {
        kind: ShapeKind::FloorLabel,
        geometry: Geometry::Text { label },
        exportable: enabled,
        stroke_width: 0.0,
        toggle,
    });
}
