//! # WallKit CAM Tools
//!
//! Turns a floor plan into flat wall panels laid out on laser sheets.
//!
//! ## Pipeline
//!
//! - **Wall Merger**: collects the four sides of every room and merges
//!   collinear, touching sides into single physical walls
//! - **Wall Outline**: draws each wall as one closed cut path, with finger
//!   joint tabs on the left edge and matching slots on the right edge
//! - **Openings**: cuts door and window holes into the wall they belong to
//! - **Sheet Packer**: places walls (and optionally floor patches) in rows on
//!   fixed-size sheets, starting new rows and sheets as space runs out
//! - **Unroll**: runs the whole pipeline and produces a [`DrawableScene`]
//!
//! Every rebuild starts from scratch; nothing derived is cached between calls.

pub mod error;
pub mod geometry;
pub mod openings;
pub mod scene;
pub mod sheet_packer;
pub mod unroll;
pub mod wall_merger;
pub mod wall_outline;

pub use error::{CamToolError, CamToolResult, ParameterError};
pub use geometry::{Bounds, Point, Rect};
pub use openings::{cut_openings, Hole};
pub use scene::{
    DrawableScene, Geometry, Label, PlacedFloor, PlacedWall, SceneShape, ShapeKind, ToggleKey,
};
pub use sheet_packer::{FloorPacker, SheetLayout, SheetUsage, WallPacker};
pub use unroll::{rebuild, PointerKind, UnrollParameters, WallUnroller};
pub use wall_merger::{collect_segments, merge_rooms, merge_segments, WallSegment, WallSpan};
pub use wall_outline::{joint_segments, JointSegment, WallOutline, MIN_JOINT_PITCH};
