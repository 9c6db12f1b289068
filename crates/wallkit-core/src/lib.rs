//! # WallKit Core
//!
//! Core types and utilities shared by the WallKit crates.
//! Provides the floor plan model (rooms, doors, windows), the unit
//! conversions between plan pixels and meters, the fixed sheet constants,
//! and the visibility maps the wall layout engine reads and updates.

pub mod constants;
pub mod error;
pub mod plan;
pub mod units;
pub mod visibility;

pub use error::{Error, GeometryError, PlanError, Result};
pub use plan::{FloorPlan, Opening, OpeningEdit, OpeningKind, Orientation, PlanPoint, Room, Side};
pub use units::{format_meters, format_size_label, m_to_px, px_to_m};
pub use visibility::{Visibility, WallKey};
