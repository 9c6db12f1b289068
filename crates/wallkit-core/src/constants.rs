//! Fixed dimensions shared by the editor, the layout engine and the exporter.
//!
//! The sheet size and the pixel scale are tied to the laser cutter bed the
//! panels are cut on. Changing them changes the physical size of every part.

/// Meters per plan pixel.
pub const SCALE_M_PER_PX: f64 = 0.2 / 3.0;

/// Width of one laser sheet in plan pixels.
pub const LASER_WIDTH: f64 = 730.0;

/// Height of one laser sheet in plan pixels.
pub const LASER_HEIGHT: f64 = 420.0;

/// Door opening height in meters.
pub const DOOR_HEIGHT_M: f64 = 2.0;

/// Window head height above the floor used when none is set.
pub const WINDOW_HEAD_DEFAULT_M: f64 = 2.0;

/// Window opening height in meters.
pub const WINDOW_HEIGHT_DEFAULT_M: f64 = 1.0;

/// Wall height used when no configuration overrides it.
pub const DEFAULT_WALL_HEIGHT_M: f64 = 2.4;

/// Default door width when a door is dropped on a wall.
pub const DEFAULT_DOOR_LENGTH_M: f64 = 0.9;

/// Default window width when a window is dropped on a wall.
pub const DEFAULT_WINDOW_LENGTH_M: f64 = 1.2;

/// Shortest opening the editor accepts, in plan pixels.
pub const MIN_OPENING_LENGTH_PX: f64 = 10.0;
