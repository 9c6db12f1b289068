//! Error handling for WallKit
//!
//! Provides error types for the floor plan model:
//! - Plan errors (unknown ids, duplicates, rejected edits)
//! - Geometry errors (non-finite or non-positive sizes)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! The wall layout engine itself never fails; these errors are only raised
//! by editing operations on a [`crate::FloorPlan`].

use thiserror::Error;

/// Floor plan error type
///
/// Represents rejected edits to rooms and openings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// No room with the given id exists
    #[error("Unknown room: {room_id}")]
    UnknownRoom {
        /// The room id that was looked up.
        room_id: String,
    },

    /// No opening with the given id exists
    #[error("Unknown opening: {opening_id}")]
    UnknownOpening {
        /// The opening id that was looked up.
        opening_id: String,
    },

    /// A room with the given id already exists
    #[error("Duplicate room id: {room_id}")]
    DuplicateRoom {
        /// The conflicting room id.
        room_id: String,
    },

    /// An opening with the given id already exists
    #[error("Duplicate opening id: {opening_id}")]
    DuplicateOpening {
        /// The conflicting opening id.
        opening_id: String,
    },

    /// An opening edit was rejected
    #[error("Invalid opening: {reason}")]
    InvalidOpening {
        /// The reason the edit was rejected.
        reason: String,
    },
}

/// Geometry error type
///
/// Raised when a room or opening would be given an unusable size.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate or size is NaN or infinite
    #[error("Non-finite {field}: {value}")]
    NonFinite {
        /// The offending field name.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A size is zero or negative
    #[error("Non-positive {field}: {value}")]
    NonPositive {
        /// The offending field name.
        field: &'static str,
        /// The offending value.
        value: f64,
    },
}

/// Main error type for WallKit core
///
/// A unified error type that can represent any error from the core crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Floor plan error
    #[error(transparent)]
    Plan(#[from] PlanError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl Error {
    /// Check if this is a plan error
    pub fn is_plan_error(&self) -> bool {
        matches!(self, Error::Plan(_))
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Reject NaN/infinite values.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> std::result::Result<f64, GeometryError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeometryError::NonFinite { field, value })
    }
}

/// Reject NaN/infinite, zero and negative values.
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> std::result::Result<f64, GeometryError> {
    let value = ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::NonPositive { field, value })
    }
}
