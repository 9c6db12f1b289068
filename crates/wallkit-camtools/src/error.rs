//! Error types for the CAM tools crate.
//!
//! Building a layout never fails: bad rooms, openings and walls are skipped.
//! These errors only come from validating [`crate::UnrollParameters`] before
//! a [`crate::WallUnroller`] is created.

use thiserror::Error;

/// Errors that can occur while configuring the wall unroller.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero, negative or not finite).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
