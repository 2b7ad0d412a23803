//! Error types for parameter validation.
//!
//! Every variant names the offending parameter so that a failed job can
//! report exactly which relationship was violated before anything runs.

use thiserror::Error;

/// Errors related to carving parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is below its allowed minimum.
    #[error("Parameter '{name}' out of range: {value} (minimum: {min})")]
    OutOfRange { name: String, value: f64, min: f64 },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
