//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for heightmap loading,
//! parameter validation, and toolpath output.

use reliefcarve_core::ParameterError;
use std::io;
use thiserror::Error;

/// Errors that can occur while generating a relief toolpath.
#[derive(Error, Debug)]
pub enum CarveError {
    /// The heightmap could not be loaded or decoded.
    #[error("Failed to load heightmap: {0}")]
    LoadError(String),

    /// The heightmap content is unusable.
    #[error("Image processing error: {0}")]
    ImageError(String),

    /// I/O error while writing the motion stream.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Result type alias for carving operations.
pub type CarveResult<T> = Result<T, CarveError>;
