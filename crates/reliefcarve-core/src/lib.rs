//! # ReliefCarve Core
//!
//! Core types shared by the ReliefCarve crates.
//! Provides the physical job parameters with their validation rules,
//! the parameter error taxonomy, and the progress reporting seam.

pub mod error;
pub mod params;
pub mod progress;

pub use error::{ParameterError, ParameterResult};
pub use params::{
    BlockSpec, CarveParameters, Channel, FeedSpec, ReliefSpec, ScanSpec, MIN_BLOCK_DIMENSION,
};
pub use progress::{LogProgress, NoProgress, ProgressSink};
