//! # ReliefCarve Settings
//!
//! Job configuration file handling. A job file names the heightmap, the
//! channel to read, where the motion stream goes, and the physical carving
//! parameters. JSON and TOML are both accepted.

pub mod config;
pub mod error;

pub use config::{CarveConfig, OutputMode};
pub use error::{SettingsError, SettingsResult};
