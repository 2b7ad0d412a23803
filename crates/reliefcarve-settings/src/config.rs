//! Job configuration
//!
//! Provides loading, saving and validation of carving job files.
//! Relative paths inside a job file are resolved against the directory the
//! file was loaded from.

use crate::error::{SettingsError, SettingsResult};
pub use reliefcarve_core::Channel;
use reliefcarve_core::CarveParameters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Largest number of decimal places written per field.
pub const MAX_PRECISION: usize = 10;

/// Where the motion stream is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OutputMode {
    /// All passes in one file
    Single { path: PathBuf },
    /// One file per pass, named `<prefix><index><extension>`
    PerPass {
        directory: PathBuf,
        prefix: String,
        extension: String,
    },
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::Single {
            path: PathBuf::from("relief.nc"),
        }
    }
}

impl OutputMode {
    /// File that receives the pass with the given index.
    pub fn pass_path(&self, index: u32) -> PathBuf {
        match self {
            Self::Single { path } => path.clone(),
            Self::PerPass {
                directory,
                prefix,
                extension,
            } => directory.join(format!("{}{}{}", prefix, index, extension)),
        }
    }

    fn resolve_against(&mut self, base: &Path) {
        match self {
            Self::Single { path } => resolve(path, base),
            Self::PerPass { directory, .. } => resolve(directory, base),
        }
    }
}

fn resolve(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

/// Complete carving job configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveConfig {
    /// Heightmap image
    pub image: PathBuf,
    /// Channel read as height
    pub channel: Channel,
    /// Decimal places written per field
    pub precision: usize,
    /// Output destination
    pub output: OutputMode,
    /// Physical carving parameters
    pub parameters: CarveParameters,
}

impl Default for CarveConfig {
    fn default() -> Self {
        Self {
            image: PathBuf::from("heightmap.png"),
            channel: Channel::default(),
            precision: 4,
            output: OutputMode::default(),
            parameters: CarveParameters::default(),
        }
    }
}

impl CarveConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let mut config: Self = match extension(path) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => return Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        };

        if let Some(base) = path.parent() {
            resolve(&mut config.image, base);
            config.output.resolve_against(base);
        }
        debug!(path = %path.display(), "loaded job configuration");

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            _ => return Err(SettingsError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.image.as_os_str().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "image".to_string(),
                reason: "no heightmap image given".to_string(),
            });
        }

        if self.precision > MAX_PRECISION {
            return Err(SettingsError::InvalidSetting {
                key: "precision".to_string(),
                reason: format!("must be at most {}", MAX_PRECISION),
            });
        }

        match &self.output {
            OutputMode::Single { path } if path.as_os_str().is_empty() => {
                return Err(SettingsError::InvalidSetting {
                    key: "output.path".to_string(),
                    reason: "no output file given".to_string(),
                });
            }
            OutputMode::PerPass { prefix, .. } if prefix.is_empty() => {
                return Err(SettingsError::InvalidSetting {
                    key: "output.prefix".to_string(),
                    reason: "per-pass output needs a file name prefix".to_string(),
                });
            }
            _ => {}
        }

        self.parameters.validate()?;
        Ok(())
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}
