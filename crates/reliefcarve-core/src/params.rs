//! Carving job parameters.
//!
//! All lengths share one unit (inches by default, matching the feed units the
//! machine is configured for). The defaults describe a 10" x 5" x 1" block
//! carved with a 1/2" ball-nose tool in quarter-inch passes.

use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Smallest block X/Y extent accepted. Anything thinner produces a
/// degenerate pixels-per-unit scale.
pub const MIN_BLOCK_DIMENSION: f64 = 0.01;

/// Image channel read as the height signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Red component of an RGBA image
    #[default]
    Red,
    /// Green component of an RGBA image
    Green,
    /// Blue component of an RGBA image
    Blue,
    /// Alpha component of an RGBA image
    Alpha,
    /// Luminance of the image
    Luma,
}

/// Physical block of material and where it sits on the machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockSpec {
    /// Block length along X
    pub x: f64,
    /// Block length along Y
    pub y: f64,
    /// Block thickness (top surface height)
    pub z: f64,
    /// Distance of the block corner from the machine origin along X
    pub offset_x: f64,
    /// Distance of the block corner from the machine origin along Y
    pub offset_y: f64,
    /// Safe height for lateral moves
    pub taxi_z: f64,
}

impl Default for BlockSpec {
    fn default() -> Self {
        Self {
            x: 10.0,
            y: 5.0,
            z: 1.0,
            offset_x: 2.0,
            offset_y: 2.0,
            taxi_z: 2.0,
        }
    }
}

/// How the relief is carved into the block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReliefSpec {
    /// Height of the deepest point of the relief (darkest pixel)
    pub min_z: f64,
    /// Height of the shallowest point of the relief (brightest pixel)
    pub max_z: f64,
    /// Radius of the round-nosed tool
    pub tool_radius: f64,
    /// Maximum material depth removed in a single pass
    pub carve_depth: f64,
    /// Extra height left per remaining pass, removed by the following pass
    pub slice_shave: f64,
}

impl Default for ReliefSpec {
    fn default() -> Self {
        Self {
            min_z: 1.0 / 16.0,
            max_z: 15.0 / 16.0,
            tool_radius: 1.0 / 4.0,
            carve_depth: 1.0 / 4.0,
            slice_shave: 0.0,
        }
    }
}

/// Feed rates, in length units per minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSpec {
    /// Feed used while the tool is in contact with the material
    pub carve: f64,
    /// Feed used for transits at taxi height
    pub taxi: f64,
}

impl Default for FeedSpec {
    fn default() -> Self {
        Self {
            carve: 30.0,
            taxi: 60.0,
        }
    }
}

/// Scan direction and image orientation controls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSpec {
    /// Sweep rows from the far X edge towards the origin
    pub reverse_x: bool,
    /// Sweep each row from the far Y edge towards the origin
    pub reverse_y: bool,
    /// Mirror the heightmap across the block's X extent
    pub flip_x: bool,
    /// Mirror the heightmap across the block's Y extent
    pub flip_y: bool,
}

/// Complete set of physical parameters for one carving job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarveParameters {
    pub block: BlockSpec,
    pub relief: ReliefSpec,
    pub feeds: FeedSpec,
    pub scan: ScanSpec,
}

impl CarveParameters {
    /// Check the hard invariants. Any failure is fatal for the job.
    pub fn validate(&self) -> ParameterResult<()> {
        let b = &self.block;
        let r = &self.relief;

        for (name, value) in [
            ("block.x", b.x),
            ("block.y", b.y),
            ("block.z", b.z),
            ("block.offset_x", b.offset_x),
            ("block.offset_y", b.offset_y),
            ("block.taxi_z", b.taxi_z),
            ("relief.min_z", r.min_z),
            ("relief.max_z", r.max_z),
            ("relief.tool_radius", r.tool_radius),
            ("relief.carve_depth", r.carve_depth),
            ("relief.slice_shave", r.slice_shave),
            ("feeds.carve", self.feeds.carve),
            ("feeds.taxi", self.feeds.taxi),
        ] {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("{} is not a finite number", value),
                });
            }
        }

        if r.min_z >= r.max_z {
            return Err(ParameterError::Incompatible(format!(
                "relief.min_z ({}) must be smaller than relief.max_z ({})",
                r.min_z, r.max_z
            )));
        }

        for (name, value) in [("block.x", b.x), ("block.y", b.y)] {
            if value < MIN_BLOCK_DIMENSION {
                return Err(ParameterError::OutOfRange {
                    name: name.to_string(),
                    value,
                    min: MIN_BLOCK_DIMENSION,
                });
            }
        }

        if r.tool_radius <= 0.0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "relief.tool_radius must be positive, got {}",
                r.tool_radius
            )));
        }

        if r.carve_depth <= 0.0 {
            return Err(ParameterError::InvalidDimensions(format!(
                "relief.carve_depth must be positive, got {}",
                r.carve_depth
            )));
        }

        if r.slice_shave < 0.0 {
            return Err(ParameterError::InvalidValue {
                name: "relief.slice_shave".to_string(),
                reason: "must not be negative".to_string(),
            });
        }

        for (name, value) in [("feeds.carve", self.feeds.carve), ("feeds.taxi", self.feeds.taxi)] {
            if value <= 0.0 {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: "feed rate must be positive".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Non-fatal conditions worth reporting before carving.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.block.z < self.relief.max_z {
            warnings.push(format!(
                "highest relief ({}) is higher than the block ({})",
                self.relief.max_z, self.block.z
            ));
        }
        if self.block.z <= self.relief.min_z {
            warnings.push(format!(
                "block ({}) is not thicker than the deepest relief ({}), nothing to carve",
                self.block.z, self.relief.min_z
            ));
        }
        if self.block.taxi_z <= self.block.z {
            warnings.push(format!(
                "taxi height ({}) does not clear the block top ({})",
                self.block.taxi_z, self.block.z
            ));
        }
        warnings
    }
}
