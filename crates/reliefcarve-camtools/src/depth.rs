//! Intensity to depth mapping
//!
//! Rescales the heightmap's observed intensity range linearly onto the
//! configured relief range: the darkest pixel maps to the deepest relief,
//! the brightest to the shallowest.

use crate::heightmap::Heightmap;
use crate::slices::Slice;
use reliefcarve_core::ReliefSpec;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthMapper {
    relief_min_z: f64,
    relief_max_z: f64,
    min_intensity: u8,
    max_intensity: u8,
}

impl DepthMapper {
    pub fn new(relief: &ReliefSpec, min_intensity: u8, max_intensity: u8) -> Self {
        Self {
            relief_min_z: relief.min_z,
            relief_max_z: relief.max_z,
            min_intensity,
            max_intensity,
        }
    }

    /// Mapper using the global range of a heightmap.
    pub fn for_heightmap(relief: &ReliefSpec, map: &Heightmap) -> Self {
        if map.range() == 0 {
            warn!(
                "Heightmap is flat (all samples {}), carving a flat relief at {}",
                map.min(),
                relief.max_z
            );
        }
        Self::new(relief, map.min(), map.max())
    }

    /// Relief height for an intensity, before any pass clamping.
    ///
    /// A flat heightmap has no range to rescale; every sample then maps to
    /// the shallowest relief height.
    pub fn relief_z(&self, intensity: u8) -> f64 {
        let intensity_range = self.max_intensity.saturating_sub(self.min_intensity);
        if intensity_range == 0 {
            return self.relief_max_z;
        }
        let level = intensity.saturating_sub(self.min_intensity) as f64;
        let t = level / intensity_range as f64;
        // Two-sided form so both ends of the range are reproduced exactly.
        self.relief_min_z * (1.0 - t) + self.relief_max_z * t
    }

    /// Height to carve to during `slice`: never below the pass floor, raised
    /// by the pass shave.
    pub fn carve_z(&self, intensity: u8, slice: &Slice) -> f64 {
        self.relief_z(intensity).max(slice.floor) + slice.shave
    }
}
