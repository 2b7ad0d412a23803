//! Multi-pass slice scheduling
//!
//! The tool can only remove `carve_depth` of material per pass, so the relief
//! is cut in slices. Passes run from the highest floor down, the last one
//! reaching the deepest relief height. Every pass but the last may leave a
//! shave of extra material that the next pass removes.

use tracing::debug;

// Keeps an exact multiple like 1.25 / 0.125 from rounding up to an extra pass.
const SLICE_EPSILON: f64 = 1e-9;

/// One carving pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slice {
    /// Pass index, counting down to 0 for the final pass
    pub index: u32,
    /// Lowest Z this pass may cut to
    pub floor: f64,
    /// Extra height added on top of the computed depth
    pub shave: f64,
}

impl Slice {
    pub fn is_final(&self) -> bool {
        self.index == 0
    }

    /// Human readable label, numbered like the passes remaining.
    pub fn title(&self) -> String {
        format!("Slice {}", self.index + 1)
    }
}

/// Pass plan for one job.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceSchedule {
    relief_min_z: f64,
    carve_depth: f64,
    slice_shave: f64,
    count: u32,
}

impl SliceSchedule {
    pub fn new(block_z: f64, relief_min_z: f64, carve_depth: f64, slice_shave: f64) -> Self {
        let total_carve_amount = block_z - relief_min_z;
        let count = if total_carve_amount > 0.0 {
            (total_carve_amount / carve_depth - SLICE_EPSILON).ceil().max(0.0) as u32
        } else {
            0
        };
        debug!(count, total_carve_amount, "slice schedule");

        Self {
            relief_min_z,
            carve_depth,
            slice_shave,
            count,
        }
    }

    /// Number of passes required.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Pass with the given index.
    pub fn slice(&self, index: u32) -> Slice {
        Slice {
            index,
            floor: self.relief_min_z + index as f64 * self.carve_depth,
            shave: index as f64 * self.slice_shave,
        }
    }

    /// All passes in carving order, highest floor first.
    pub fn iter(&self) -> impl Iterator<Item = Slice> + '_ {
        (0..self.count).rev().map(|index| self.slice(index))
    }
}
