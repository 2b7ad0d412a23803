//! # ReliefCarve CAM Tools
//!
//! Converts a grayscale heightmap into the tool motions that carve it as a
//! relief into a rectangular block, using a round-nosed tool of finite
//! radius and a finite depth per pass.
//!
//! ## Pipeline
//!
//! - **Heightmap**: single-channel intensity grid with its global range
//! - **Scale**: pixels-per-unit mapping and centering between block and image
//! - **Footprint**: maximum intensity under the tool disk (grayscale dilation)
//! - **Slices**: pass count and the floor/shave of every pass
//! - **Raster**: grid sweep across the block with per-axis reversal
//! - **Depth**: intensity to physical Z, clamped to the current pass
//! - **Emitter**: modal coordinate/feed stream writer
//! - **Relief Carver**: drives all of the above, pass by pass

pub mod depth;
pub mod emitter;
pub mod error;
pub mod footprint;
pub mod heightmap;
pub mod raster;
pub mod relief_carver;
pub mod scale;
pub mod slices;

// Re-export commonly used items
pub use depth::DepthMapper;
pub use emitter::{MotionEmitter, Waypoint};
pub use error::{CarveError, CarveResult};
pub use footprint::{FootprintSampler, ToolFootprint};
pub use heightmap::Heightmap;
pub use reliefcarve_core::Channel;
pub use raster::{RasterPlan, RasterPoint};
pub use relief_carver::{CarveSummary, ReliefCarver};
pub use scale::ScaleContext;
pub use slices::{Slice, SliceSchedule};
