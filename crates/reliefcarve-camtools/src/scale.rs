//! Block-to-image coordinate mapping.
//!
//! The image is scaled uniformly so that it covers the whole block, binding
//! the scale to whichever axis the image is tighter on, and the used region
//! is centered inside the image.

use tracing::info;

/// Derived mapping between block space (length units) and image space (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleContext {
    /// Pixels per length unit
    pub aspect: f64,
    /// Pixels skipped on the left to center the block over the image
    pub offset_x: i64,
    /// Pixels skipped on the top to center the block over the image
    pub offset_y: i64,
    /// Block extent along X
    pub block_x: f64,
    /// Block extent along Y
    pub block_y: f64,
}

impl ScaleContext {
    pub fn new(block_x: f64, block_y: f64, image_width: u32, image_height: u32) -> Self {
        let image_x = image_width as f64;
        let image_y = image_height as f64;

        let block_aspect_ratio = block_x / block_y;
        let image_aspect_ratio = image_x / image_y;
        let aspect = if image_aspect_ratio < block_aspect_ratio {
            image_x / block_x
        } else {
            image_y / block_y
        };

        // Truncation toward zero; negative when the image is smaller than the block.
        let offset_x = ((image_x - block_x * aspect) / 2.0) as i64;
        let offset_y = ((image_y - block_y * aspect) / 2.0) as i64;

        Self {
            aspect,
            offset_x,
            offset_y,
            block_x,
            block_y,
        }
    }

    /// Log the derived mapping.
    pub fn log_summary(&self, image_width: u32, image_height: u32) {
        info!("Block Aspect Ratio: {}", self.block_x / self.block_y);
        info!(
            "Image Aspect Ratio: {}",
            image_width as f64 / image_height as f64
        );
        info!("Pixels per unit: {}", self.aspect);
        info!(
            "Pixels on block: {} {}",
            self.block_x * self.aspect,
            self.block_y * self.aspect
        );
        info!("Skipped Pixels: {} {}", self.offset_x, self.offset_y);
    }

    /// Pixel under a block-space point.
    pub fn to_pixel(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (self.offset_x as f64 + x * self.aspect) as i64,
            (self.offset_y as f64 + y * self.aspect) as i64,
        )
    }

    /// Mirror a block-space point across the block extent on the selected axes.
    pub fn flip(&self, x: f64, y: f64, flip_x: bool, flip_y: bool) -> (f64, f64) {
        (
            if flip_x { self.block_x - x } else { x },
            if flip_y { self.block_y - y } else { y },
        )
    }

    /// Convert a length to a whole number of pixels, rounding up.
    pub fn length_to_pixels(&self, length: f64) -> u32 {
        (length * self.aspect).ceil().max(0.0) as u32
    }

    /// Distance between raster samples: at least one pixel, or a quarter of
    /// the tool radius, whichever is larger.
    pub fn step_size(&self, tool_radius: f64) -> f64 {
        (1.0 / self.aspect).max(tool_radius / 4.0)
    }
}
