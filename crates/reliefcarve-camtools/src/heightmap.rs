//! Heightmap source
//!
//! Holds one intensity channel of a decoded image as a read-only grid, with
//! the global minimum and maximum computed once at load time.

use crate::error::{CarveError, CarveResult};
use image::DynamicImage;
use reliefcarve_core::Channel;
use std::path::Path;
use tracing::info;

/// Immutable grid of intensity samples.
#[derive(Debug, Clone)]
pub struct Heightmap {
    width: u32,
    height: u32,
    samples: Vec<u8>,
    min: u8,
    max: u8,
}

impl Heightmap {
    /// Build a heightmap from row-major samples.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> CarveResult<Self> {
        if width == 0 || height == 0 {
            return Err(CarveError::ImageError(format!(
                "heightmap must have at least one pixel, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(CarveError::ImageError(format!(
                "expected {} samples for a {}x{} heightmap, got {}",
                expected,
                width,
                height,
                samples.len()
            )));
        }

        let (min, max) = samples
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));

        Ok(Self {
            width,
            height,
            samples,
            min,
            max,
        })
    }

    /// Load a heightmap from an image file
    pub fn from_file<P: AsRef<Path>>(path: P, channel: Channel) -> CarveResult<Self> {
        let path = path.as_ref();
        info!("Loading image... {}", path.display());
        let img = image::open(path)
            .map_err(|e| CarveError::LoadError(format!("{}: {}", path.display(), e)))?;
        let map = Self::from_image(&img, channel)?;
        info!("Loaded map with X: {} and Y: {}", map.width(), map.height());
        info!(
            "Range of {:?} channel: {}..{} ({} levels)",
            channel,
            map.min(),
            map.max(),
            map.range()
        );
        Ok(map)
    }

    /// Extract one channel of a decoded image
    pub fn from_image(img: &DynamicImage, channel: Channel) -> CarveResult<Self> {
        let (width, height) = (img.width(), img.height());
        let samples = match channel {
            Channel::Luma => img.to_luma8().into_raw(),
            Channel::Red | Channel::Green | Channel::Blue | Channel::Alpha => {
                let index = match channel {
                    Channel::Red => 0,
                    Channel::Green => 1,
                    Channel::Blue => 2,
                    _ => 3,
                };
                img.to_rgba8().pixels().map(|p| p.0[index]).collect()
            }
        };
        Self::from_samples(width, height, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Darkest sample in the whole map.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Brightest sample in the whole map.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Number of intensity levels between darkest and brightest sample.
    pub fn range(&self) -> u8 {
        self.max - self.min
    }

    /// Intensity at a pixel, or `None` outside the image.
    pub fn get(&self, x: i64, y: i64) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.samples[y as usize * self.width as usize + x as usize])
    }
}
