//! Tool footprint sampling
//!
//! A round tool at (x, y) is stopped by the highest point anywhere under its
//! disk, not only the point beneath its center. Sampling therefore takes the
//! maximum intensity over a disk of pixels around the center: a grayscale
//! dilation with a disk structuring element.

use crate::heightmap::Heightmap;
use crate::scale::ScaleContext;

/// Disk of pixels covered by the tool.
///
/// Stored as the half-width of the disk on each row, so memory grows with the
/// radius rather than with its square.
#[derive(Debug, Clone)]
pub struct ToolFootprint {
    radius: u32,
    /// Largest |dx| inside the disk for each |dy| in `0..radius`
    half_widths: Vec<u64>,
}

/// Largest `d` with `d * d < limit`. `limit` must be positive.
fn largest_root_below(limit: u64) -> u64 {
    let mut d = ((limit - 1) as f64).sqrt() as u64;
    while d.saturating_mul(d) >= limit {
        d -= 1;
    }
    while (d + 1).saturating_mul(d + 1) < limit {
        d += 1;
    }
    d
}

impl ToolFootprint {
    /// Build the disk for a tool of `radius` pixels.
    ///
    /// Offsets lying exactly on the boundary circle are excluded.
    pub fn new(radius: u32) -> Self {
        let r = radius as u64;
        let squared_radius = r * r;
        let half_widths = (0..r)
            .map(|dy| largest_root_below(squared_radius - dy * dy))
            .collect();
        Self {
            radius,
            half_widths,
        }
    }

    /// Radius whose disk reaches every pixel of a `width` x `height`
    /// image from any center on or inside the image border.
    pub fn covering_radius(width: u32, height: u32) -> u32 {
        let diagonal = (width as f64).hypot(height as f64).ceil();
        (diagonal as u32).saturating_add(2)
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    fn half_width(&self, dy: i64) -> Option<i64> {
        self.half_widths
            .get(dy.unsigned_abs() as usize)
            .map(|&w| w as i64)
    }

    /// Whether the offset (dx, dy) lies inside the disk.
    pub fn contains(&self, dx: i64, dy: i64) -> bool {
        self.half_width(dy).is_some_and(|w| dx.abs() <= w)
    }

    /// Number of pixel offsets in the disk.
    pub fn area(&self) -> u64 {
        self.half_widths
            .iter()
            .enumerate()
            .map(|(dy, &w)| if dy == 0 { 2 * w + 1 } else { 2 * (2 * w + 1) })
            .sum()
    }

    fn covers_image(&self, map: &Heightmap, cx: i64, cy: i64) -> bool {
        let right = map.width() as i64 - 1;
        let bottom = map.height() as i64 - 1;
        [(0, 0), (right, 0), (0, bottom), (right, bottom)]
            .iter()
            .all(|&(x, y)| self.contains(x - cx, y - cy))
    }

    /// Maximum intensity under the disk centered on pixel (cx, cy).
    ///
    /// Pixels outside the image are skipped. If none of the disk lies on the
    /// image, the global minimum is returned.
    pub fn max_height(&self, map: &Heightmap, cx: i64, cy: i64) -> u8 {
        if self.radius == 0 {
            return map.min();
        }
        if self.covers_image(map, cx, cy) {
            return map.max();
        }

        let reach = self.radius as i64 - 1;
        let top = (cy - reach).max(0);
        let bottom = (cy + reach).min(map.height() as i64 - 1);
        let mut highest = map.min();
        for y in top..=bottom {
            let Some(w) = self.half_width(y - cy) else {
                continue;
            };
            let left = (cx - w).max(0);
            let right = (cx + w).min(map.width() as i64 - 1);
            for x in left..=right {
                if let Some(value) = map.get(x, y) {
                    highest = highest.max(value);
                }
            }
        }
        highest
    }
}

/// Samples the heightmap under the tool at block-space positions.
#[derive(Debug, Clone)]
pub struct FootprintSampler<'a> {
    map: &'a Heightmap,
    scale: ScaleContext,
    footprint: ToolFootprint,
    flip_x: bool,
    flip_y: bool,
}

impl<'a> FootprintSampler<'a> {
    pub fn new(map: &'a Heightmap, scale: ScaleContext, tool_radius: f64) -> Self {
        let radius = scale
            .length_to_pixels(tool_radius)
            .min(ToolFootprint::covering_radius(map.width(), map.height()));
        Self::from_footprint(map, scale, ToolFootprint::new(radius))
    }

    /// Sampler reusing an already built footprint.
    pub fn from_footprint(
        map: &'a Heightmap,
        scale: ScaleContext,
        footprint: ToolFootprint,
    ) -> Self {
        Self {
            map,
            scale,
            footprint,
            flip_x: false,
            flip_y: false,
        }
    }

    /// Mirror the heightmap across the block on the selected axes.
    pub fn with_flip(mut self, flip_x: bool, flip_y: bool) -> Self {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
        self
    }

    pub fn footprint(&self) -> &ToolFootprint {
        &self.footprint
    }

    /// Highest intensity under the tool at block position (x, y).
    pub fn max_height(&self, x: f64, y: f64) -> u8 {
        let (x, y) = self.scale.flip(x, y, self.flip_x, self.flip_y);
        let (cx, cy) = self.scale.to_pixel(x, y);
        self.footprint.max_height(self.map, cx, cy)
    }
}
