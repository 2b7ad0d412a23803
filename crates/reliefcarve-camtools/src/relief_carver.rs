//! Heightmap Relief Carving Tool
//!
//! Converts a heightmap into the tool motions that carve it as a relief.
//! Passes run from the highest slice floor down to the deepest relief
//! height. Within a pass the block is swept row by row; the tool retracts to
//! taxi height before every lateral jump between rows.
//!
//! Every output stream starts and ends at the machine origin at taxi height,
//! and parks the tool at Z 0 when finished.

use crate::depth::DepthMapper;
use crate::emitter::{MotionEmitter, Waypoint, DEFAULT_PRECISION};
use crate::error::CarveResult;
use crate::footprint::{FootprintSampler, ToolFootprint};
use crate::heightmap::Heightmap;
use crate::raster::RasterPlan;
use crate::scale::ScaleContext;
use crate::slices::{Slice, SliceSchedule};
use reliefcarve_core::{CarveParameters, Channel, NoProgress, ProgressSink};
use std::io::Write;
use std::ops::AddAssign;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counters describing generated output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarveSummary {
    /// Passes carved
    pub slices: u32,
    /// Grid positions sampled per pass
    pub steps_per_pass: u64,
    /// Waypoints produced, including transits
    pub waypoints: u64,
    /// Lines written after modal compression
    pub lines_written: u64,
    /// Output streams written
    pub streams: u32,
}

impl AddAssign for CarveSummary {
    fn add_assign(&mut self, other: Self) {
        self.slices += other.slices;
        self.steps_per_pass = self.steps_per_pass.max(other.steps_per_pass);
        self.waypoints += other.waypoints;
        self.lines_written += other.lines_written;
        self.streams += other.streams;
    }
}

/// Relief carving toolpath generator
pub struct ReliefCarver {
    heightmap: Heightmap,
    params: CarveParameters,
    scale: ScaleContext,
    footprint: ToolFootprint,
    depth: DepthMapper,
    schedule: SliceSchedule,
    plan: RasterPlan,
    precision: usize,
}

impl ReliefCarver {
    /// Create a new carver from an image file
    pub fn from_file<P: AsRef<Path>>(
        path: P,
        channel: Channel,
        params: CarveParameters,
    ) -> CarveResult<Self> {
        // Fail on bad parameters before touching the image.
        params.validate()?;
        let heightmap = Heightmap::from_file(path, channel)?;
        Self::new(heightmap, params)
    }

    /// Create a new carver from a loaded heightmap
    pub fn new(heightmap: Heightmap, params: CarveParameters) -> CarveResult<Self> {
        params.validate()?;
        for warning in params.warnings() {
            warn!("Warning - {}", warning);
        }

        let block = &params.block;
        let relief = &params.relief;

        let scale = ScaleContext::new(block.x, block.y, heightmap.width(), heightmap.height());
        scale.log_summary(heightmap.width(), heightmap.height());

        let covering = ToolFootprint::covering_radius(heightmap.width(), heightmap.height());
        let tool_pixels = scale.length_to_pixels(relief.tool_radius);
        if tool_pixels > covering {
            debug!(tool_pixels, covering, "tool covers the whole image");
        }
        let footprint = ToolFootprint::new(tool_pixels.min(covering));
        info!("Tool radius in pixels: {}", footprint.radius());

        let step = scale.step_size(relief.tool_radius);
        info!("Using a carver step size of: {} units.", step);
        let plan = RasterPlan::new(block.x, block.y, step)
            .with_reverse(params.scan.reverse_x, params.scan.reverse_y);

        let schedule =
            SliceSchedule::new(block.z, relief.min_z, relief.carve_depth, relief.slice_shave);
        info!("Slices: {}", schedule.count());
        for slice in schedule.iter() {
            debug!(
                index = slice.index,
                floor = slice.floor,
                shave = slice.shave,
                "scheduled slice"
            );
        }

        let depth = DepthMapper::for_heightmap(relief, &heightmap);

        Ok(Self {
            heightmap,
            params,
            scale,
            footprint,
            depth,
            schedule,
            plan,
            precision: DEFAULT_PRECISION,
        })
    }

    /// Decimal places written per field.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn params(&self) -> &CarveParameters {
        &self.params
    }

    pub fn scale(&self) -> &ScaleContext {
        &self.scale
    }

    pub fn schedule(&self) -> &SliceSchedule {
        &self.schedule
    }

    pub fn plan(&self) -> &RasterPlan {
        &self.plan
    }

    /// Sampler over this carver's heightmap, honoring the flip settings.
    pub fn sampler(&self) -> FootprintSampler<'_> {
        FootprintSampler::from_footprint(&self.heightmap, self.scale, self.footprint.clone())
            .with_flip(self.params.scan.flip_x, self.params.scan.flip_y)
    }

    /// Waypoint at block position (x, y), shifted onto the machine.
    fn waypoint(&self, x: f64, y: f64, z: f64, feed: f64) -> Waypoint {
        Waypoint::new(x + self.params.block.offset_x, y + self.params.block.offset_y, z)
            .with_feed(feed)
    }

    fn taxi(&self, x: f64, y: f64) -> Waypoint {
        self.waypoint(x, y, self.params.block.taxi_z, self.params.feeds.taxi)
    }

    /// Machine origin at taxi height.
    pub fn rest_waypoint(&self) -> Waypoint {
        Waypoint::new(0.0, 0.0, self.params.block.taxi_z).with_feed(self.params.feeds.taxi)
    }

    /// Moves that return the tool to the origin and lower it to Z 0.
    pub fn park_waypoints(&self) -> [Waypoint; 2] {
        [
            self.rest_waypoint(),
            Waypoint::new(0.0, 0.0, 0.0).with_feed(self.params.feeds.taxi),
        ]
    }

    /// Produce every waypoint of one pass, in order.
    ///
    /// Each row is entered and left at taxi height directly above its first
    /// and last carved points.
    pub fn carve_pass<F>(&self, slice: &Slice, progress: &mut dyn ProgressSink, mut sink: F)
    where
        F: FnMut(Waypoint),
    {
        let sampler = self.sampler();
        let total_steps = self.plan.total_steps();
        let carve_feed = self.params.feeds.carve;

        progress.begin(&slice.title(), total_steps);

        for row in 0..self.plan.steps_x() {
            let x = self.plan.x_at(row);
            let mut y = self.plan.y_at(0);
            sink(self.taxi(x, y));

            for column in 0..self.plan.steps_y() {
                y = self.plan.y_at(column);
                let intensity = sampler.max_height(x, y);
                let z = self.depth.carve_z(intensity, slice);
                sink(self.waypoint(x, y, z, carve_feed));

                if progress.position() < total_steps.saturating_sub(1) {
                    progress.increment();
                }
            }

            sink(self.taxi(x, y));
        }

        progress.finish();
    }

    /// Collect the waypoints of one pass.
    pub fn pass_waypoints(&self, slice: &Slice) -> Vec<Waypoint> {
        let mut waypoints = Vec::new();
        self.carve_pass(slice, &mut NoProgress::default(), |wp| waypoints.push(wp));
        waypoints
    }

    fn write_passes<W, I>(
        &self,
        writer: W,
        slices: I,
        progress: &mut dyn ProgressSink,
    ) -> CarveResult<CarveSummary>
    where
        W: Write,
        I: IntoIterator<Item = Slice>,
    {
        let mut emitter = MotionEmitter::new(writer).with_precision(self.precision);
        let mut summary = CarveSummary {
            steps_per_pass: self.plan.total_steps(),
            streams: 1,
            ..CarveSummary::default()
        };

        emitter.emit(&self.rest_waypoint())?;
        summary.waypoints += 1;

        for slice in slices {
            let mut result: std::io::Result<()> = Ok(());
            self.carve_pass(&slice, progress, |wp| {
                summary.waypoints += 1;
                if result.is_ok() {
                    result = emitter.emit(&wp).map(|_| ());
                }
            });
            result?;
            summary.slices += 1;
        }

        info!("Moving back to origin...");
        for wp in self.park_waypoints() {
            emitter.emit(&wp)?;
            summary.waypoints += 1;
        }
        emitter.flush()?;

        summary.lines_written = emitter.lines_written();
        Ok(summary)
    }

    /// Write all passes as one stream.
    pub fn generate<W: Write>(
        &self,
        writer: W,
        progress: &mut dyn ProgressSink,
    ) -> CarveResult<CarveSummary> {
        let summary = self.write_passes(writer, self.schedule.iter(), progress)?;
        info!(
            slices = summary.slices,
            waypoints = summary.waypoints,
            lines = summary.lines_written,
            "relief toolpath complete"
        );
        Ok(summary)
    }

    /// Write a single pass as its own stream.
    pub fn generate_pass<W: Write>(
        &self,
        slice: &Slice,
        writer: W,
        progress: &mut dyn ProgressSink,
    ) -> CarveResult<CarveSummary> {
        let summary = self.write_passes(writer, [*slice], progress)?;
        debug!(
            index = slice.index,
            lines = summary.lines_written,
            "pass stream complete"
        );
        Ok(summary)
    }

    /// Generate the complete toolpath as a string
    pub fn generate_gcode(&self) -> CarveResult<String> {
        let mut buffer = Vec::new();
        self.generate(&mut buffer, &mut NoProgress::default())?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
