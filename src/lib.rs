//! # ReliefCarve
//!
//! Carves a 3D relief from a grayscale heightmap with a round-nosed tool.
//!
//! ## Architecture
//!
//! ReliefCarve is organized as a workspace with multiple crates:
//!
//! 1. **reliefcarve-core** - Carving parameters, validation, progress reporting
//! 2. **reliefcarve-camtools** - Heightmap sampling, pass scheduling, motion output
//! 3. **reliefcarve-settings** - JSON/TOML job files
//! 4. **reliefcarve** - Job runner and command-line binary

pub mod progress;

use anyhow::Context;
use std::fs::{self, File};
use std::io::{BufWriter, IsTerminal};
use std::path::Path;
use tracing::info;

pub use progress::BarProgress;
pub use reliefcarve_camtools::{CarveError, CarveSummary, ReliefCarver};
pub use reliefcarve_core::{CarveParameters, Channel, LogProgress, NoProgress, ProgressSink};
pub use reliefcarve_settings::{CarveConfig, OutputMode, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, leaving stdout free
/// - RUST_LOG environment variable support
/// - INFO as the default level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(())
}

fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Run a carving job with the given progress sink.
pub fn run_job_with_progress(
    config: &CarveConfig,
    progress: &mut dyn ProgressSink,
) -> anyhow::Result<CarveSummary> {
    config.validate()?;

    let carver = ReliefCarver::from_file(&config.image, config.channel, config.parameters.clone())
        .with_context(|| format!("Failed to prepare carving of {}", config.image.display()))?
        .with_precision(config.precision);

    let summary = match &config.output {
        OutputMode::Single { path } => {
            info!("Writing toolpath to {}", path.display());
            carver.generate(create_output(path)?, progress)?
        }
        OutputMode::PerPass { .. } if carver.schedule().count() == 0 => {
            // No material to remove: still write the rest and park moves.
            let path = config.output.pass_path(0);
            info!("Writing rest moves to {}", path.display());
            carver.generate(create_output(&path)?, progress)?
        }
        OutputMode::PerPass { .. } => {
            let mut total = CarveSummary::default();
            for slice in carver.schedule().iter() {
                let path = config.output.pass_path(slice.index);
                info!("Writing {} to {}", slice.title(), path.display());
                total += carver.generate_pass(&slice, create_output(&path)?, progress)?;
            }
            total
        }
    };

    info!(
        slices = summary.slices,
        streams = summary.streams,
        waypoints = summary.waypoints,
        lines = summary.lines_written,
        "job complete"
    );
    Ok(summary)
}

/// Run a carving job, drawing a progress bar on a terminal and logging
/// progress otherwise.
pub fn run_job(config: &CarveConfig) -> anyhow::Result<CarveSummary> {
    if std::io::stderr().is_terminal() {
        run_job_with_progress(config, &mut BarProgress::new())
    } else {
        run_job_with_progress(config, &mut LogProgress::new())
    }
}
