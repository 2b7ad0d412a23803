//! Progress reporting for long-running passes.
//!
//! A sink is purely observational: the generator tells it how many steps a
//! pass has and signals each completed step, but nothing the sink does can
//! alter the toolpath.

use tracing::info;

/// Receives coarse-grained progress for each carving pass.
pub trait ProgressSink {
    /// Start tracking a new pass with `total` steps.
    fn begin(&mut self, title: &str, total: u64);

    /// Record one completed step.
    fn increment(&mut self);

    /// Number of steps recorded since the last `begin`.
    fn position(&self) -> u64;

    /// Mark the current pass as complete.
    fn finish(&mut self);
}

/// Sink that discards every report.
#[derive(Debug, Default)]
pub struct NoProgress {
    position: u64,
}

impl ProgressSink for NoProgress {
    fn begin(&mut self, _title: &str, _total: u64) {
        self.position = 0;
    }

    fn increment(&mut self) {
        self.position += 1;
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn finish(&mut self) {}
}

/// Sink that logs a line at every 10% boundary.
#[derive(Debug, Default)]
pub struct LogProgress {
    title: String,
    total: u64,
    position: u64,
    last_decile: u64,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    fn percent(&self) -> u64 {
        if self.total == 0 {
            100
        } else {
            self.position * 100 / self.total
        }
    }
}

impl ProgressSink for LogProgress {
    fn begin(&mut self, title: &str, total: u64) {
        self.title = title.to_string();
        self.total = total;
        self.position = 0;
        self.last_decile = 0;
        info!(title = %self.title, total, "pass started");
    }

    fn increment(&mut self) {
        self.position += 1;
        let decile = self.percent() / 10;
        if decile > self.last_decile {
            self.last_decile = decile;
            info!(
                title = %self.title,
                "{}% ({}/{})",
                decile * 10,
                self.position,
                self.total
            );
        }
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn finish(&mut self) {
        info!(title = %self.title, steps = self.position, "pass finished");
    }
}
