//! Terminal progress bar for carving passes.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reliefcarve_core::ProgressSink;

const BAR_TEMPLATE: &str = "{elapsed_precise} [{bar:40.cyan/blue}] {percent}% {pos}/{len} {msg}";

/// Draws one bar per pass on stderr, titled with the pass name.
pub struct BarProgress {
    bar: Option<ProgressBar>,
    visible: bool,
}

impl BarProgress {
    pub fn new() -> Self {
        Self {
            bar: None,
            visible: true,
        }
    }

    /// Tracks the bar state without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: None,
            visible: false,
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::with_template(BAR_TEMPLATE)
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BarProgress {
    fn begin(&mut self, title: &str, total: u64) {
        if let Some(previous) = self.bar.take() {
            previous.abandon();
        }

        let target = if self.visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(total), target);
        bar.set_style(Self::style());
        bar.set_message(title.to_string());
        self.bar = Some(bar);
    }

    fn increment(&mut self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    fn finish(&mut self) {
        if let Some(bar) = &self.bar {
            bar.finish();
        }
    }
}
