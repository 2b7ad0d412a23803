//! Modal motion stream writer
//!
//! Writes one command per line as letter-prefixed fields in the fixed order
//! X, Y, Z, F. A field is only written when its value differs from the last
//! value written for it in the current stream; a waypoint with no changed
//! field writes no line at all.

use std::io::{self, Write};

/// Default decimal places for coordinate fields.
pub const DEFAULT_PRECISION: usize = 4;

/// Physical target of a tool move, in machine coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub feed: Option<f64>,
}

impl Waypoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z,
            feed: None,
        }
    }

    pub fn with_feed(mut self, feed: f64) -> Self {
        self.feed = Some(feed);
        self
    }
}

/// Last value written for each field.
#[derive(Debug, Clone, Default, PartialEq)]
struct ModalState {
    x: Option<String>,
    y: Option<String>,
    z: Option<String>,
    feed: Option<String>,
}

/// Writes waypoints as a modal coordinate/feed stream.
pub struct MotionEmitter<W: Write> {
    writer: W,
    precision: usize,
    state: ModalState,
    lines_written: u64,
}

impl<W: Write> MotionEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            precision: DEFAULT_PRECISION,
            state: ModalState::default(),
            lines_written: 0,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    fn format_value(&self, value: f64) -> String {
        let formatted = format!("{:.*}", self.precision, value);
        // Avoid "-0.0000" for values that round to zero.
        match formatted.strip_prefix('-') {
            Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
            _ => formatted,
        }
    }

    /// Build the line for a waypoint and record its fields as written.
    ///
    /// Returns `None` when nothing changed since the previous waypoint.
    pub fn format_waypoint(&mut self, waypoint: &Waypoint) -> Option<String> {
        let x = self.format_value(waypoint.x);
        let y = self.format_value(waypoint.y);
        let z = self.format_value(waypoint.z);
        let feed = waypoint.feed.map(|f| self.format_value(f));

        let mut fields = Vec::with_capacity(4);
        for (letter, value, last) in [
            ('X', Some(x), &mut self.state.x),
            ('Y', Some(y), &mut self.state.y),
            ('Z', Some(z), &mut self.state.z),
            ('F', feed, &mut self.state.feed),
        ] {
            if let Some(value) = value {
                if last.as_deref() != Some(value.as_str()) {
                    fields.push(format!("{}{}", letter, value));
                    *last = Some(value);
                }
            }
        }

        if fields.is_empty() {
            None
        } else {
            Some(fields.join(" "))
        }
    }

    /// Write a waypoint. Returns whether a line was written.
    pub fn emit(&mut self, waypoint: &Waypoint) -> io::Result<bool> {
        match self.format_waypoint(waypoint) {
            Some(line) => {
                writeln!(self.writer, "{}", line)?;
                self.lines_written += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
