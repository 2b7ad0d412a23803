//! Raster path planning
//!
//! Sweeps the block on a square grid: rows along Y, one row per X step.
//! Either axis can be swept from the far edge back towards the origin.

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterPoint {
    /// Row number in sweep order
    pub row: u32,
    /// Position within the row in sweep order
    pub column: u32,
    pub x: f64,
    pub y: f64,
}

/// Grid of sample positions for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterPlan {
    step: f64,
    steps_x: u32,
    steps_y: u32,
    reverse_x: bool,
    reverse_y: bool,
}

impl RasterPlan {
    pub fn new(block_x: f64, block_y: f64, step: f64) -> Self {
        Self {
            step,
            steps_x: (block_x / step).ceil() as u32,
            steps_y: (block_y / step).ceil() as u32,
            reverse_x: false,
            reverse_y: false,
        }
    }

    /// Sweep rows and/or columns from the far edge.
    pub fn with_reverse(mut self, reverse_x: bool, reverse_y: bool) -> Self {
        self.reverse_x = reverse_x;
        self.reverse_y = reverse_y;
        self
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn steps_x(&self) -> u32 {
        self.steps_x
    }

    pub fn steps_y(&self) -> u32 {
        self.steps_y
    }

    /// Number of grid positions in one pass.
    pub fn total_steps(&self) -> u64 {
        self.steps_x as u64 * self.steps_y as u64
    }

    fn coord(&self, index: u32, steps: u32, reverse: bool) -> f64 {
        let index = if reverse { steps - 1 - index } else { index };
        index as f64 * self.step
    }

    /// X position of the `row`-th row swept.
    pub fn x_at(&self, row: u32) -> f64 {
        self.coord(row, self.steps_x, self.reverse_x)
    }

    /// Y position of the `column`-th sample within a row.
    pub fn y_at(&self, column: u32) -> f64 {
        self.coord(column, self.steps_y, self.reverse_y)
    }

    /// Every grid position in sweep order, row by row.
    pub fn points(&self) -> impl Iterator<Item = RasterPoint> + '_ {
        (0..self.steps_x).flat_map(move |row| {
            let x = self.x_at(row);
            (0..self.steps_y).map(move |column| RasterPoint {
                row,
                column,
                x,
                y: self.y_at(column),
            })
        })
    }
}
