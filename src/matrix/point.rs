//! Pixel coordinates in `(x, y)` form
//!
//! Matrices are indexed `(row, col)`; points use `x = col`, `y = row`.
//! Conversion goes through [`Point::from_cell`] and [`Point::cell`] only.

use std::fmt;

/// Pixel address with `x` as column and `y` as row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Column index
    pub x: usize,
    /// Row index
    pub y: usize,
}

impl Point {
    /// Create a point from column and row
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Convert a matrix `(row, col)` index
    pub const fn from_cell(row: usize, col: usize) -> Self {
        Self { x: col, y: row }
    }

    /// Matrix `(row, col)` index of this point
    pub const fn cell(self) -> (usize, usize) {
        (self.y, self.x)
    }

    /// Euclidean distance to another point
    pub fn distance_to(self, other: Self) -> f64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        dx.hypot(dy)
    }

    /// Euclidean distance to an arbitrary real-valued location
    pub fn distance_to_xy(self, x: f64, y: f64) -> f64 {
        (self.x as f64 - x).hypot(self.y as f64 - y)
    }
}

impl From<(usize, usize)> for Point {
    /// Interprets the tuple as `(x, y)`
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
