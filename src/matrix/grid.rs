//! Fixed-size integer matrix used as the working image of every analysis
//!
//! Cells are addressed `(row, col)`. Foreground is the value 1, background is
//! 0; preprocessing additionally accepts arbitrary non-negative intensities.
//! Operations never resize a matrix: transforms produce a new matrix with the
//! same dimensions.

use ndarray::Array2;
use std::fmt;

use crate::io::error::{AnalysisError, Result};

/// Value marking a foreground cell
pub const FOREGROUND: u32 = 1;
/// Value marking a background cell
pub const BACKGROUND: u32 = 0;

/// Row/column offsets of the 8 neighbours, clockwise from north
///
/// The order is the P2..P9 sequence used by the thinning transition count.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Rectangular matrix of small non-negative integers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMatrix {
    cells: Array2<u32>,
}

impl BinaryMatrix {
    /// Create an all-background matrix
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::zeros((rows, cols)),
        }
    }

    /// Wrap an existing array
    pub const fn from_array(cells: Array2<u32>) -> Self {
        Self { cells }
    }

    /// Build a matrix from row vectors
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidSourceData`] if the rows differ in length
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(AnalysisError::InvalidSourceData {
                reason: format!(
                    "row {index} has {} cells, expected {width} (matrix must be rectangular)",
                    row.len()
                ),
            });
        }

        let flat: Vec<u32> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), flat).map_err(|e| {
            AnalysisError::InvalidSourceData {
                reason: e.to_string(),
            }
        })?;

        Ok(Self { cells })
    }

    /// Number of rows (matrix height)
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns (matrix width)
    pub fn cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Dimensions as `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// True when the matrix has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell value, or `None` outside the matrix
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get((row, col)).copied()
    }

    /// Cell value at signed coordinates; outside the matrix reads as background
    pub fn get_or_background(&self, row: isize, col: isize) -> u32 {
        if row < 0 || col < 0 {
            return BACKGROUND;
        }
        self.get(row as usize, col as usize).unwrap_or(BACKGROUND)
    }

    /// Overwrite a cell; writes outside the matrix are ignored
    pub fn set(&mut self, row: usize, col: usize, value: u32) {
        if let Some(cell) = self.cells.get_mut((row, col)) {
            *cell = value;
        }
    }

    /// True when the cell holds exactly the foreground value
    pub fn is_foreground(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Some(FOREGROUND)
    }

    /// Count of cells holding the foreground value
    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// Largest value in the matrix (0 for an empty matrix)
    pub fn max_value(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Number of foreground cells among the 8 neighbours
    ///
    /// Neighbours outside the matrix count as background.
    pub fn foreground_neighbors(&self, row: usize, col: usize) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dr, dc)| {
                self.get_or_background(row as isize + dr, col as isize + dc) == FOREGROUND
            })
            .count()
    }

    /// Coordinates of all foreground cells in raster order
    pub fn foreground_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|&(_, &v)| v == FOREGROUND)
            .map(|(index, _)| index)
    }

    /// Borrow the backing array
    pub const fn as_array(&self) -> &Array2<u32> {
        &self.cells
    }

    /// Consume the matrix, returning the backing array
    pub fn into_array(self) -> Array2<u32> {
        self.cells
    }
}

impl From<Array2<u32>> for BinaryMatrix {
    fn from(cells: Array2<u32>) -> Self {
        Self::from_array(cells)
    }
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line = row
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
