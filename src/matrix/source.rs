//! Boundary to the tile-editing layer
//!
//! The editor owns tiles, layers and undo history; analysis only needs an
//! occupancy snapshot. A cell converts to 1 when any layer holds a tile there
//! and to 0 when it is empty.

use bitvec::prelude::*;

use crate::io::error::{AnalysisError, Result, invalid_parameter};
use crate::matrix::grid::{BACKGROUND, BinaryMatrix, FOREGROUND};
use crate::matrix::point::Point;

/// Anything that can produce a working matrix for analysis
pub trait MatrixSource {
    /// Matrix dimensions as `(rows, columns)`
    fn matrix_dimensions(&self) -> (usize, usize);

    /// Snapshot of the occupancy as a `rows x columns` matrix (tile present = 1)
    fn to_working_matrix(&self) -> BinaryMatrix;
}

impl MatrixSource for BinaryMatrix {
    fn matrix_dimensions(&self) -> (usize, usize) {
        self.dimensions()
    }

    fn to_working_matrix(&self) -> BinaryMatrix {
        self.clone()
    }
}

/// Minimal layered occupancy grid standing in for an editor workspace
///
/// Each layer is a bitmask over `width * height` cells in row-major order.
#[derive(Debug, Clone)]
pub struct TileGrid {
    width: usize,
    height: usize,
    layers: Vec<BitVec>,
}

impl TileGrid {
    /// Create a grid with a single empty layer
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            layers: vec![bitvec![0; width * height]],
        }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of layers
    pub const fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Append an empty layer and return its index
    pub fn add_layer(&mut self) -> usize {
        self.layers.push(bitvec![0; self.width * self.height]);
        self.layers.len() - 1
    }

    /// Place a tile on a layer
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist or the position lies
    /// outside the grid
    pub fn place(&mut self, layer: usize, position: Point) -> Result<()> {
        self.write(layer, position, true)
    }

    /// Remove a tile from a layer
    ///
    /// # Errors
    ///
    /// Returns an error if the layer does not exist or the position lies
    /// outside the grid
    pub fn remove(&mut self, layer: usize, position: Point) -> Result<()> {
        self.write(layer, position, false)
    }

    /// True when any layer holds a tile at the position
    pub fn is_occupied(&self, position: Point) -> bool {
        self.index_of(position).is_some_and(|index| {
            self.layers
                .iter()
                .any(|layer| layer.get(index).as_deref() == Some(&true))
        })
    }

    /// Number of occupied cells across all layers (each cell counted once)
    pub fn occupied_count(&self) -> usize {
        (0..self.width * self.height)
            .filter(|&index| {
                self.layers
                    .iter()
                    .any(|layer| layer.get(index).as_deref() == Some(&true))
            })
            .count()
    }

    fn index_of(&self, position: Point) -> Option<usize> {
        (position.x < self.width && position.y < self.height)
            .then(|| position.y * self.width + position.x)
    }

    fn write(&mut self, layer: usize, position: Point, value: bool) -> Result<()> {
        let (width, height) = (self.width, self.height);
        let index = self
            .index_of(position)
            .ok_or(AnalysisError::OutOfBounds {
                x: position.x,
                y: position.y,
                width,
                height,
            })?;
        let layer_count = self.layers.len();
        let bits = self.layers.get_mut(layer).ok_or_else(|| {
            invalid_parameter("layer", &layer, &format!("grid has {layer_count} layers"))
        })?;
        bits.set(index, value);
        Ok(())
    }
}

impl MatrixSource for TileGrid {
    fn matrix_dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    fn to_working_matrix(&self) -> BinaryMatrix {
        let mut matrix = BinaryMatrix::zeros(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                let value = if self.is_occupied(Point::new(x, y)) {
                    FOREGROUND
                } else {
                    BACKGROUND
                };
                matrix.set(y, x, value);
            }
        }
        matrix
    }
}
