//! 4-connected regions of filled or empty cells
//!
//! Used to find the free areas of a grid (or the solid ones) where a region
//! may only grow through orthogonal neighbours.

use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt;

use bitvec::prelude::*;

use crate::matrix::grid::{BinaryMatrix, FOREGROUND};
use crate::matrix::point::Point;

/// A 4-connected region of cells sharing the same filled state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Sequential id in discovery order, starting at 1
    pub id: usize,
    /// Member cells in breadth-first order
    pub cells: Vec<Point>,
    /// True for a region of filled cells
    pub is_filled: bool,
}

impl Canvas {
    /// Number of cells in the region
    pub const fn area(&self) -> usize {
        self.cells.len()
    }

    /// Inclusive `(min_x, max_x, min_y, max_y)` of the cells, `None` when empty
    pub fn bounding_box(&self) -> Option<(usize, usize, usize, usize)> {
        let min_x = self.cells.iter().map(|p| p.x).min()?;
        let max_x = self.cells.iter().map(|p| p.x).max()?;
        let min_y = self.cells.iter().map(|p| p.y).min()?;
        let max_y = self.cells.iter().map(|p| p.y).max()?;
        Some((min_x, max_x, min_y, max_y))
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_filled { "Filled" } else { "Empty" };
        write!(f, "Canvas #{}: {} cells ({kind})", self.id, self.area())
    }
}

/// Totals over a set of canvases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasStatistics {
    /// Number of filled canvases
    pub filled_count: usize,
    /// Cells across all filled canvases
    pub filled_cells: usize,
    /// Number of empty canvases
    pub empty_count: usize,
    /// Cells across all empty canvases
    pub empty_cells: usize,
    /// `(id, area)` of the first canvas with the largest area
    pub largest: Option<(usize, usize)>,
    /// `(id, area)` of the first canvas with the smallest area
    pub smallest: Option<(usize, usize)>,
}

impl CanvasStatistics {
    /// Total number of canvases
    pub const fn canvas_count(&self) -> usize {
        self.filled_count + self.empty_count
    }
}

impl fmt::Display for CanvasStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.canvas_count() == 0 {
            return write!(f, "No canvases detected");
        }

        writeln!(f, "Total Canvases: {}", self.canvas_count())?;
        writeln!(
            f,
            "  Filled Regions: {} ({} cells)",
            self.filled_count, self.filled_cells
        )?;
        write!(
            f,
            "  Empty Regions: {} ({} cells)",
            self.empty_count, self.empty_cells
        )?;

        if let (Some((largest_id, largest)), Some((smallest_id, smallest))) =
            (self.largest, self.smallest)
        {
            write!(f, "\n\nLargest: Canvas #{largest_id} ({largest} cells)")?;
            write!(f, "\nSmallest: Canvas #{smallest_id} ({smallest} cells)")?;
        }
        Ok(())
    }
}

/// Filled/empty totals and the extreme canvases of a list
pub fn calculate_canvas_statistics(canvases: &[Canvas]) -> CanvasStatistics {
    let (filled, empty): (Vec<&Canvas>, Vec<&Canvas>) =
        canvases.iter().partition(|canvas| canvas.is_filled);

    CanvasStatistics {
        filled_count: filled.len(),
        filled_cells: filled.iter().map(|c| c.area()).sum(),
        empty_count: empty.len(),
        empty_cells: empty.iter().map(|c| c.area()).sum(),
        largest: canvases
            .iter()
            .min_by_key(|c| Reverse(c.area()))
            .map(|c| (c.id, c.area())),
        smallest: canvases
            .iter()
            .min_by_key(|c| c.area())
            .map(|c| (c.id, c.area())),
    }
}

const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Find every 4-connected region whose cells are filled (`filled = true`) or empty
pub fn detect_canvases(matrix: &BinaryMatrix, filled: bool) -> Vec<Canvas> {
    let (rows, cols) = matrix.dimensions();
    let mut visited = bitvec![0; rows * cols];
    let mut canvases = Vec::new();

    let matches = |row: usize, col: usize| (matrix.get(row, col) == Some(FOREGROUND)) == filled;

    for row in 0..rows {
        for col in 0..cols {
            let start = row * cols + col;
            if visited.get(start).as_deref() == Some(&true) || !matches(row, col) {
                continue;
            }

            let mut cells = Vec::new();
            let mut queue = VecDeque::from([(row, col)]);
            visited.set(start, true);

            while let Some((r, c)) = queue.pop_front() {
                cells.push(Point::from_cell(r, c));

                for &(dr, dc) in &ORTHOGONAL_OFFSETS {
                    let (nr, nc) = (r as isize + dr, c as isize + dc);
                    if nr < 0 || nc < 0 || nr as usize >= rows || nc as usize >= cols {
                        continue;
                    }
                    let (nr, nc) = (nr as usize, nc as usize);
                    let index = nr * cols + nc;
                    if visited.get(index).as_deref() == Some(&true) || !matches(nr, nc) {
                        continue;
                    }
                    visited.set(index, true);
                    queue.push_back((nr, nc));
                }
            }

            canvases.push(Canvas {
                id: canvases.len() + 1,
                cells,
                is_filled: filled,
            });
        }
    }

    canvases
}
