//! Connected-component labelling with 8-connectivity
//!
//! Components are discovered in raster order and grown with an explicit-stack
//! flood fill, so arbitrarily large regions never deepen the call stack.

use bitvec::prelude::*;
use std::fmt;

use crate::matrix::grid::{BinaryMatrix, FOREGROUND, NEIGHBOR_OFFSETS};
use crate::matrix::point::Point;

/// One 8-connected foreground component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Sequential id in discovery order, starting at 1
    pub id: usize,
    /// Member pixels in flood-fill visiting order
    pub pixels: Vec<Point>,
    /// Smallest column of the bounding box
    pub min_x: usize,
    /// Largest column of the bounding box
    pub max_x: usize,
    /// Smallest row of the bounding box
    pub min_y: usize,
    /// Largest row of the bounding box
    pub max_y: usize,
}

impl Fragment {
    fn from_pixels(id: usize, pixels: Vec<Point>) -> Option<Self> {
        let min_x = pixels.iter().map(|p| p.x).min()?;
        let max_x = pixels.iter().map(|p| p.x).max()?;
        let min_y = pixels.iter().map(|p| p.y).min()?;
        let max_y = pixels.iter().map(|p| p.y).max()?;

        Some(Self {
            id,
            pixels,
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }

    /// Number of pixels in the fragment
    pub const fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Bounding box width
    pub const fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    /// Bounding box height
    pub const fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// Fragment pixels as a matrix cropped to the bounding box
    pub fn to_mask(&self) -> BinaryMatrix {
        let mut mask = BinaryMatrix::zeros(self.height(), self.width());
        for pixel in &self.pixels {
            mask.set(pixel.y - self.min_y, pixel.x - self.min_x, FOREGROUND);
        }
        mask
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fragment {}: {} pixels, BBox: ({},{})-({},{})",
            self.id,
            self.pixel_count(),
            self.min_x,
            self.min_y,
            self.max_x,
            self.max_y
        )
    }
}

/// Aggregate size statistics over a set of fragments
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FragmentStatistics {
    /// Number of fragments
    pub fragment_count: usize,
    /// Mean pixel count
    pub average_size: f64,
    /// Largest pixel count
    pub largest_size: usize,
    /// Smallest pixel count
    pub smallest_size: usize,
    /// Sum of all pixel counts
    pub total_pixels: usize,
}

/// Row-major visited mask for flood fills
struct VisitedMask {
    bits: BitVec,
    cols: usize,
}

impl VisitedMask {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            bits: bitvec![0; rows * cols],
            cols,
        }
    }

    fn is_visited(&self, row: usize, col: usize) -> bool {
        self.bits.get(row * self.cols + col).as_deref() == Some(&true)
    }

    fn mark(&mut self, row: usize, col: usize) {
        let index = row * self.cols + col;
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }
}

// Pixels reachable from the seed through foreground 8-neighbours
fn flood_fill(
    matrix: &BinaryMatrix,
    visited: &mut VisitedMask,
    seed_row: usize,
    seed_col: usize,
) -> Vec<Point> {
    let mut pixels = Vec::new();
    let mut stack = vec![(seed_row as isize, seed_col as isize)];

    while let Some((row, col)) = stack.pop() {
        if matrix.get_or_background(row, col) != FOREGROUND {
            continue;
        }
        let (r, c) = (row as usize, col as usize);
        if visited.is_visited(r, c) {
            continue;
        }

        visited.mark(r, c);
        pixels.push(Point::from_cell(r, c));

        for &(dr, dc) in &NEIGHBOR_OFFSETS {
            stack.push((row + dr, col + dc));
        }
    }

    pixels
}

// Calls `visit` once per component, in raster discovery order
fn for_each_component(matrix: &BinaryMatrix, mut visit: impl FnMut(Vec<Point>)) {
    let (rows, cols) = matrix.dimensions();
    let mut visited = VisitedMask::new(rows, cols);

    for (row, col) in matrix.foreground_cells() {
        if !visited.is_visited(row, col) {
            visit(flood_fill(matrix, &mut visited, row, col));
        }
    }
}

/// Find all 8-connected foreground components
pub fn detect_fragments(matrix: &BinaryMatrix) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for_each_component(matrix, |pixels| {
        if let Some(fragment) = Fragment::from_pixels(fragments.len() + 1, pixels) {
            fragments.push(fragment);
        }
    });

    log::debug!("detected {} fragments", fragments.len());
    fragments
}

/// Matrix where each foreground cell holds its fragment id and background stays 0
pub fn create_labeled_matrix(matrix: &BinaryMatrix) -> BinaryMatrix {
    let (rows, cols) = matrix.dimensions();
    let mut labeled = BinaryMatrix::zeros(rows, cols);
    let mut next_id = 1u32;

    for_each_component(matrix, |pixels| {
        for pixel in &pixels {
            let (row, col) = pixel.cell();
            labeled.set(row, col, next_id);
        }
        next_id += 1;
    });

    labeled
}

/// Size statistics over a fragment list; all zero when the list is empty
pub fn calculate_statistics(fragments: &[Fragment]) -> FragmentStatistics {
    let sizes = fragments.iter().map(Fragment::pixel_count);

    let (Some(largest_size), Some(smallest_size)) = (sizes.clone().max(), sizes.clone().min())
    else {
        return FragmentStatistics::default();
    };

    let total_pixels: usize = sizes.sum();

    FragmentStatistics {
        fragment_count: fragments.len(),
        average_size: total_pixels as f64 / fragments.len() as f64,
        largest_size,
        smallest_size,
        total_pixels,
    }
}
