//! Crossing-number classification of skeleton pixels
//!
//! Every foreground pixel is classified by how many of its 8 neighbours are
//! foreground: 0 isolated, 1 endpoint, 2 regular, 3 bifurcation, 4 crossing,
//! 5 or more a complex junction.

use std::fmt;

use crate::io::configuration::DENSITY_SCALE;
use crate::io::error::{AnalysisError, Result};
use crate::matrix::grid::BinaryMatrix;
use crate::matrix::point::Point;

/// Topological role of a pixel in a skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchClass {
    /// Not a foreground pixel
    Background,
    /// Foreground pixel without foreground neighbours
    Isolated,
    /// End of a line (one neighbour)
    Endpoint,
    /// Interior of a line (two neighbours)
    Regular,
    /// Y-junction (three neighbours)
    Bifurcation,
    /// X-junction (four neighbours)
    Crossing,
    /// Five or more neighbours
    ComplexJunction,
}

impl BranchClass {
    /// Classification for a foreground pixel with `neighbors` foreground neighbours
    pub const fn from_neighbor_count(neighbors: usize) -> Self {
        match neighbors {
            0 => Self::Isolated,
            1 => Self::Endpoint,
            2 => Self::Regular,
            3 => Self::Bifurcation,
            4 => Self::Crossing,
            _ => Self::ComplexJunction,
        }
    }
}

impl fmt::Display for BranchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Background => "Background",
            Self::Isolated => "Isolated",
            Self::Endpoint => "Endpoint",
            Self::Regular => "Regular",
            Self::Bifurcation => "Bifurcation",
            Self::Crossing => "Crossing",
            Self::ComplexJunction => "ComplexJunction",
        };
        f.write_str(name)
    }
}

/// Classified pixel coordinates of a skeleton, each list in raster order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BranchDetection {
    /// Pixels with one neighbour
    pub endpoints: Vec<Point>,
    /// Pixels with three neighbours
    pub bifurcations: Vec<Point>,
    /// Pixels with four neighbours
    pub crossings: Vec<Point>,
    /// Pixels with two neighbours
    pub regular: Vec<Point>,
    /// Pixels with five or more neighbours
    pub complex_junctions: Vec<Point>,
}

impl BranchDetection {
    /// Number of endpoints
    pub const fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }

    /// Number of bifurcations
    pub const fn bifurcation_count(&self) -> usize {
        self.bifurcations.len()
    }

    /// Number of crossings
    pub const fn crossing_count(&self) -> usize {
        self.crossings.len()
    }

    /// Number of regular points
    pub const fn regular_count(&self) -> usize {
        self.regular.len()
    }

    /// Endpoints + bifurcations + crossings
    pub const fn total_branch_points(&self) -> usize {
        self.endpoint_count() + self.bifurcation_count() + self.crossing_count()
    }
}

/// Branch detection extended with structural statistics
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BranchAnalysis {
    /// Underlying classification
    pub detection: BranchDetection,
    /// Mean pairwise distance between endpoints (0 for fewer than 2)
    pub average_endpoint_distance: f64,
    /// Mean pairwise distance between bifurcations (0 for fewer than 2)
    pub average_bifurcation_distance: f64,
    /// Share of branch points that are bifurcations
    pub branch_complexity: f64,
    /// Branch points per 100 skeleton pixels
    pub branch_density: f64,
    /// Foreground pixels in the skeleton
    pub total_skeleton_pixels: usize,
}

impl BranchAnalysis {
    /// Endpoints + bifurcations + crossings
    pub const fn total_branch_points(&self) -> usize {
        self.detection.total_branch_points()
    }
}

/// Classify the pixel at column `x`, row `y`
///
/// # Errors
///
/// Returns [`AnalysisError::OutOfBounds`] if the coordinates lie outside the matrix
pub fn classify_point(matrix: &BinaryMatrix, x: usize, y: usize) -> Result<BranchClass> {
    let (height, width) = matrix.dimensions();
    if x >= width || y >= height {
        return Err(AnalysisError::OutOfBounds {
            x,
            y,
            width,
            height,
        });
    }

    if !matrix.is_foreground(y, x) {
        return Ok(BranchClass::Background);
    }

    Ok(BranchClass::from_neighbor_count(
        matrix.foreground_neighbors(y, x),
    ))
}

/// Classify every foreground pixel in raster order
pub fn detect_branches(matrix: &BinaryMatrix) -> BranchDetection {
    let mut detection = BranchDetection::default();

    for (row, col) in matrix.foreground_cells() {
        let point = Point::from_cell(row, col);
        let bucket = match BranchClass::from_neighbor_count(matrix.foreground_neighbors(row, col))
        {
            BranchClass::Endpoint => &mut detection.endpoints,
            BranchClass::Regular => &mut detection.regular,
            BranchClass::Bifurcation => &mut detection.bifurcations,
            BranchClass::Crossing => &mut detection.crossings,
            BranchClass::ComplexJunction => &mut detection.complex_junctions,
            BranchClass::Isolated | BranchClass::Background => continue,
        };
        bucket.push(point);
    }

    detection
}

/// Mean Euclidean distance over all unordered pairs; 0 for fewer than 2 points
pub fn average_pairwise_distance(points: &[Point]) -> f64 {
    let mut total = 0.0;
    let mut pairs = 0usize;

    for (i, &a) in points.iter().enumerate() {
        for &b in points.iter().skip(i + 1) {
            total += a.distance_to(b);
            pairs += 1;
        }
    }

    if pairs == 0 { 0.0 } else { total / pairs as f64 }
}

/// Classify the skeleton and derive distance, complexity and density figures
pub fn analyze_branch_structure(matrix: &BinaryMatrix) -> BranchAnalysis {
    let detection = detect_branches(matrix);
    let total_branch_points = detection.total_branch_points();
    let total_skeleton_pixels = matrix.foreground_count();

    let branch_complexity = if total_branch_points > 0 {
        detection.bifurcation_count() as f64 / total_branch_points as f64
    } else {
        0.0
    };

    let branch_density = if total_skeleton_pixels > 0 {
        total_branch_points as f64 * DENSITY_SCALE / total_skeleton_pixels as f64
    } else {
        0.0
    };

    BranchAnalysis {
        average_endpoint_distance: average_pairwise_distance(&detection.endpoints),
        average_bifurcation_distance: average_pairwise_distance(&detection.bifurcations),
        branch_complexity,
        branch_density,
        total_skeleton_pixels,
        detection,
    }
}
