//! Composite structural features of a tile grid
//!
//! Pure aggregation over results that were already computed: branch point
//! lists, square and entity counts, and the skeleton itself (only its pixel
//! count is used). Distances here are measured to the grid centre, unlike the
//! pairwise distances of branch analysis.

use std::fmt;

use crate::io::configuration::{
    BRANCH_POINT_WEIGHT, DENSITY_SCALE, DENSITY_WEIGHT, REPORT_RULE_WIDTH, SQUARE_WEIGHT,
};
use crate::matrix::grid::BinaryMatrix;
use crate::matrix::point::Point;

/// Inputs of a grid feature calculation
#[derive(Debug, Clone, Copy, Default)]
pub struct GridFeatureInputs<'a> {
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Number of occupied squares
    pub square_count: usize,
    /// Number of entities placed on the grid
    pub entity_count: usize,
    /// Skeleton endpoints
    pub endpoints: &'a [Point],
    /// Skeleton bifurcations
    pub bifurcations: &'a [Point],
    /// Skeleton crossings
    pub crossings: &'a [Point],
    /// Skeleton matrix, if one was computed
    pub skeleton: Option<&'a BinaryMatrix>,
}

/// Structural metrics describing a grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridFeatures {
    /// Number of endpoints
    pub endpoint_count: usize,
    /// Number of bifurcations
    pub bifurcation_count: usize,
    /// Number of crossings
    pub crossing_count: usize,
    /// Endpoints + bifurcations + crossings
    pub total_branch_points: usize,
    /// Number of occupied squares
    pub total_square_count: usize,
    /// Number of entities
    pub total_entity_count: usize,
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Foreground pixels in the skeleton
    pub total_skeleton_pixels: usize,
    /// Branch points per 100 skeleton pixels
    pub branch_density: f64,
    /// Weighted branch type average (endpoint 1, bifurcation 2, crossing 3)
    pub branch_complexity: f64,
    /// Mean distance from endpoints to the grid centre
    pub average_endpoint_distance: f64,
    /// Mean distance from bifurcations to the grid centre
    pub average_bifurcation_distance: f64,
    /// `(branch points * 10 + squares * 2 + density * 5) / area`
    pub complexity_score: f64,
}

/// Mean distance from points to `(center_x, center_y)`; 0 for no points
pub fn average_distance_to_center(points: &[Point], center_x: f64, center_y: f64) -> f64 {
    if points.is_empty() {
        return 0.0;
    }
    let total: f64 = points
        .iter()
        .map(|p| p.distance_to_xy(center_x, center_y))
        .sum();
    total / points.len() as f64
}

/// Aggregate grid features from precomputed analysis results
pub fn calculate_grid_features(inputs: &GridFeatureInputs<'_>) -> GridFeatures {
    let endpoint_count = inputs.endpoints.len();
    let bifurcation_count = inputs.bifurcations.len();
    let crossing_count = inputs.crossings.len();
    let total_branch_points = endpoint_count + bifurcation_count + crossing_count;
    let total_skeleton_pixels = inputs.skeleton.map_or(0, BinaryMatrix::foreground_count);

    let (branch_density, branch_complexity) = if total_skeleton_pixels == 0 {
        (0.0, 0.0)
    } else {
        let density = total_branch_points as f64 * DENSITY_SCALE / total_skeleton_pixels as f64;
        let weighted = (crossing_count as f64).mul_add(
            3.0,
            (bifurcation_count as f64).mul_add(2.0, endpoint_count as f64),
        );
        let complexity = if total_branch_points > 0 {
            weighted / total_branch_points as f64
        } else {
            0.0
        };
        (density, complexity)
    };

    let center_x = inputs.width as f64 / 2.0;
    let center_y = inputs.height as f64 / 2.0;

    let area = inputs.width * inputs.height;
    let complexity_score = if area == 0 {
        0.0
    } else {
        branch_density.mul_add(
            DENSITY_WEIGHT,
            (inputs.square_count as f64)
                .mul_add(SQUARE_WEIGHT, total_branch_points as f64 * BRANCH_POINT_WEIGHT),
        ) / area as f64
    };

    GridFeatures {
        endpoint_count,
        bifurcation_count,
        crossing_count,
        total_branch_points,
        total_square_count: inputs.square_count,
        total_entity_count: inputs.entity_count,
        grid_width: inputs.width,
        grid_height: inputs.height,
        total_skeleton_pixels,
        branch_density,
        branch_complexity,
        average_endpoint_distance: average_distance_to_center(inputs.endpoints, center_x, center_y),
        average_bifurcation_distance: average_distance_to_center(
            inputs.bifurcations,
            center_x,
            center_y,
        ),
        complexity_score,
    }
}

impl fmt::Display for GridFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(REPORT_RULE_WIDTH);
        writeln!(f, "Grid Features Analysis")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Workspace Size: {} x {}", self.grid_width, self.grid_height)?;
        writeln!(f, "Total Squares: {}", self.total_square_count)?;
        writeln!(f, "Total Entities: {}", self.total_entity_count)?;
        writeln!(f)?;
        writeln!(f, "Branch Structure:")?;
        writeln!(f, "  Endpoints: {}", self.endpoint_count)?;
        writeln!(f, "  Bifurcations: {}", self.bifurcation_count)?;
        writeln!(f, "  Crossings: {}", self.crossing_count)?;
        writeln!(f, "  Total Branch Points: {}", self.total_branch_points)?;
        writeln!(f)?;
        writeln!(f, "Skeleton Properties:")?;
        writeln!(f, "  Total Skeleton Pixels: {}", self.total_skeleton_pixels)?;
        writeln!(
            f,
            "  Branch Density: {:.2} per 100 pixels",
            self.branch_density
        )?;
        writeln!(f, "  Branch Complexity: {:.3}", self.branch_complexity)?;
        writeln!(
            f,
            "  Avg Endpoint Distance: {:.2} pixels",
            self.average_endpoint_distance
        )?;
        writeln!(
            f,
            "  Avg Bifurcation Distance: {:.2} pixels",
            self.average_bifurcation_distance
        )?;
        writeln!(f)?;
        writeln!(f, "Complexity Score: {:.2}", self.complexity_score)?;
        write!(f, "{rule}")
    }
}
