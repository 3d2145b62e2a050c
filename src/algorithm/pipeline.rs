//! End-to-end analysis of a single working matrix
//!
//! Runs the stages in order: optional preprocessing, fragmentation, thinning,
//! branch analysis and feature aggregation. Fragmentation and thinning both
//! read the working matrix; neither consumes the other's output.

use crate::algorithm::branches::{BranchAnalysis, analyze_branch_structure};
use crate::algorithm::features::{GridFeatureInputs, GridFeatures, calculate_grid_features};
use crate::algorithm::fragmentation::{
    Fragment, FragmentStatistics, calculate_statistics, detect_fragments,
};
use crate::algorithm::preprocessing::{Binarization, preprocess_with};
use crate::algorithm::skeletonization::{
    SkeletonMetrics, ThinningAlgorithm, ThinningResult, calculate_skeleton_metrics,
};
use crate::io::configuration::DEFAULT_MAX_ITERATIONS;
use crate::io::error::Result;
use crate::matrix::grid::BinaryMatrix;
use crate::matrix::source::MatrixSource;

/// Parameters of an analysis run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Median filter window; `None` skips preprocessing
    pub kernel_size: Option<usize>,
    /// Binarization applied after the median filter
    pub binarization: Binarization,
    /// Thinning algorithm
    pub algorithm: ThinningAlgorithm,
    /// Cap on thinning iterations
    pub max_iterations: usize,
    /// Number of entities on the grid, reported as-is
    pub entity_count: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            kernel_size: None,
            binarization: Binarization::Otsu,
            algorithm: ThinningAlgorithm::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            entity_count: 0,
        }
    }
}

/// Everything computed for one matrix
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Matrix the analysis ran on (after preprocessing, if enabled)
    pub working_matrix: BinaryMatrix,
    /// Algorithm used for thinning
    pub algorithm: ThinningAlgorithm,
    /// 8-connected components of the working matrix
    pub fragments: Vec<Fragment>,
    /// Size statistics of the fragments
    pub fragment_statistics: FragmentStatistics,
    /// Skeleton and iteration count
    pub thinning: ThinningResult,
    /// Pixel counts of the skeleton
    pub skeleton_metrics: SkeletonMetrics,
    /// Branch classification and statistics of the skeleton
    pub branches: BranchAnalysis,
    /// Composite grid features
    pub features: GridFeatures,
}

/// Analyze a matrix with the given configuration
///
/// # Errors
///
/// Returns an error if the kernel size or local window is even or zero, or the
/// iteration cap is zero
pub fn analyze(matrix: &BinaryMatrix, config: &AnalysisConfig) -> Result<AnalysisReport> {
    let working_matrix = match config.kernel_size {
        Some(kernel_size) => preprocess_with(matrix, kernel_size, config.binarization)?,
        None => matrix.clone(),
    };
    let (rows, cols) = working_matrix.dimensions();
    log::debug!("analyzing {cols}x{rows} matrix with {}", config.algorithm.name());

    let fragments = detect_fragments(&working_matrix);
    let fragment_statistics = calculate_statistics(&fragments);

    let thinning = config
        .algorithm
        .thin(&working_matrix, config.max_iterations)?;
    let skeleton_metrics = calculate_skeleton_metrics(&thinning.skeleton);
    let branches = analyze_branch_structure(&thinning.skeleton);

    let features = calculate_grid_features(&GridFeatureInputs {
        width: cols,
        height: rows,
        square_count: working_matrix.foreground_count(),
        entity_count: config.entity_count,
        endpoints: &branches.detection.endpoints,
        bifurcations: &branches.detection.bifurcations,
        crossings: &branches.detection.crossings,
        skeleton: Some(&thinning.skeleton),
    });

    log::debug!(
        "analysis finished: {} fragments, {} branch points, score {:.2}",
        fragments.len(),
        features.total_branch_points,
        features.complexity_score
    );

    Ok(AnalysisReport {
        working_matrix,
        algorithm: config.algorithm,
        fragments,
        fragment_statistics,
        thinning,
        skeleton_metrics,
        branches,
        features,
    })
}

/// Snapshot a matrix source and analyze it
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn analyze_source(
    source: &impl MatrixSource,
    config: &AnalysisConfig,
) -> Result<AnalysisReport> {
    analyze(&source.to_working_matrix(), config)
}
