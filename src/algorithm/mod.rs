//! Analysis components operating on working matrices

/// Crossing-number branch detection
pub mod branches;
/// 4-connected filled/empty region detection
pub mod canvas;
/// Composite grid feature aggregation
pub mod features;
/// 8-connected fragment labelling and statistics
pub mod fragmentation;
/// End-to-end analysis of one matrix
pub mod pipeline;
/// Median filter and fixed, Otsu or local binarization
pub mod preprocessing;
/// Zhang-Suen and K3M thinning
pub mod skeletonization;
