//! Structural analysis of binary tile grids
//!
//! A grid of placed tiles becomes a binary matrix, which is then cleaned
//! (median filter, then a global or local threshold), split into 8-connected
//! fragments, thinned to a skeleton (Zhang-Suen or K3M), and classified into
//! endpoints, bifurcations and crossings. The results aggregate into a single set of
//! grid features with a composite complexity score.

#![forbid(unsafe_code)]

/// Analysis components: preprocessing, fragmentation, thinning, branches, features
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Matrix, coordinate and matrix-source types
pub mod matrix;

pub use io::error::{AnalysisError, Result};
pub use matrix::{BinaryMatrix, MatrixSource, Point, TileGrid};
