//! Matrix value types shared by all analysis components
//!
//! This module contains:
//! - The working matrix and its neighbourhood helpers
//! - Pixel coordinates
//! - The boundary to the tile-editing layer that produces matrices

/// Working matrix storage and neighbourhood access
pub mod grid;
/// Pixel coordinate type
pub mod point;
/// Conversion from tile grids to working matrices
pub mod source;

pub use grid::BinaryMatrix;
pub use point::Point;
pub use source::{MatrixSource, TileGrid};
