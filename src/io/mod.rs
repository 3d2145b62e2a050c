//! Input/output operations and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types
pub mod error;
/// Plain-text grid file parsing and rendering
pub mod grid_file;
/// PNG export
pub mod image;
/// Batch progress display
pub mod progress;
/// Text reports
pub mod report;
