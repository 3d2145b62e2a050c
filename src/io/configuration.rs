//! Analysis constants and runtime configuration defaults

// Bound on thinning cycles; reaching it means the input did not converge
/// Default maximum number of thinning iterations
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Default median filter window (must be odd)
pub const DEFAULT_KERNEL_SIZE: usize = 3;

// Binarization
/// Fixed threshold at the middle of the 8-bit intensity range
pub const DEFAULT_FIXED_THRESHOLD: u32 = 128;
/// Default neighbourhood of local thresholding (must be odd)
pub const DEFAULT_LOCAL_WINDOW_SIZE: usize = 15;
/// Niblack sensitivity
pub const NIBLACK_K: f64 = -0.2;
/// Sauvola sensitivity
pub const SAUVOLA_K: f64 = 0.34;
/// Phansalkar sensitivity
pub const PHANSALKAR_K: f64 = 0.25;
/// Dynamic range of the standard deviation in Sauvola and Phansalkar
pub const LOCAL_DYNAMIC_RANGE: f64 = 128.0;
/// Phansalkar exponential boost amplitude
pub const PHANSALKAR_P: f64 = 2.0;
/// Phansalkar exponential boost decay
pub const PHANSALKAR_Q: f64 = 10.0;
/// Full-scale intensity the Phansalkar decay is normalised to
pub const INTENSITY_SCALE: f64 = 255.0;

// Weights of the composite complexity score
/// Weight of each branch point in the complexity score
pub const BRANCH_POINT_WEIGHT: f64 = 10.0;
/// Weight of each occupied square in the complexity score
pub const SQUARE_WEIGHT: f64 = 2.0;
/// Weight of branch density in the complexity score
pub const DENSITY_WEIGHT: f64 = 5.0;

/// Branch points are reported per this many skeleton pixels
pub const DENSITY_SCALE: f64 = 100.0;

// Report layout
/// Largest fragments listed individually in the fragmentation report
pub const MAX_LISTED_FRAGMENTS: usize = 10;
/// Width of section separators in text reports
pub const REPORT_RULE_WIDTH: usize = 42;

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Extension of grid files picked up from a directory
pub const GRID_FILE_EXTENSION: &str = "txt";
/// Suffix added to report filenames
pub const REPORT_SUFFIX: &str = "_report";
/// Suffix added to exported skeleton images
pub const SKELETON_SUFFIX: &str = "_skeleton";
/// Suffix added to exported fragment label images
pub const LABELS_SUFFIX: &str = "_labels";
/// Side length in pixels of one exported cell
pub const EXPORT_CELL_SIZE: u32 = 8;
