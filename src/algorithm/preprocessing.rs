//! Noise reduction and binarization
//!
//! A median filter removes isolated speckles, then the intensities are reduced
//! to 0/1 with a fixed cut, Otsu's global threshold, or a per-pixel threshold
//! derived from the local window statistics.

use std::collections::BTreeMap;

use crate::io::configuration::{
    DEFAULT_FIXED_THRESHOLD, DEFAULT_LOCAL_WINDOW_SIZE, INTENSITY_SCALE, LOCAL_DYNAMIC_RANGE,
    NIBLACK_K, PHANSALKAR_K, PHANSALKAR_P, PHANSALKAR_Q, SAUVOLA_K,
};
use crate::io::error::{Result, invalid_parameter};
use crate::matrix::grid::{BACKGROUND, BinaryMatrix, FOREGROUND};

/// Binarized matrix together with the threshold that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtsuResult {
    /// Cells above the threshold set to 1, all others 0
    pub binarized: BinaryMatrix,
    /// Selected threshold (values `> threshold` are foreground)
    pub threshold: u32,
}

/// Per-pixel threshold formula for [`apply_local_threshold`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LocalThresholdMethod {
    /// `mean + k * std`
    #[default]
    Niblack,
    /// `mean * (1 + k * (std / R - 1))`
    Sauvola,
    /// Sauvola with an exponential boost for dark windows
    Phansalkar,
}

impl LocalThresholdMethod {
    /// Display name of the method
    pub const fn name(self) -> &'static str {
        match self {
            Self::Niblack => "Niblack",
            Self::Sauvola => "Sauvola",
            Self::Phansalkar => "Phansalkar",
        }
    }

    /// Sensitivity constant `k` of the formula
    pub const fn k(self) -> f64 {
        match self {
            Self::Niblack => NIBLACK_K,
            Self::Sauvola => SAUVOLA_K,
            Self::Phansalkar => PHANSALKAR_K,
        }
    }

    /// Threshold for a window with the given mean and standard deviation
    pub fn threshold(self, mean: f64, std_dev: f64) -> f64 {
        let k = self.k();
        match self {
            Self::Niblack => k.mul_add(std_dev, mean),
            Self::Sauvola => mean * k.mul_add(std_dev / LOCAL_DYNAMIC_RANGE - 1.0, 1.0),
            Self::Phansalkar => {
                let boost = PHANSALKAR_P * (-PHANSALKAR_Q * mean / INTENSITY_SCALE).exp();
                mean * k.mul_add(std_dev / LOCAL_DYNAMIC_RANGE - 1.0, 1.0 + boost)
            }
        }
    }
}

/// How preprocessing turns filtered intensities into a 0/1 matrix
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Binarization {
    /// Global threshold chosen by Otsu's method
    #[default]
    Otsu,
    /// Global threshold given up front
    Fixed {
        /// Values `> threshold` become foreground
        threshold: u32,
    },
    /// Threshold computed per pixel from its neighbourhood
    Local {
        /// Threshold formula
        method: LocalThresholdMethod,
        /// Odd side length of the neighbourhood window
        window_size: usize,
    },
}

impl Binarization {
    /// Fixed cut at the middle of the 8-bit intensity range
    pub const fn fixed() -> Self {
        Self::Fixed {
            threshold: DEFAULT_FIXED_THRESHOLD,
        }
    }

    /// Local method over the default window
    pub const fn local(method: LocalThresholdMethod) -> Self {
        Self::Local {
            method,
            window_size: DEFAULT_LOCAL_WINDOW_SIZE,
        }
    }

    /// Binarize `matrix` with this strategy
    ///
    /// # Errors
    ///
    /// Returns an error if a local window size is zero or even
    pub fn apply(self, matrix: &BinaryMatrix) -> Result<BinaryMatrix> {
        match self {
            Self::Otsu => Ok(apply_otsu_binarization(matrix).binarized),
            Self::Fixed { threshold } => Ok(apply_fixed_threshold(matrix, threshold)),
            Self::Local {
                method,
                window_size,
            } => apply_local_threshold(matrix, method, window_size),
        }
    }
}

fn validate_window(parameter: &'static str, size: usize) -> Result<()> {
    if size.is_multiple_of(2) {
        return Err(invalid_parameter(
            parameter,
            &size,
            &"must be a positive odd number",
        ));
    }
    Ok(())
}

// Rows and columns of the window centred on (row, col), clipped to the matrix
fn window_bounds(
    row: usize,
    col: usize,
    offset: usize,
    rows: usize,
    cols: usize,
) -> (std::ops::RangeInclusive<usize>, std::ops::RangeInclusive<usize>) {
    (
        row.saturating_sub(offset)..=row.saturating_add(offset).min(rows - 1),
        col.saturating_sub(offset)..=col.saturating_add(offset).min(cols - 1),
    )
}

/// Replace every cell by the median of its `kernel_size x kernel_size` window
///
/// Only cells inside the matrix contribute, so windows at the border are
/// smaller. When a window holds an even number of values the lower of the two
/// middle values is used.
///
/// # Errors
///
/// Returns an error if `kernel_size` is zero or even
pub fn apply_median_filter(matrix: &BinaryMatrix, kernel_size: usize) -> Result<BinaryMatrix> {
    validate_window("kernel_size", kernel_size)?;

    let (rows, cols) = matrix.dimensions();
    let offset = kernel_size / 2;
    let mut result = BinaryMatrix::zeros(rows, cols);
    // A clipped window never holds more than the matrix itself
    let mut window =
        Vec::with_capacity(kernel_size.min(rows).saturating_mul(kernel_size.min(cols)));

    for row in 0..rows {
        for col in 0..cols {
            let (row_range, col_range) = window_bounds(row, col, offset, rows, cols);

            window.clear();
            for r in row_range {
                for c in col_range.clone() {
                    if let Some(value) = matrix.get(r, c) {
                        window.push(value);
                    }
                }
            }

            window.sort_unstable();
            let median = window
                .get(window.len().saturating_sub(1) / 2)
                .copied()
                .unwrap_or(BACKGROUND);
            result.set(row, col, median);
        }
    }

    Ok(result)
}

/// Count of every distinct cell value, in ascending value order
///
/// Values that never occur have no entry, so a single large intensity costs
/// one entry rather than a bin for every smaller value.
pub fn histogram(matrix: &BinaryMatrix) -> BTreeMap<u32, usize> {
    let mut counts = BTreeMap::new();
    for &value in matrix.as_array() {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Threshold maximising the between-class variance of a histogram
///
/// Candidates are scanned in ascending order and the first strict maximum
/// wins. Absent values would repeat the variance of the value below them, so
/// skipping them selects the same threshold as a dense `[0, max]` scan.
/// Returns 0 when no candidate splits the pixels into two non-empty classes.
pub fn otsu_threshold(histogram: &BTreeMap<u32, usize>, total_pixels: usize) -> u32 {
    let sum: f64 = histogram
        .iter()
        .map(|(&value, &count)| f64::from(value) * count as f64)
        .sum();

    let mut sum_background = 0.0;
    let mut weight_background = 0usize;
    let mut max_variance = 0.0;
    let mut threshold = 0;

    for (&t, &count) in histogram {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }

        let weight_foreground = total_pixels.saturating_sub(weight_background);
        if weight_foreground == 0 {
            break;
        }

        sum_background = f64::from(t).mul_add(count as f64, sum_background);

        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum - sum_background) / weight_foreground as f64;

        let variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if variance > max_variance {
            max_variance = variance;
            threshold = t;
        }
    }

    threshold
}

/// Binarize a matrix with an automatically selected Otsu threshold
pub fn apply_otsu_binarization(matrix: &BinaryMatrix) -> OtsuResult {
    let counts = histogram(matrix);
    let total_pixels = matrix.rows() * matrix.cols();
    let threshold = otsu_threshold(&counts, total_pixels);

    log::debug!(
        "otsu threshold {threshold} over {} distinct values",
        counts.len()
    );

    OtsuResult {
        binarized: apply_fixed_threshold(matrix, threshold),
        threshold,
    }
}

/// Binarize with a known threshold: values `> threshold` become 1, all others 0
pub fn apply_fixed_threshold(matrix: &BinaryMatrix, threshold: u32) -> BinaryMatrix {
    BinaryMatrix::from_array(matrix.as_array().mapv(|value| {
        if value > threshold {
            FOREGROUND
        } else {
            BACKGROUND
        }
    }))
}

/// Binarize each cell against a threshold computed from its own window
///
/// The window is `window_size x window_size` clipped to the matrix. Its mean
/// and population standard deviation feed `method`, and the cell becomes 1
/// when its value is strictly greater than the result.
///
/// # Errors
///
/// Returns an error if `window_size` is zero or even
pub fn apply_local_threshold(
    matrix: &BinaryMatrix,
    method: LocalThresholdMethod,
    window_size: usize,
) -> Result<BinaryMatrix> {
    validate_window("window_size", window_size)?;

    let (rows, cols) = matrix.dimensions();
    let offset = window_size / 2;
    let mut result = BinaryMatrix::zeros(rows, cols);

    for row in 0..rows {
        for col in 0..cols {
            let (row_range, col_range) = window_bounds(row, col, offset, rows, cols);

            let mut sum = 0.0;
            let mut sum_squares = 0.0;
            let mut count = 0usize;
            for r in row_range {
                for c in col_range.clone() {
                    if let Some(value) = matrix.get(r, c) {
                        let value = f64::from(value);
                        sum += value;
                        sum_squares = value.mul_add(value, sum_squares);
                        count += 1;
                    }
                }
            }
            if count == 0 {
                continue;
            }

            let mean = sum / count as f64;
            let variance = mean.mul_add(-mean, sum_squares / count as f64);
            let threshold = method.threshold(mean, variance.max(0.0).sqrt());

            let value = matrix.get(row, col).map_or(0.0, f64::from);
            if value > threshold {
                result.set(row, col, FOREGROUND);
            }
        }
    }

    log::debug!(
        "{} local threshold over {window_size}x{window_size} windows",
        method.name()
    );

    Ok(result)
}

/// Median filter followed by Otsu binarization
///
/// # Errors
///
/// Returns an error if `kernel_size` is zero or even
pub fn preprocess(matrix: &BinaryMatrix, kernel_size: usize) -> Result<BinaryMatrix> {
    preprocess_with(matrix, kernel_size, Binarization::Otsu)
}

/// Median filter followed by the given binarization
///
/// # Errors
///
/// Returns an error if `kernel_size` or a local window size is zero or even
pub fn preprocess_with(
    matrix: &BinaryMatrix,
    kernel_size: usize,
    binarization: Binarization,
) -> Result<BinaryMatrix> {
    let filtered = apply_median_filter(matrix, kernel_size)?;
    binarization.apply(&filtered)
}
