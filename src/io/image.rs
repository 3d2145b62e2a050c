//! PNG export of matrices, fragment labels and annotated skeletons
//!
//! Each matrix cell becomes an [`EXPORT_CELL_SIZE`]-pixel square.

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::algorithm::branches::BranchDetection;
use crate::io::configuration::EXPORT_CELL_SIZE;
use crate::io::error::{AnalysisError, Result, WithPath, invalid_source};
use crate::matrix::grid::{BACKGROUND, BinaryMatrix, FOREGROUND};
use crate::matrix::point::Point;

const BACKGROUND_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
const FOREGROUND_COLOR: Rgba<u8> = Rgba([32, 32, 32, 255]);
const ENDPOINT_COLOR: Rgba<u8> = Rgba([220, 40, 40, 255]);
const BIFURCATION_COLOR: Rgba<u8> = Rgba([40, 90, 220, 255]);
const CROSSING_COLOR: Rgba<u8> = Rgba([230, 160, 20, 255]);

fn blank_canvas(matrix: &BinaryMatrix) -> Result<RgbaImage> {
    if matrix.is_empty() {
        return Err(invalid_source(&"cannot export an empty matrix"));
    }
    let width = matrix.cols() as u32 * EXPORT_CELL_SIZE;
    let height = matrix.rows() as u32 * EXPORT_CELL_SIZE;
    Ok(ImageBuffer::from_pixel(width, height, BACKGROUND_COLOR))
}

fn paint_cell(img: &mut RgbaImage, row: usize, col: usize, color: Rgba<u8>) {
    let x0 = col as u32 * EXPORT_CELL_SIZE;
    let y0 = row as u32 * EXPORT_CELL_SIZE;
    for y in y0..y0 + EXPORT_CELL_SIZE {
        for x in x0..x0 + EXPORT_CELL_SIZE {
            if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
                *pixel = color;
            }
        }
    }
}

// Deterministic, well-spread colour per fragment id (golden-ratio hue walk)
fn label_color(label: u32) -> Rgba<u8> {
    if label == BACKGROUND {
        return BACKGROUND_COLOR;
    }
    let hue = (f64::from(label) * 0.618_033_988_75).fract() * 6.0;
    let sector = hue.floor();
    let f = hue - sector;
    let (q, t) = ((1.0 - f) * 200.0, f * 200.0);
    let (r, g, b) = match sector as u32 {
        0 => (200.0, t, 0.0),
        1 => (q, 200.0, 0.0),
        2 => (0.0, 200.0, t),
        3 => (0.0, q, 200.0),
        4 => (t, 0.0, 200.0),
        _ => (200.0, 0.0, q),
    };
    Rgba([r as u8 + 30, g as u8 + 30, b as u8 + 30, 255])
}

fn save(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_path(parent, "create directory")?;
    }

    img.save(output_path)
        .map_err(|e| AnalysisError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}

/// Export a binary matrix: foreground dark, background white
///
/// # Errors
///
/// Returns an error if the matrix is empty or the image cannot be written
pub fn export_binary_png(matrix: &BinaryMatrix, output_path: &Path) -> Result<()> {
    let mut img = blank_canvas(matrix)?;
    for (row, col) in matrix.foreground_cells() {
        paint_cell(&mut img, row, col, FOREGROUND_COLOR);
    }
    save(&img, output_path)
}

/// Export a labeled matrix with one colour per fragment id
///
/// # Errors
///
/// Returns an error if the matrix is empty or the image cannot be written
pub fn export_labels_png(labeled: &BinaryMatrix, output_path: &Path) -> Result<()> {
    let mut img = blank_canvas(labeled)?;
    for ((row, col), &label) in labeled.as_array().indexed_iter() {
        if label != BACKGROUND {
            paint_cell(&mut img, row, col, label_color(label));
        }
    }
    save(&img, output_path)
}

/// Export a skeleton with endpoints, bifurcations and crossings highlighted
///
/// # Errors
///
/// Returns an error if the matrix is empty or the image cannot be written
pub fn export_skeleton_png(
    skeleton: &BinaryMatrix,
    detection: &BranchDetection,
    output_path: &Path,
) -> Result<()> {
    let mut img = blank_canvas(skeleton)?;
    for ((row, col), &value) in skeleton.as_array().indexed_iter() {
        if value == FOREGROUND {
            paint_cell(&mut img, row, col, FOREGROUND_COLOR);
        }
    }

    let highlights: [(&[Point], Rgba<u8>); 3] = [
        (detection.endpoints.as_slice(), ENDPOINT_COLOR),
        (detection.bifurcations.as_slice(), BIFURCATION_COLOR),
        (detection.crossings.as_slice(), CROSSING_COLOR),
    ];
    for (points, color) in highlights {
        for point in points {
            let (row, col) = point.cell();
            paint_cell(&mut img, row, col, color);
        }
    }

    save(&img, output_path)
}
