//! Plain-text grid files
//!
//! One matrix row per line. Cells are either separated by whitespace
//! (`0 1 1 0`, multi-digit intensities allowed) or written contiguously
//! (`.##.` or `0110`). `#` and `X` mark a placed tile, `.` an empty cell.
//! Blank lines and lines starting with `;` are ignored.

use std::path::Path;

use crate::io::configuration::REPORT_RULE_WIDTH;
use crate::io::error::{Result, WithPath, invalid_source};
use crate::matrix::grid::{BACKGROUND, BinaryMatrix, FOREGROUND};

const COMMENT_PREFIX: char = ';';

fn parse_symbol(symbol: &str, line_number: usize) -> Result<u32> {
    match symbol {
        "#" | "X" | "x" => Ok(FOREGROUND),
        "." => Ok(BACKGROUND),
        digits => digits.parse::<u32>().map_err(|e| {
            invalid_source(&format!(
                "line {line_number}: unrecognised cell '{digits}' ({e})"
            ))
        }),
    }
}

fn parse_line(line: &str, line_number: usize) -> Result<Vec<u32>> {
    if line.contains(char::is_whitespace) {
        line.split_whitespace()
            .map(|token| parse_symbol(token, line_number))
            .collect()
    } else {
        let mut buffer = [0u8; 4];
        line.chars()
            .map(|c| parse_symbol(c.encode_utf8(&mut buffer), line_number))
            .collect()
    }
}

/// Parse grid text into a matrix
///
/// # Errors
///
/// Returns an error if a cell cannot be parsed or rows differ in length
pub fn parse_grid(text: &str) -> Result<BinaryMatrix> {
    let mut rows = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        rows.push(parse_line(line, index + 1)?);
    }

    BinaryMatrix::from_rows(rows)
}

/// Read and parse a grid file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are invalid
pub fn load_grid(path: &Path) -> Result<BinaryMatrix> {
    let text = std::fs::read_to_string(path).with_path(path, "read grid")?;
    parse_grid(&text)
}

/// Render a matrix with a dimension header, one space-separated row per line
pub fn render_matrix(title: &str, matrix: &BinaryMatrix) -> String {
    let (rows, cols) = matrix.dimensions();
    format!("{title} ({rows}x{cols})\n{}\n{matrix}", "-".repeat(REPORT_RULE_WIDTH))
}
