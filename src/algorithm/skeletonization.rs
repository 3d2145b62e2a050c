//! Iterative thinning of foreground regions to one-pixel-wide skeletons
//!
//! Two algorithms are provided, Zhang-Suen and K3M. Both work in passes: a
//! full scan collects deletion candidates against the state at the start of
//! the pass, then all candidates are removed together. The outermost row and
//! column of the matrix are never examined or removed.
//!
//! Neither algorithm has a convergence proof for arbitrary input, so every
//! loop is bounded by a caller-supplied iteration cap.

use crate::io::error::{Result, invalid_parameter};
use crate::matrix::grid::{BACKGROUND, BinaryMatrix, FOREGROUND, NEIGHBOR_OFFSETS};

/// Skeleton together with the number of iterations that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThinningResult {
    /// Thinned matrix, same dimensions as the input
    pub skeleton: BinaryMatrix,
    /// Completed iterations, including the final pass that removed nothing
    pub iterations: usize,
    /// False when the iteration cap stopped the loop before a stable pass
    pub converged: bool,
}

/// Pixel counts describing a skeleton
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkeletonMetrics {
    /// Foreground pixels in the skeleton
    pub skeleton_pixels: usize,
    /// Pixels with exactly one neighbour
    pub endpoints: usize,
    /// Pixels with three or more neighbours
    pub junctions: usize,
    /// Reported branch count; equal to the junction count
    pub branches: usize,
}

/// Available thinning algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThinningAlgorithm {
    /// Two sub-pass parallel thinning
    #[default]
    ZhangSuen,
    /// Six-phase directional thinning
    K3m,
}

impl ThinningAlgorithm {
    /// Run the selected algorithm
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is zero
    pub fn thin(self, matrix: &BinaryMatrix, max_iterations: usize) -> Result<ThinningResult> {
        match self {
            Self::ZhangSuen => zhang_suen_with_iterations(matrix, max_iterations),
            Self::K3m => k3m_with_iterations(matrix, max_iterations),
        }
    }

    /// Human-readable algorithm name
    pub const fn name(self) -> &'static str {
        match self {
            Self::ZhangSuen => "Zhang-Suen",
            Self::K3m => "K3M",
        }
    }
}

/// The 8 neighbours of a pixel, P2..P9 clockwise from north
#[derive(Debug, Clone, Copy)]
struct Neighborhood {
    p: [u32; 8],
}

impl Neighborhood {
    fn of(matrix: &BinaryMatrix, row: usize, col: usize) -> Self {
        let mut p = [BACKGROUND; 8];
        for (slot, &(dr, dc)) in p.iter_mut().zip(NEIGHBOR_OFFSETS.iter()) {
            *slot = u32::from(
                matrix.get_or_background(row as isize + dr, col as isize + dc) == FOREGROUND,
            );
        }
        Self { p }
    }

    const fn north(&self) -> u32 {
        self.p[0]
    }

    const fn east(&self) -> u32 {
        self.p[2]
    }

    const fn south(&self) -> u32 {
        self.p[4]
    }

    const fn west(&self) -> u32 {
        self.p[6]
    }

    /// B(P1): number of foreground neighbours
    fn count(&self) -> u32 {
        self.p.iter().sum()
    }

    /// A(P1): number of 0→1 transitions walking P2..P9 and back to P2
    fn transitions(&self) -> usize {
        self.p
            .iter()
            .zip(self.p.iter().cycle().skip(1))
            .filter(|&(&current, &next)| current == 0 && next == 1)
            .count()
    }

    /// Removal keeps connectivity: 2 <= B <= 6 and A = 1
    fn is_simple_border(&self) -> bool {
        (2..=6).contains(&self.count()) && self.transitions() == 1
    }

    /// N·E·S = 0 and E·S·W = 0
    const fn south_east_corner_clear(&self) -> bool {
        self.north() * self.east() * self.south() == 0
            && self.east() * self.south() * self.west() == 0
    }

    /// N·E·W = 0 and N·S·W = 0
    const fn north_west_corner_clear(&self) -> bool {
        self.north() * self.east() * self.west() == 0
            && self.north() * self.south() * self.west() == 0
    }
}

#[derive(Debug, Clone, Copy)]
enum ZhangSuenStep {
    First,
    Second,
}

#[derive(Debug, Clone, Copy)]
enum K3mPhase {
    Border,
    North,
    East,
    South,
    West,
    Diagonal,
}

const K3M_PHASES: [K3mPhase; 6] = [
    K3mPhase::Border,
    K3mPhase::North,
    K3mPhase::East,
    K3mPhase::South,
    K3mPhase::West,
    K3mPhase::Diagonal,
];

fn zhang_suen_deletable(n: &Neighborhood, step: ZhangSuenStep) -> bool {
    if !n.is_simple_border() {
        return false;
    }
    match step {
        ZhangSuenStep::First => n.south_east_corner_clear(),
        ZhangSuenStep::Second => n.north_west_corner_clear(),
    }
}

fn k3m_deletable(n: &Neighborhood, phase: K3mPhase) -> bool {
    if !n.is_simple_border() {
        return false;
    }
    let (north, east, south, west) = (n.north(), n.east(), n.south(), n.west());
    match phase {
        // Single-neighbour pixels are already excluded by B >= 2
        K3mPhase::Border => n.count() != 1,
        K3mPhase::North => north == 0 && (east == 0 || south == 0 || west == 0),
        K3mPhase::East => east == 0 && (north == 0 || south == 0 || west == 0),
        K3mPhase::South => south == 0 && (north == 0 || east == 0 || west == 0),
        K3mPhase::West => west == 0 && (north == 0 || east == 0 || south == 0),
        K3mPhase::Diagonal => n.south_east_corner_clear(),
    }
}

// One parallel pass over the interior; returns true if any pixel was removed
fn thinning_pass(matrix: &mut BinaryMatrix, deletable: impl Fn(&Neighborhood) -> bool) -> bool {
    let (rows, cols) = matrix.dimensions();
    let mut candidates = Vec::new();

    for row in 1..rows.saturating_sub(1) {
        for col in 1..cols.saturating_sub(1) {
            if matrix.is_foreground(row, col) && deletable(&Neighborhood::of(matrix, row, col)) {
                candidates.push((row, col));
            }
        }
    }

    for &(row, col) in &candidates {
        matrix.set(row, col, BACKGROUND);
    }

    !candidates.is_empty()
}

fn validate_max_iterations(max_iterations: usize) -> Result<()> {
    if max_iterations == 0 {
        return Err(invalid_parameter(
            "max_iterations",
            &max_iterations,
            &"must be at least 1",
        ));
    }
    Ok(())
}

// Repeats `cycle` until it reports no change or the cap is reached
fn iterate_until_stable(
    algorithm: ThinningAlgorithm,
    matrix: &BinaryMatrix,
    max_iterations: usize,
    mut cycle: impl FnMut(&mut BinaryMatrix) -> bool,
) -> Result<ThinningResult> {
    validate_max_iterations(max_iterations)?;

    let mut skeleton = matrix.clone();
    let mut iterations = 0;
    let mut changed = true;

    while changed && iterations < max_iterations {
        changed = cycle(&mut skeleton);
        iterations += 1;
    }

    if changed {
        log::warn!(
            "{} thinning stopped at the iteration cap ({max_iterations}) before converging",
            algorithm.name()
        );
    } else {
        log::debug!("{} thinning converged after {iterations} iterations", algorithm.name());
    }

    Ok(ThinningResult {
        skeleton,
        iterations,
        converged: !changed,
    })
}

/// Zhang-Suen thinning with the iteration count
///
/// Each iteration runs two sub-passes; a pixel is removed when it has 2 to 6
/// neighbours, exactly one 0→1 transition around it, and the sub-pass corner
/// products vanish (`N·E·S`, `E·S·W` first, then `N·E·W`, `N·S·W`).
///
/// # Errors
///
/// Returns an error if `max_iterations` is zero
pub fn zhang_suen_with_iterations(
    matrix: &BinaryMatrix,
    max_iterations: usize,
) -> Result<ThinningResult> {
    iterate_until_stable(
        ThinningAlgorithm::ZhangSuen,
        matrix,
        max_iterations,
        |skeleton| {
            let first = thinning_pass(skeleton, |n| zhang_suen_deletable(n, ZhangSuenStep::First));
            let second =
                thinning_pass(skeleton, |n| zhang_suen_deletable(n, ZhangSuenStep::Second));
            first || second
        },
    )
}

/// Zhang-Suen skeleton without the iteration count
///
/// # Errors
///
/// Returns an error if `max_iterations` is zero
pub fn zhang_suen_thinning(matrix: &BinaryMatrix, max_iterations: usize) -> Result<BinaryMatrix> {
    zhang_suen_with_iterations(matrix, max_iterations).map(|result| result.skeleton)
}

/// K3M thinning with the iteration count
///
/// One cycle runs a border pass, four directional passes (north, east, south,
/// west) and a diagonal refinement pass.
///
/// # Errors
///
/// Returns an error if `max_iterations` is zero
pub fn k3m_with_iterations(matrix: &BinaryMatrix, max_iterations: usize) -> Result<ThinningResult> {
    iterate_until_stable(ThinningAlgorithm::K3m, matrix, max_iterations, |skeleton| {
        let mut changed = false;
        for phase in K3M_PHASES {
            changed |= thinning_pass(skeleton, |n| k3m_deletable(n, phase));
        }
        changed
    })
}

/// K3M skeleton without the iteration count
///
/// # Errors
///
/// Returns an error if `max_iterations` is zero
pub fn k3m_thinning(matrix: &BinaryMatrix, max_iterations: usize) -> Result<BinaryMatrix> {
    k3m_with_iterations(matrix, max_iterations).map(|result| result.skeleton)
}

/// Count skeleton pixels, endpoints and junctions
pub fn calculate_skeleton_metrics(skeleton: &BinaryMatrix) -> SkeletonMetrics {
    let mut metrics = SkeletonMetrics::default();

    for (row, col) in skeleton.foreground_cells() {
        metrics.skeleton_pixels += 1;
        match skeleton.foreground_neighbors(row, col) {
            1 => metrics.endpoints += 1,
            n if n >= 3 => metrics.junctions += 1,
            _ => {}
        }
    }

    metrics.branches = metrics.junctions;
    metrics
}
