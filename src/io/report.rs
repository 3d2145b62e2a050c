//! Human-readable text reports for analysis results
//!
//! The layout is for people, not parsers; nothing reads these back.

use std::fmt::Write;

use crate::algorithm::branches::BranchAnalysis;
use crate::algorithm::fragmentation::{Fragment, FragmentStatistics};
use crate::algorithm::pipeline::AnalysisReport;
use crate::algorithm::skeletonization::{SkeletonMetrics, ThinningAlgorithm, ThinningResult};
use crate::io::configuration::{MAX_LISTED_FRAGMENTS, REPORT_RULE_WIDTH};

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(REPORT_RULE_WIDTH));
}

fn subheading(out: &mut String, title: &str) {
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(REPORT_RULE_WIDTH));
}

/// Summary of fragments, largest first, capped at [`MAX_LISTED_FRAGMENTS`] entries
pub fn fragmentation_report(fragments: &[Fragment], statistics: &FragmentStatistics) -> String {
    let mut out = String::new();
    heading(&mut out, "Fragmentation Analysis");
    let _ = writeln!(out, "Total Fragments: {}", statistics.fragment_count);

    if fragments.is_empty() {
        let _ = writeln!(out, "No fragments detected (grid is empty)");
        return out;
    }

    let _ = writeln!(out, "Total Pixels: {}", statistics.total_pixels);
    let _ = writeln!(
        out,
        "Average Fragment Size: {:.2} pixels",
        statistics.average_size
    );
    let _ = writeln!(out, "Largest Fragment: {} pixels", statistics.largest_size);
    let _ = writeln!(out, "Smallest Fragment: {} pixels", statistics.smallest_size);
    let _ = writeln!(out);
    subheading(&mut out, "Fragment Details:");

    let mut by_size: Vec<&Fragment> = fragments.iter().collect();
    // Stable sort keeps discovery order among equal sizes
    by_size.sort_by(|a, b| b.pixel_count().cmp(&a.pixel_count()));

    for fragment in by_size.iter().take(MAX_LISTED_FRAGMENTS) {
        let _ = writeln!(
            out,
            "{fragment}, Size: {}x{}",
            fragment.width(),
            fragment.height()
        );
    }

    if fragments.len() > MAX_LISTED_FRAGMENTS {
        let _ = writeln!(
            out,
            "... and {} more fragments",
            fragments.len() - MAX_LISTED_FRAGMENTS
        );
    }

    out
}

/// Summary of a thinning run and its skeleton metrics
pub fn skeleton_report(
    algorithm: ThinningAlgorithm,
    thinning: &ThinningResult,
    metrics: &SkeletonMetrics,
) -> String {
    let mut out = String::new();
    heading(&mut out, &format!("{} Skeletonization", algorithm.name()));

    if thinning.converged {
        let _ = writeln!(
            out,
            "Algorithm converged in {} iterations",
            thinning.iterations
        );
    } else {
        let _ = writeln!(
            out,
            "Algorithm stopped at the iteration cap ({} iterations) without converging",
            thinning.iterations
        );
    }

    let _ = writeln!(out);
    subheading(&mut out, "Skeleton Metrics:");
    let _ = writeln!(out, "Skeleton Pixels: {}", metrics.skeleton_pixels);
    let _ = writeln!(out, "Endpoints: {}", metrics.endpoints);
    let _ = writeln!(out, "Junctions: {}", metrics.junctions);
    let _ = writeln!(out, "Branches: {}", metrics.branches);
    out
}

/// Branch classification counts and structural statistics
pub fn branch_report(analysis: &BranchAnalysis) -> String {
    let detection = &analysis.detection;
    let mut out = String::new();
    heading(&mut out, "Branch Detection Analysis");
    subheading(&mut out, "Branch Point Classification:");
    let _ = writeln!(out, "Endpoints:     {:>6}", detection.endpoint_count());
    let _ = writeln!(out, "Bifurcations:  {:>6}", detection.bifurcation_count());
    let _ = writeln!(out, "Crossings:     {:>6}", detection.crossing_count());
    let _ = writeln!(
        out,
        "Total Branch Points: {:>6}",
        detection.total_branch_points()
    );
    let _ = writeln!(out);
    subheading(&mut out, "Structural Metrics:");
    let _ = writeln!(
        out,
        "Avg Endpoint Distance:     {:.2}",
        analysis.average_endpoint_distance
    );
    let _ = writeln!(
        out,
        "Avg Bifurcation Distance:  {:.2}",
        analysis.average_bifurcation_distance
    );
    let _ = writeln!(
        out,
        "Branch Complexity:         {:.3}",
        analysis.branch_complexity
    );
    let _ = writeln!(
        out,
        "Branch Density:            {:.2} per 100 pixels",
        analysis.branch_density
    );
    let _ = writeln!(
        out,
        "Skeleton Pixels:           {}",
        analysis.total_skeleton_pixels
    );
    out
}

/// All sections of an analysis run, separated by blank lines
pub fn full_report(report: &AnalysisReport) -> String {
    [
        fragmentation_report(&report.fragments, &report.fragment_statistics),
        skeleton_report(
            report.algorithm,
            &report.thinning,
            &report.skeleton_metrics,
        ),
        branch_report(&report.branches),
        format!("{}\n", report.features),
    ]
    .join("\n")
}
