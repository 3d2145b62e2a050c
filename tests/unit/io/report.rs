//! Tests for text report formatting

#[cfg(test)]
mod tests {
    use tilemorph::algorithm::branches::analyze_branch_structure;
    use tilemorph::algorithm::fragmentation::{calculate_statistics, detect_fragments};
    use tilemorph::algorithm::pipeline::{AnalysisConfig, analyze};
    use tilemorph::algorithm::skeletonization::{
        ThinningAlgorithm, ThinningResult, calculate_skeleton_metrics,
    };
    use tilemorph::io::configuration::MAX_LISTED_FRAGMENTS;
    use tilemorph::io::grid_file::parse_grid;
    use tilemorph::io::report::{
        branch_report, fragmentation_report, full_report, skeleton_report,
    };
    use tilemorph::matrix::grid::BinaryMatrix;

    const PLUS: &str = ".......\n...#...\n...#...\n.#####.\n...#...\n...#...\n.......";

    #[test]
    fn test_fragmentation_report_empty() {
        let text = fragmentation_report(&[], &calculate_statistics(&[]));
        assert!(text.contains("Total Fragments: 0"));
        assert!(text.contains("No fragments detected (grid is empty)"));
    }

    // Tests fragments are listed largest first
    // Verified by sorting fragments in ascending size
    #[test]
    fn test_fragmentation_report_largest_first() {
        let fragments = detect_fragments(&parse_grid("#..##\n...##").unwrap());
        let text = fragmentation_report(&fragments, &calculate_statistics(&fragments));

        let large = text.find("Fragment 2: 4 pixels").unwrap();
        let small = text.find("Fragment 1: 1 pixels").unwrap();
        assert!(large < small);
        assert!(text.contains("Fragment 2: 4 pixels, BBox: (3,0)-(4,1), Size: 2x2"));
        assert!(text.contains("Average Fragment Size: 2.50 pixels"));
    }

    // Tests the listing is capped and the remainder summarised
    // Verified by removing the listing cap
    #[test]
    fn test_fragmentation_report_truncated() {
        let mut matrix = BinaryMatrix::zeros(1, 2 * (MAX_LISTED_FRAGMENTS + 2));
        for col in (0..matrix.cols()).step_by(2) {
            matrix.set(0, col, 1);
        }
        let fragments = detect_fragments(&matrix);
        assert_eq!(fragments.len(), MAX_LISTED_FRAGMENTS + 2);

        let text = fragmentation_report(&fragments, &calculate_statistics(&fragments));
        let listed = text
            .lines()
            .filter(|line| line.contains(" pixels, BBox: "))
            .count();
        assert_eq!(listed, MAX_LISTED_FRAGMENTS);
        assert!(text.contains("... and 2 more fragments"));
    }

    #[test]
    fn test_skeleton_report_convergence() {
        let skeleton = parse_grid(PLUS).unwrap();
        let metrics = calculate_skeleton_metrics(&skeleton);

        let converged = ThinningResult {
            skeleton: skeleton.clone(),
            iterations: 1,
            converged: true,
        };
        let text = skeleton_report(ThinningAlgorithm::K3m, &converged, &metrics);
        assert!(text.starts_with("K3M Skeletonization\n"));
        assert!(text.contains("Algorithm converged in 1 iterations"));
        assert!(text.contains("Junctions: 5"));

        let capped = ThinningResult {
            skeleton,
            iterations: 7,
            converged: false,
        };
        let text = skeleton_report(ThinningAlgorithm::ZhangSuen, &capped, &metrics);
        assert!(text.contains("without converging"));
        assert!(text.contains("(7 iterations)"));
    }

    #[test]
    fn test_branch_report_counts() {
        let analysis = analyze_branch_structure(&parse_grid(PLUS).unwrap());
        let text = branch_report(&analysis);

        assert!(text.starts_with("Branch Detection Analysis\n"));
        assert!(text.contains(&format!("Endpoints:     {:>6}", 4)));
        assert!(text.contains(&format!("Crossings:     {:>6}", 5)));
        assert!(text.contains(&format!("Total Branch Points: {:>6}", 9)));
        assert!(text.contains("Branch Density:            100.00 per 100 pixels"));
    }

    // Tests the full report carries every section in pipeline order
    #[test]
    fn test_full_report_sections_in_order() {
        let report = analyze(&parse_grid(PLUS).unwrap(), &AnalysisConfig::default()).unwrap();
        let text = full_report(&report);

        let sections = [
            "Fragmentation Analysis",
            "Zhang-Suen Skeletonization",
            "Branch Detection Analysis",
            "Grid Features Analysis",
        ];
        let positions: Vec<usize> = sections
            .iter()
            .map(|section| text.find(section).unwrap())
            .collect();
        assert!(positions.is_sorted());
    }
}
