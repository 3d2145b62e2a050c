//! Tests for Zhang-Suen and K3M thinning

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use proptest::prelude::*;
    use tilemorph::AnalysisError;
    use tilemorph::algorithm::skeletonization::{
        SkeletonMetrics, ThinningAlgorithm, calculate_skeleton_metrics, k3m_thinning,
        k3m_with_iterations, zhang_suen_thinning, zhang_suen_with_iterations,
    };
    use tilemorph::io::configuration::DEFAULT_MAX_ITERATIONS;
    use tilemorph::io::grid_file::parse_grid;
    use tilemorph::matrix::grid::BinaryMatrix;

    const ALGORITHMS: [ThinningAlgorithm; 2] = [ThinningAlgorithm::ZhangSuen, ThinningAlgorithm::K3m];

    const PLUS: &str = "\
.......
...#...
...#...
.#####.
...#...
...#...
.......";

    fn grid(text: &str) -> BinaryMatrix {
        parse_grid(text).unwrap()
    }

    // Solid block of the given size surrounded by a one-cell background margin
    fn padded_block(rows: usize, cols: usize) -> BinaryMatrix {
        let mut matrix = BinaryMatrix::zeros(rows + 2, cols + 2);
        for row in 1..=rows {
            for col in 1..=cols {
                matrix.set(row, col, 1);
            }
        }
        matrix
    }

    fn is_subset(inner: &BinaryMatrix, outer: &BinaryMatrix) -> bool {
        inner
            .foreground_cells()
            .all(|(row, col)| outer.is_foreground(row, col))
    }

    // Tests a one-pixel line is already a skeleton
    // Verified by dropping the A(P1) = 1 condition
    #[test]
    fn test_thin_line_is_stable() {
        let line = grid(".......\n.#####.\n.......");
        for algorithm in ALGORITHMS {
            let result = algorithm.thin(&line, DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(result.skeleton, line, "{}", algorithm.name());
            assert_eq!(result.iterations, 1);
            assert!(result.converged);
        }
    }

    // Tests a plus shape survives both algorithms untouched
    // Verified by removing the corner-product conditions
    #[test]
    fn test_plus_shape_is_stable() {
        let plus = grid(PLUS);
        assert_eq!(zhang_suen_thinning(&plus, DEFAULT_MAX_ITERATIONS).unwrap(), plus);
        assert_eq!(k3m_thinning(&plus, DEFAULT_MAX_ITERATIONS).unwrap(), plus);
    }

    // Tests solid blocks shrink to a non-empty subset of themselves
    // Verified by deleting all simple border pixels without the corner conditions
    #[test]
    fn test_zhang_suen_shrinks_blocks() {
        for (rows, cols) in [(3, 3), (5, 5), (5, 6), (7, 9)] {
            let block = padded_block(rows, cols);
            let result = zhang_suen_with_iterations(&block, DEFAULT_MAX_ITERATIONS).unwrap();

            let remaining = result.skeleton.foreground_count();
            assert!(result.converged);
            assert!(remaining > 0, "{rows}x{cols} block vanished");
            assert!(remaining < rows * cols, "{rows}x{cols} block not thinned");
            assert!(is_subset(&result.skeleton, &block));
        }
    }

    #[test]
    fn test_k3m_shrinks_odd_blocks() {
        for (rows, cols) in [(3, 3), (5, 5), (7, 9)] {
            let block = padded_block(rows, cols);
            let result = k3m_with_iterations(&block, DEFAULT_MAX_ITERATIONS).unwrap();

            let remaining = result.skeleton.foreground_count();
            assert!(result.converged);
            assert!(remaining > 0, "{rows}x{cols} block vanished");
            assert!(remaining < rows * cols, "{rows}x{cols} block not thinned");
            assert!(is_subset(&result.skeleton, &block));
        }
    }

    // Tests the outermost rows and columns are never modified
    // Verified by scanning from index 0 instead of 1
    #[test]
    fn test_border_pixels_untouched() {
        let full = BinaryMatrix::from_array(Array2::from_elem((5, 5), 1));
        for algorithm in ALGORITHMS {
            let result = algorithm.thin(&full, DEFAULT_MAX_ITERATIONS).unwrap();
            assert_eq!(result.skeleton, full);
        }
    }

    // Tests the iteration cap stops an unfinished run and reports it
    // Verified by resetting converged to true after the loop
    #[test]
    fn test_iteration_cap_reported() {
        let block = padded_block(5, 5);
        let result = zhang_suen_with_iterations(&block, 1).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);

        let finished = zhang_suen_with_iterations(&block, DEFAULT_MAX_ITERATIONS).unwrap();
        assert!(finished.iterations > 1);
        assert!(finished.converged);
    }

    #[test]
    fn test_zero_iteration_cap_rejected() {
        let block = padded_block(3, 3);
        for algorithm in ALGORITHMS {
            assert!(matches!(
                algorithm.thin(&block, 0),
                Err(AnalysisError::InvalidParameter {
                    parameter: "max_iterations",
                    ..
                })
            ));
        }
    }

    // Tests degenerate matrices without an interior pass through unchanged
    #[test]
    fn test_tiny_matrices() {
        for (rows, cols) in [(0, 0), (1, 1), (2, 2), (1, 7)] {
            let input = BinaryMatrix::from_array(Array2::from_elem((rows, cols), 1));
            for algorithm in ALGORITHMS {
                let result = algorithm.thin(&input, DEFAULT_MAX_ITERATIONS).unwrap();
                assert_eq!(result.skeleton, input);
                assert!(result.converged);
            }
        }
    }

    // Tests metrics of the plus skeleton: 4 ends, 5 pixels with 3+ neighbours
    // Verified by counting junctions only at exactly 3 neighbours
    #[test]
    fn test_skeleton_metrics_plus() {
        let metrics = calculate_skeleton_metrics(&grid(PLUS));
        assert_eq!(
            metrics,
            SkeletonMetrics {
                skeleton_pixels: 9,
                endpoints: 4,
                junctions: 5,
                branches: 5,
            }
        );
    }

    #[test]
    fn test_skeleton_metrics_line() {
        let metrics = calculate_skeleton_metrics(&grid("#####"));
        assert_eq!(metrics.skeleton_pixels, 5);
        assert_eq!(metrics.endpoints, 2);
        assert_eq!(metrics.junctions, 0);
        assert_eq!(metrics.branches, metrics.junctions);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(ThinningAlgorithm::ZhangSuen.name(), "Zhang-Suen");
        assert_eq!(ThinningAlgorithm::K3m.name(), "K3M");
        assert_eq!(ThinningAlgorithm::default(), ThinningAlgorithm::ZhangSuen);
    }

    fn binary_matrix() -> impl Strategy<Value = BinaryMatrix> {
        (1usize..16, 1usize..16).prop_flat_map(|(rows, cols)| {
            prop::collection::vec(0u32..=1, rows * cols).prop_map(move |cells| {
                BinaryMatrix::from_array(Array2::from_shape_vec((rows, cols), cells).unwrap())
            })
        })
    }

    fn any_algorithm() -> impl Strategy<Value = ThinningAlgorithm> {
        prop_oneof![
            Just(ThinningAlgorithm::ZhangSuen),
            Just(ThinningAlgorithm::K3m)
        ]
    }

    proptest! {
        // A converged skeleton is a fixed point of the algorithm
        #[test]
        fn prop_thinning_idempotent(input in binary_matrix(), algorithm in any_algorithm()) {
            let first = algorithm.thin(&input, DEFAULT_MAX_ITERATIONS).unwrap();
            prop_assert!(first.converged);

            let second = algorithm.thin(&first.skeleton, DEFAULT_MAX_ITERATIONS).unwrap();
            prop_assert_eq!(&second.skeleton, &first.skeleton);
            prop_assert_eq!(second.iterations, 1);
        }

        // Thinning only removes pixels and never exceeds the cap
        #[test]
        fn prop_thinning_removes_only(
            input in binary_matrix(),
            algorithm in any_algorithm(),
            cap in 1usize..6,
        ) {
            let result = algorithm.thin(&input, cap).unwrap();
            prop_assert!(result.iterations <= cap);
            prop_assert_eq!(result.skeleton.dimensions(), input.dimensions());
            prop_assert!(is_subset(&result.skeleton, &input));
        }
    }
}
