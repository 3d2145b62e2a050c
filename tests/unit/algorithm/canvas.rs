//! Tests for 4-connected filled and empty region detection

#[cfg(test)]
mod tests {
    use tilemorph::algorithm::canvas::{
        Canvas, CanvasStatistics, calculate_canvas_statistics, detect_canvases,
    };
    use tilemorph::algorithm::fragmentation::detect_fragments;
    use tilemorph::io::grid_file::parse_grid;
    use tilemorph::matrix::grid::BinaryMatrix;
    use tilemorph::matrix::point::Point;

    const SAMPLE: &str = "##.\n.#.\n#.#";

    // Tests filled regions only grow through orthogonal neighbours
    // Verified by adding diagonal offsets to the search
    #[test]
    fn test_filled_regions_are_four_connected() {
        let matrix = parse_grid(SAMPLE).unwrap();
        let canvases = detect_canvases(&matrix, true);

        let areas: Vec<usize> = canvases.iter().map(|c| c.area()).collect();
        assert_eq!(areas, vec![3, 1, 1]);
        assert!(canvases.iter().all(|c| c.is_filled));

        // The same cells form one 8-connected fragment
        assert_eq!(detect_fragments(&matrix).len(), 1);
    }

    #[test]
    fn test_empty_regions() {
        let matrix = parse_grid(SAMPLE).unwrap();
        let canvases = detect_canvases(&matrix, false);

        let areas: Vec<usize> = canvases.iter().map(|c| c.area()).collect();
        assert_eq!(areas, vec![2, 1, 1]);
        assert!(canvases.iter().all(|c| !c.is_filled));

        let first = canvases.first().unwrap();
        assert_eq!(first.id, 1);
        assert!(first.cells.contains(&Point::new(2, 0)));
        assert!(first.cells.contains(&Point::new(2, 1)));
    }

    // Tests filled and empty regions together tile the whole matrix
    #[test]
    fn test_regions_cover_matrix() {
        let matrix = parse_grid("#..#.\n##...\n..###\n#...#").unwrap();
        let filled: usize = detect_canvases(&matrix, true).iter().map(|c| c.area()).sum();
        let empty: usize = detect_canvases(&matrix, false).iter().map(|c| c.area()).sum();
        assert_eq!(filled + empty, 20);
        assert_eq!(filled, matrix.foreground_count());
    }

    #[test]
    fn test_blank_matrix_is_one_empty_canvas() {
        let matrix = BinaryMatrix::zeros(3, 4);
        assert!(detect_canvases(&matrix, true).is_empty());

        let empty = detect_canvases(&matrix, false);
        assert_eq!(empty.len(), 1);
        assert_eq!(empty.first().map(|c| c.area()), Some(12));
    }

    #[test]
    fn test_canvas_bounding_box_and_display() {
        let matrix = parse_grid(SAMPLE).unwrap();

        let filled = detect_canvases(&matrix, true);
        let solid = filled.first().unwrap();
        assert_eq!(solid.bounding_box(), Some((0, 1, 0, 1)));
        assert_eq!(solid.to_string(), "Canvas #1: 3 cells (Filled)");

        let empty = detect_canvases(&matrix, false);
        let gap = empty.first().unwrap();
        assert_eq!(gap.bounding_box(), Some((2, 2, 0, 1)));
        assert_eq!(gap.to_string(), "Canvas #1: 2 cells (Empty)");

        let bare = Canvas {
            id: 9,
            cells: Vec::new(),
            is_filled: true,
        };
        assert_eq!(bare.bounding_box(), None);
    }

    // Tests totals split by kind and ties resolve to the earliest canvas
    // Verified by taking the last canvas of the largest area
    #[test]
    fn test_canvas_statistics() {
        let matrix = parse_grid(SAMPLE).unwrap();
        let mut canvases = detect_canvases(&matrix, true);
        canvases.extend(detect_canvases(&matrix, false));

        let stats = calculate_canvas_statistics(&canvases);
        assert_eq!(stats.canvas_count(), 6);
        assert_eq!((stats.filled_count, stats.filled_cells), (3, 5));
        assert_eq!((stats.empty_count, stats.empty_cells), (3, 4));
        assert_eq!(stats.largest, Some((1, 3)));
        assert_eq!(stats.smallest, Some((2, 1)));

        assert_eq!(
            stats.to_string(),
            "Total Canvases: 6\n  Filled Regions: 3 (5 cells)\n  Empty Regions: 3 (4 cells)\n\nLargest: Canvas #1 (3 cells)\nSmallest: Canvas #2 (1 cells)"
        );
    }

    #[test]
    fn test_canvas_statistics_empty() {
        let stats = calculate_canvas_statistics(&[]);
        assert_eq!(stats, CanvasStatistics::default());
        assert_eq!(stats.to_string(), "No canvases detected");
    }
}
