//! Tests for PNG export of matrices, labels and skeletons

#[cfg(test)]
mod tests {
    use tilemorph::AnalysisError;
    use tilemorph::algorithm::branches::detect_branches;
    use tilemorph::algorithm::fragmentation::create_labeled_matrix;
    use tilemorph::io::configuration::EXPORT_CELL_SIZE;
    use tilemorph::io::grid_file::parse_grid;
    use tilemorph::io::image::{export_binary_png, export_labels_png, export_skeleton_png};
    use tilemorph::matrix::grid::BinaryMatrix;

    // Tests each cell becomes a square of EXPORT_CELL_SIZE pixels
    // Verified by swapping width and height of the canvas
    #[test]
    fn test_binary_export_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.png");
        let matrix = parse_grid("#..\n.#.").unwrap();

        export_binary_png(&matrix, &path).unwrap();

        let (width, height) = image::image_dimensions(&path).unwrap();
        assert_eq!(width, 3 * EXPORT_CELL_SIZE);
        assert_eq!(height, 2 * EXPORT_CELL_SIZE);
    }

    // Tests foreground and background cells get different colours
    #[test]
    fn test_binary_export_colours() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.png");
        export_binary_png(&parse_grid("#.").unwrap(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        let tile = img.get_pixel(1, 1);
        let gap = img.get_pixel(EXPORT_CELL_SIZE + 1, 1);
        assert_ne!(tile, gap);
        assert_eq!(gap.0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_labels_export_distinct_colours() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labels.png");
        let labeled = create_labeled_matrix(&parse_grid("#.#").unwrap());

        export_labels_png(&labeled, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        let first = img.get_pixel(1, 1);
        let second = img.get_pixel(2 * EXPORT_CELL_SIZE + 1, 1);
        assert_ne!(first, second);
    }

    // Tests the export creates missing parent directories
    #[test]
    fn test_skeleton_export_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out").join("skeleton.png");
        let skeleton = parse_grid(".....\n.###.\n.....").unwrap();

        export_skeleton_png(&skeleton, &detect_branches(&skeleton), &path).unwrap();
        assert!(path.exists());

        let img = image::open(&path).unwrap().to_rgba8();
        let endpoint = img.get_pixel(EXPORT_CELL_SIZE + 1, EXPORT_CELL_SIZE + 1);
        let regular = img.get_pixel(2 * EXPORT_CELL_SIZE + 1, EXPORT_CELL_SIZE + 1);
        assert_ne!(endpoint, regular);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let result = export_binary_png(&BinaryMatrix::zeros(0, 0), &path);
        assert!(matches!(
            result,
            Err(AnalysisError::InvalidSourceData { .. })
        ));
        assert!(!path.exists());
    }
}
