//! Tests for error formatting and conversions

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;
    use std::path::PathBuf;
    use tilemorph::AnalysisError;
    use tilemorph::io::error::{WithPath, invalid_parameter, invalid_source};
    use tilemorph::io::grid_file::load_grid;

    // Tests parameter errors name the parameter, value and reason
    // Verified by dropping the value from the message
    #[test]
    fn test_invalid_parameter_display() {
        let err = invalid_parameter("kernel_size", &4, &"must be a positive odd number");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'kernel_size' = '4': must be a positive odd number"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_out_of_bounds_display() {
        let err = AnalysisError::OutOfBounds {
            x: 7,
            y: 2,
            width: 5,
            height: 3,
        };
        assert_eq!(
            err.to_string(),
            "Coordinates (7, 2) are out of bounds for a 5x3 matrix"
        );
    }

    #[test]
    fn test_invalid_source_display() {
        let err = invalid_source(&"row 1 is short");
        assert_eq!(err.to_string(), "Invalid source data: row 1 is short");
    }

    // Tests I/O failures keep the path and expose the underlying cause
    // Verified by returning None from source for file system errors
    #[test]
    fn test_with_path_keeps_source() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.with_path("maps/level.txt", "read grid").unwrap_err();

        assert!(err.to_string().contains("read grid"));
        assert!(err.to_string().contains("maps/level.txt"));
        assert!(err.source().is_some());

        match err {
            AnalysisError::FileSystem { path, .. } => {
                assert_eq!(path, PathBuf::from("maps/level.txt"));
            }
            _ => unreachable!("Expected FileSystem error type"),
        }
    }

    // Tests file system errors from loading always name the file involved
    // Verified by converting the read failure without attaching a path
    #[test]
    fn test_load_failure_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");

        match load_grid(&missing) {
            Err(AnalysisError::FileSystem { path, source, .. }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => unreachable!("Expected FileSystem error, got {other:?}"),
        }
    }
}
