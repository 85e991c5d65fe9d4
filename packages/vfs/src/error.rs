//! Error types for the filesystem layers.

use crate::path::{Path, PathError};

/// Errors returned by [`FileSource`](crate::FileSource) implementations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Path validation error.
    #[error("path error: {0}")]
    Path(#[from] PathError),

    /// Nothing exists at the path in any layer.
    #[error("file not found: {path}")]
    NotFound { path: Path },

    /// A directory operation hit a regular file.
    #[error("not a directory: {path}")]
    NotADirectory { path: Path },

    /// A file operation hit a directory.
    #[error("is a directory: {path}")]
    IsADirectory { path: Path },
}

impl Error {
    /// True for the per-request "resource not found" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;
    use std::error::Error as StdError;

    #[test]
    fn not_found_display() {
        let e = Error::NotFound {
            path: path!("foo/bar.yaml"),
        };
        assert_eq!(e.to_string(), "file not found: foo/bar.yaml");
        assert!(e.is_not_found());
    }

    #[test]
    fn directory_errors_display() {
        let e = Error::NotADirectory {
            path: path!("swagger.yaml"),
        };
        assert!(e.to_string().contains("not a directory"));
        assert!(!e.is_not_found());

        let e = Error::IsADirectory { path: Path::root() };
        assert_eq!(e.to_string(), "is a directory: .");
    }

    #[test]
    fn path_error_conversion_keeps_source() {
        let path_err = PathError::InvalidPath {
            message: "test".to_string(),
        };
        let e: Error = path_err.into();
        assert!(matches!(e, Error::Path(_)));
        assert!(StdError::source(&e).is_some());
        assert!(e.to_string().contains("path error"));
    }
}
