//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use servstrap_core::{application::ports::Filesystem, error::ServstrapResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ServstrapResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> ServstrapResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> servstrap_core::error::ServstrapError {
    use servstrap_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_remove_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let nested = tmp.path().join("a").join("b");

        fs.create_dir_all(&nested).unwrap();
        assert!(fs.exists(&nested));

        // No-op when the directory already exists.
        fs.create_dir_all(&nested).unwrap();

        fs.remove_dir_all(&tmp.path().join("a")).unwrap();
        assert!(!fs.exists(&nested));
    }

    #[test]
    fn remove_missing_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        assert!(fs.remove_dir_all(&tmp.path().join("missing")).is_err());
    }
}
