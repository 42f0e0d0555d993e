//! In-memory filesystem adapter for testing.

use std::{
    collections::HashSet,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use servstrap_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
///
/// Tracks directories and plain files as path sets. Tests seed files with
/// [`MemoryFilesystem::touch_file`] (a manifest, an entry point, a marker
/// inside a stale environment) and assert on what provisioning left behind.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashSet<PathBuf>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file, creating its ancestor directories (testing helper).
    pub fn touch_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut inner = self.inner.write().unwrap();
        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                inner.directories.insert(current.clone());
            }
        }
        inner.files.insert(path);
    }

    /// Whether nothing has been created yet.
    pub fn is_empty(&self) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.is_empty() && inner.directories.is_empty()
    }

    /// List all known directories (testing helper).
    pub fn directories(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap();
        inner.directories.iter().cloned().collect()
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap();
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> servstrap_core::error::ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains(path) || inner.directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> servstrap_core::error::ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();

        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p| !p.starts_with(path));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_all_registers_every_ancestor() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/a/b/c")).unwrap();
        assert!(fs.exists(Path::new("/a")));
        assert!(fs.exists(Path::new("/a/b")));
        assert!(fs.exists(Path::new("/a/b/c")));
    }

    #[test]
    fn touch_file_creates_parents() {
        let fs = MemoryFilesystem::new();
        fs.touch_file("/proj/requirements.txt");
        assert!(fs.exists(Path::new("/proj")));
        assert!(fs.exists(Path::new("/proj/requirements.txt")));
    }

    #[test]
    fn remove_dir_all_is_recursive() {
        let fs = MemoryFilesystem::new();
        fs.touch_file("/proj/venv/marker");
        fs.remove_dir_all(Path::new("/proj/venv")).unwrap();
        assert!(!fs.exists(Path::new("/proj/venv")));
        assert!(!fs.exists(Path::new("/proj/venv/marker")));
        assert!(fs.exists(Path::new("/proj")));
    }

    #[test]
    fn clear_empties_everything() {
        let fs = MemoryFilesystem::new();
        fs.touch_file("/x/y");
        assert!(!fs.is_empty());
        fs.clear();
        assert!(fs.is_empty());
    }
}
