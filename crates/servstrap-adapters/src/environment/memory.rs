//! In-memory environment tool for testing.

use std::{
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use servstrap_core::{
    application::{ApplicationError, ports::EnvironmentTool},
    error::ServstrapResult,
};

use crate::filesystem::MemoryFilesystem;

/// In-memory environment tool for testing.
///
/// Records every call and can be scripted to be unavailable or to fail a
/// given operation. When attached to a [`MemoryFilesystem`], `create`
/// registers the environment directory there, mirroring what the real venv
/// module does on disk.
#[derive(Debug, Clone)]
pub struct MemoryEnvironment {
    inner: Arc<RwLock<MemoryEnvironmentInner>>,
    filesystem: Option<MemoryFilesystem>,
}

#[derive(Debug, Default)]
struct MemoryEnvironmentInner {
    available: bool,
    fail_create: bool,
    fail_install: bool,
    created: Vec<PathBuf>,
    upgraded: Vec<PathBuf>,
    installed: Vec<(PathBuf, PathBuf)>,
}

impl MemoryEnvironment {
    /// An available tool that succeeds at everything.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryEnvironmentInner {
                available: true,
                ..Default::default()
            })),
            filesystem: None,
        }
    }

    /// Mirror created environments into `filesystem` so existence checks in
    /// the provisioning sequence see them.
    pub fn with_filesystem(mut self, filesystem: MemoryFilesystem) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    /// Simulate an interpreter that does not resolve on the path.
    pub fn unavailable(self) -> Self {
        self.inner.write().unwrap().available = false;
        self
    }

    /// Script `create` to fail.
    pub fn failing_create(self) -> Self {
        self.inner.write().unwrap().fail_create = true;
        self
    }

    /// Script `install_manifest` to fail.
    pub fn failing_install(self) -> Self {
        self.inner.write().unwrap().fail_install = true;
        self
    }

    /// Every environment directory `create` was called with.
    pub fn created(&self) -> Vec<PathBuf> {
        self.inner.read().unwrap().created.clone()
    }

    /// Every `(env_dir, manifest)` pair `install_manifest` was called with.
    pub fn installed(&self) -> Vec<(PathBuf, PathBuf)> {
        self.inner.read().unwrap().installed.clone()
    }

    /// Every environment directory pip was upgraded in.
    pub fn upgraded(&self) -> Vec<PathBuf> {
        self.inner.read().unwrap().upgraded.clone()
    }
}

impl Default for MemoryEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentTool for MemoryEnvironment {
    fn tool(&self) -> &str {
        "python"
    }

    fn available(&self) -> bool {
        self.inner.read().unwrap().available
    }

    fn create(&self, env_dir: &Path) -> ServstrapResult<()> {
        {
            let mut inner = self.inner.write().unwrap();
            if inner.fail_create {
                return Err(ApplicationError::ToolCommandFailed {
                    tool: "python".into(),
                    detail: "scripted create failure".into(),
                }
                .into());
            }
            inner.created.push(env_dir.to_path_buf());
        }
        if let Some(fs) = &self.filesystem {
            use servstrap_core::application::ports::Filesystem as _;
            fs.create_dir_all(env_dir)?;
        }
        Ok(())
    }

    fn upgrade_installer(&self, env_dir: &Path) -> ServstrapResult<()> {
        self.inner
            .write()
            .unwrap()
            .upgraded
            .push(env_dir.to_path_buf());
        Ok(())
    }

    fn install_manifest(&self, env_dir: &Path, manifest: &Path) -> ServstrapResult<()> {
        let mut inner = self.inner.write().unwrap();
        if inner.fail_install {
            return Err(ApplicationError::ToolCommandFailed {
                tool: "python".into(),
                detail: "scripted install failure".into(),
            }
            .into());
        }
        inner
            .installed
            .push((env_dir.to_path_buf(), manifest.to_path_buf()));
        Ok(())
    }

    fn service_interpreter(&self, env_dir: &Path) -> PathBuf {
        super::windowed_interpreter(env_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_create_calls() {
        let env = MemoryEnvironment::new();
        env.create(Path::new("/proj/venv")).unwrap();
        assert_eq!(env.created(), vec![PathBuf::from("/proj/venv")]);
    }

    #[test]
    fn attached_filesystem_sees_created_environment() {
        let fs = MemoryFilesystem::new();
        let env = MemoryEnvironment::new().with_filesystem(fs.clone());
        env.create(Path::new("/proj/venv")).unwrap();

        use servstrap_core::application::ports::Filesystem as _;
        assert!(fs.exists(Path::new("/proj/venv")));
    }

    #[test]
    fn scripted_failures_surface() {
        let env = MemoryEnvironment::new().failing_create();
        assert!(env.create(Path::new("/x")).is_err());

        let env = MemoryEnvironment::new().failing_install();
        assert!(
            env.install_manifest(Path::new("/x"), Path::new("/x/requirements.txt"))
                .is_err()
        );
    }

    #[test]
    fn unavailable_is_reported() {
        assert!(!MemoryEnvironment::new().unavailable().available());
    }
}
