//! Production environment tool: `python -m venv` plus pip.
//!
//! All package work runs through the interpreter *inside* the environment
//! (`<venv>/Scripts/python.exe -m pip ...`), never the system pip, so
//! installs land in the right place no matter what the host PATH says.

use std::path::{Path, PathBuf};

use servstrap_core::{application::ports::EnvironmentTool, error::ServstrapResult};
use tracing::info;

use crate::process;

/// Creates isolated environments with the venv module of a configured
/// Python interpreter.
#[derive(Debug, Clone)]
pub struct VenvEnvironment {
    python: String,
}

impl VenvEnvironment {
    /// `python` is the program name or path of the interpreter to use,
    /// usually just `"python"`.
    pub fn new(python: impl Into<String>) -> Self {
        Self {
            python: python.into(),
        }
    }
}

impl EnvironmentTool for VenvEnvironment {
    fn tool(&self) -> &str {
        &self.python
    }

    fn available(&self) -> bool {
        process::launchable(&self.python, ["--version"])
    }

    fn create(&self, env_dir: &Path) -> ServstrapResult<()> {
        info!(interpreter = %self.python, path = %env_dir.display(), "Creating virtual environment");
        let target = path_arg(env_dir);
        process::run_checked(&self.python, &self.python, ["-m", "venv", target.as_str()])
    }

    fn upgrade_installer(&self, env_dir: &Path) -> ServstrapResult<()> {
        let python = path_arg(&super::env_interpreter(env_dir));
        info!(path = %env_dir.display(), "Upgrading pip");
        process::run_checked(
            &self.python,
            &python,
            ["-m", "pip", "install", "--upgrade", "pip"],
        )
    }

    fn install_manifest(&self, env_dir: &Path, manifest: &Path) -> ServstrapResult<()> {
        let python = path_arg(&super::env_interpreter(env_dir));
        let manifest = path_arg(manifest);
        info!(manifest = %manifest, "Installing dependency manifest");
        process::run_checked(
            &self.python,
            &python,
            ["-m", "pip", "install", "-r", manifest.as_str()],
        )
    }

    fn service_interpreter(&self, env_dir: &Path) -> PathBuf {
        super::windowed_interpreter(env_dir)
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}
