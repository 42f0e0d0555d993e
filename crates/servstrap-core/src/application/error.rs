//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the boundary to
//! external tools, not business logic. Business logic errors are
//! `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while provisioning or inspecting a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The invoking context lacks administrator-equivalent privileges.
    /// Checked before any mutation; nothing has been touched.
    #[error("administrator privileges are required")]
    PermissionDenied,

    /// A required external tool could not be resolved on the path.
    #[error("required tool not found: {tool}")]
    DependencyMissing { tool: String },

    /// Creating the isolated runtime environment failed.
    #[error("environment creation failed: {reason}")]
    EnvironmentCreationFailed { reason: String },

    /// Installing the dependency manifest into the environment failed.
    #[error("dependency installation failed: {reason}")]
    DependencyInstallFailed { reason: String },

    /// Installing or configuring the service registration failed.
    #[error("service installation failed: {reason}")]
    ServiceInstallFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external tool invocation failed. Produced by adapters; the
    /// provisioning service maps it onto the step-specific variant above.
    #[error("{tool} invocation failed: {detail}")]
    ToolCommandFailed { tool: String, detail: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::PermissionDenied => vec![
                "Provisioning registers an OS service and needs elevation".into(),
                "Re-run from an Administrator shell".into(),
            ],
            Self::DependencyMissing { tool } => vec![
                format!("'{}' was not found on the execution path", tool),
                "Install it or point servstrap at it in the [tools] config section".into(),
            ],
            Self::EnvironmentCreationFailed { .. } => vec![
                "The virtual environment could not be created".into(),
                "Check that the interpreter ships the venv module".into(),
                "Check free disk space under the project directory".into(),
            ],
            Self::DependencyInstallFailed { .. } => vec![
                "Installing requirements.txt into the new environment failed".into(),
                "Check the manifest for typos and unreachable package indexes".into(),
            ],
            Self::ServiceInstallFailed { .. } => vec![
                "The service registration could not be written".into(),
                "Check the tool output above; a half-registered service may need manual removal".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the base directory is on a local disk".into(),
            ],
            Self::ToolCommandFailed { tool, .. } => vec![
                format!("'{}' exited unsuccessfully", tool),
                "Re-run with -vv to see the full command line".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PermissionDenied | Self::DependencyMissing { .. } => ErrorCategory::Precondition,
            Self::EnvironmentCreationFailed { .. }
            | Self::DependencyInstallFailed { .. }
            | Self::ServiceInstallFailed { .. }
            | Self::ToolCommandFailed { .. } => ErrorCategory::Provisioning,
            Self::FilesystemError { .. } => ErrorCategory::Internal,
        }
    }
}
