//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `servstrap-adapters` crate provides implementations — one real
//! adapter and one in-memory fake per port, so the provisioning sequence
//! can be exercised without touching a real machine.

use std::path::{Path, PathBuf};

use crate::domain::{ServiceDefinition, ServiceState};
use crate::error::ServstrapResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `servstrap_adapters::filesystem::LocalFilesystem` (production)
/// - `servstrap_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// Only the three operations the provisioning sequence needs. `create_dir_all`
/// is a no-op on an existing directory, which is what makes step 1 idempotent.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ServstrapResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ServstrapResult<()>;
}

/// Port for probing the privilege level of the invoking context.
///
/// Implemented by:
/// - `servstrap_adapters::privileges::HostPrivileges` (production)
/// - `servstrap_adapters::privileges::FixedPrivileges` (testing)
pub trait PrivilegeProbe: Send + Sync {
    /// Whether the current process holds administrator-equivalent rights.
    fn is_elevated(&self) -> bool;
}

/// Port for the language-runtime environment tool.
///
/// Implemented by:
/// - `servstrap_adapters::environment::VenvEnvironment` (python -m venv / pip)
/// - `servstrap_adapters::environment::MemoryEnvironment` (testing)
pub trait EnvironmentTool: Send + Sync {
    /// The configured program name, used in `DependencyMissing` messages.
    fn tool(&self) -> &str;

    /// Whether the interpreter resolves on the execution path.
    fn available(&self) -> bool;

    /// Create a fresh isolated environment at `env_dir`.
    ///
    /// The caller guarantees no environment exists there; stale directories
    /// are removed through the [`Filesystem`] port first.
    fn create(&self, env_dir: &Path) -> ServstrapResult<()>;

    /// Upgrade the environment's package installer to its latest release.
    fn upgrade_installer(&self, env_dir: &Path) -> ServstrapResult<()>;

    /// Install every dependency listed in `manifest` into the environment.
    fn install_manifest(&self, env_dir: &Path, manifest: &Path) -> ServstrapResult<()>;

    /// Path of the windowed (no-console) interpreter inside `env_dir`,
    /// suitable as a service executable.
    fn service_interpreter(&self, env_dir: &Path) -> PathBuf;
}

/// Port for the OS service-management utility.
///
/// Implemented by:
/// - `servstrap_adapters::service_control::NssmServiceControl` (production)
/// - `servstrap_adapters::service_control::MemoryServiceControl` (testing)
pub trait ServiceControl: Send + Sync {
    /// The configured program name, used in `DependencyMissing` messages.
    fn tool(&self) -> &str;

    /// Whether the utility resolves on the execution path.
    fn available(&self) -> bool;

    /// Query the state of the registration named `name`.
    fn query(&self, name: &str) -> ServstrapResult<ServiceState>;

    /// Stop a running service. Callers treat failure as non-fatal.
    fn stop(&self, name: &str) -> ServstrapResult<()>;

    /// Remove an existing registration.
    fn remove(&self, name: &str) -> ServstrapResult<()>;

    /// Register a new service running `application` with `parameters`.
    fn install(&self, name: &str, application: &Path, parameters: &str) -> ServstrapResult<()>;

    /// Apply the remaining settings of `definition` to an installed service:
    /// working directory, display name, description, startup mode, and the
    /// redirected, rotated output streams.
    fn configure(&self, definition: &ServiceDefinition) -> ServstrapResult<()>;
}
