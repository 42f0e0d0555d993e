//! Provision Service - main application orchestrator.
//!
//! This service coordinates the entire provisioning workflow:
//! 1. Check preconditions (privileges, interpreter, service utility)
//! 2. Ensure the directory layout
//! 3. Rebuild the isolated runtime environment
//! 4. Install the dependency manifest (when present)
//! 5. Re-register and configure the OS service with rotated log capture
//!
//! It implements the driving port (incoming) and uses driven ports
//! (outgoing). Every step blocks until its external tool finishes; nothing
//! is retried and nothing runs concurrently.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{EnvironmentTool, Filesystem, PrivilegeProbe, ServiceControl},
    },
    domain::{
        ProjectIdentity, ProjectLayout, RotationPolicy, ServiceDefinition, ServiceState,
        StartupMode,
    },
    error::{ServstrapError, ServstrapResult},
};

/// Description used when the caller does not supply one.
pub const DEFAULT_DESCRIPTION: &str = "Python background service managed by servstrap";

// ── Request ───────────────────────────────────────────────────────────────────

/// Everything one provisioning run needs to know.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisionRequest {
    pub identity: ProjectIdentity,
    /// The automation base directory; the project root is `base/<name>`.
    pub base_dir: PathBuf,
    pub description: String,
    pub startup: StartupMode,
    pub rotation: RotationPolicy,
}

impl ProvisionRequest {
    pub fn new(identity: ProjectIdentity, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            identity,
            base_dir: base_dir.into(),
            description: DEFAULT_DESCRIPTION.to_string(),
            startup: StartupMode::Auto,
            rotation: RotationPolicy::default(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_startup(mut self, startup: StartupMode) -> Self {
        self.startup = startup;
        self
    }

    pub fn with_rotation(mut self, rotation: RotationPolicy) -> Self {
        self.rotation = rotation;
        self
    }

    /// The layout this request resolves to.
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::derive(&self.base_dir, &self.identity)
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// Recoverable conditions noticed during a successful run.
///
/// Warnings never change the exit status; the operator can supply the
/// missing pieces after the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionWarning {
    /// No dependency manifest — the environment stays bare.
    ManifestMissing { path: PathBuf },
    /// No entry-point script — the service is registered but cannot run yet.
    EntryPointMissing { path: PathBuf },
    /// The existing service did not stop cleanly before removal.
    StopFailed { service: String, reason: String },
}

impl std::fmt::Display for ProvisionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ManifestMissing { path } => write!(
                f,
                "no dependency manifest at {}; skipping installation",
                path.display()
            ),
            Self::EntryPointMissing { path } => write!(
                f,
                "entry point {} is missing; the service cannot run until it is supplied",
                path.display()
            ),
            Self::StopFailed { service, reason } => write!(
                f,
                "could not stop service '{service}' before removal: {reason}"
            ),
        }
    }
}

/// The outcome of a successful provisioning run.
#[derive(Debug, Clone)]
pub struct ProvisionReport {
    pub layout: ProjectLayout,
    pub service: ServiceDefinition,
    pub warnings: Vec<ProvisionWarning>,
    /// Whether a manifest was found and installed.
    pub manifest_installed: bool,
    /// Whether a stale environment was deleted first.
    pub replaced_environment: bool,
    /// Whether a previous registration was removed first.
    pub replaced_service: bool,
}

/// Read-only snapshot of a project's provisioned state.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub project: String,
    pub service_state: ServiceState,
    pub root_present: bool,
    pub environment_present: bool,
    pub entry_point_present: bool,
    pub manifest_present: bool,
    pub logs_present: bool,
    pub layout: ProjectLayout,
}

// ── Service ───────────────────────────────────────────────────────────────────

/// Main provisioning service.
///
/// Orchestrates the precondition checks and the seven-step provisioning
/// sequence against the injected adapters.
pub struct ProvisionService {
    filesystem: Box<dyn Filesystem>,
    environment: Box<dyn EnvironmentTool>,
    services: Box<dyn ServiceControl>,
    privileges: Box<dyn PrivilegeProbe>,
}

impl ProvisionService {
    /// Create a new provision service with the given adapters.
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        environment: Box<dyn EnvironmentTool>,
        services: Box<dyn ServiceControl>,
        privileges: Box<dyn PrivilegeProbe>,
    ) -> Self {
        Self {
            filesystem,
            environment,
            services,
            privileges,
        }
    }

    /// Provision a project end to end.
    ///
    /// This is the main use case. Fatal errors abort immediately and are
    /// returned; recoverable conditions accumulate as warnings on the
    /// report. Running it twice produces the same end state as running it
    /// once, modulo log accumulation.
    #[instrument(skip_all, fields(project = %request.identity))]
    pub fn provision(&self, request: &ProvisionRequest) -> ServstrapResult<ProvisionReport> {
        // Preconditions - nothing is mutated until all three hold.
        self.check_preconditions()?;

        let layout = request.layout();
        let mut warnings = Vec::new();

        // 1. Directory ensure
        info!(root = %layout.root.display(), "Ensuring project directory");
        self.filesystem.create_dir_all(&layout.root)?;

        // 2. Environment (re)creation
        let replaced_environment = self.rebuild_environment(&layout)?;

        // 3. Dependency installation
        let manifest_installed = self.install_dependencies(&layout, &mut warnings)?;

        // 4. Entry-point check
        if !self.filesystem.exists(&layout.entry_point) {
            warn!(path = %layout.entry_point.display(), "Entry point missing");
            warnings.push(ProvisionWarning::EntryPointMissing {
                path: layout.entry_point.clone(),
            });
        }

        // 5-7. Service re-registration, configuration, log capture
        let service = ServiceDefinition::for_project(
            &request.identity,
            &layout,
            self.environment.service_interpreter(&layout.env_dir),
            request.description.clone(),
            request.startup,
            request.rotation,
        );
        let replaced_service = self.reregister_service(&layout, &service, &mut warnings)?;

        info!(service = %service.name, "Provisioning completed");
        Ok(ProvisionReport {
            layout,
            service,
            warnings,
            manifest_installed,
            replaced_environment,
            replaced_service,
        })
    }

    /// Inspect a project without mutating anything. Needs no elevation.
    #[instrument(skip_all, fields(project = %identity))]
    pub fn status(
        &self,
        identity: &ProjectIdentity,
        base_dir: &Path,
    ) -> ServstrapResult<StatusReport> {
        if !self.services.available() {
            return Err(ApplicationError::DependencyMissing {
                tool: self.services.tool().to_string(),
            }
            .into());
        }

        let layout = ProjectLayout::derive(base_dir, identity);
        let service_state = self.services.query(identity.service_name())?;

        Ok(StatusReport {
            project: identity.service_name().to_string(),
            service_state,
            root_present: self.filesystem.exists(&layout.root),
            environment_present: self.filesystem.exists(&layout.env_dir),
            entry_point_present: self.filesystem.exists(&layout.entry_point),
            manifest_present: self.filesystem.exists(&layout.manifest),
            logs_present: self.filesystem.exists(&layout.logs_dir),
            layout,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn check_preconditions(&self) -> ServstrapResult<()> {
        if !self.privileges.is_elevated() {
            return Err(ApplicationError::PermissionDenied.into());
        }
        if !self.environment.available() {
            return Err(ApplicationError::DependencyMissing {
                tool: self.environment.tool().to_string(),
            }
            .into());
        }
        if !self.services.available() {
            return Err(ApplicationError::DependencyMissing {
                tool: self.services.tool().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Delete any stale environment, then create a fresh one. Returns
    /// whether a stale environment was found. Never merges into an existing
    /// directory.
    fn rebuild_environment(&self, layout: &ProjectLayout) -> ServstrapResult<bool> {
        let replaced = self.filesystem.exists(&layout.env_dir);
        if replaced {
            info!(path = %layout.env_dir.display(), "Removing stale environment");
            self.filesystem.remove_dir_all(&layout.env_dir)?;
        }

        info!(path = %layout.env_dir.display(), "Creating environment");
        self.environment.create(&layout.env_dir).map_err(|e| {
            ServstrapError::from(ApplicationError::EnvironmentCreationFailed {
                reason: reason_of(&e),
            })
        })?;

        Ok(replaced)
    }

    /// Install the manifest when present. Returns whether anything was
    /// installed; records a warning when the manifest is absent.
    fn install_dependencies(
        &self,
        layout: &ProjectLayout,
        warnings: &mut Vec<ProvisionWarning>,
    ) -> ServstrapResult<bool> {
        if !self.filesystem.exists(&layout.manifest) {
            debug!(path = %layout.manifest.display(), "No manifest; skipping installation");
            warnings.push(ProvisionWarning::ManifestMissing {
                path: layout.manifest.clone(),
            });
            return Ok(false);
        }

        info!(manifest = %layout.manifest.display(), "Installing dependencies");
        self.environment
            .upgrade_installer(&layout.env_dir)
            .and_then(|()| {
                self.environment
                    .install_manifest(&layout.env_dir, &layout.manifest)
            })
            .map_err(|e| {
                ServstrapError::from(ApplicationError::DependencyInstallFailed {
                    reason: reason_of(&e),
                })
            })?;

        Ok(true)
    }

    /// Stop and remove any existing registration, then install and fully
    /// configure the new one. Returns whether a previous registration was
    /// replaced.
    fn reregister_service(
        &self,
        layout: &ProjectLayout,
        service: &ServiceDefinition,
        warnings: &mut Vec<ProvisionWarning>,
    ) -> ServstrapResult<bool> {
        let existing = self.services.query(&service.name)?;
        let replaced = existing.is_installed();

        if replaced {
            info!(service = %service.name, state = %existing, "Replacing existing registration");
            // A stop failure is recoverable (the service may simply not be
            // running); removal failure is not, since installation would
            // collide with the leftover registration.
            if let Err(e) = self.services.stop(&service.name) {
                warn!(service = %service.name, error = %e, "Stop before removal failed");
                warnings.push(ProvisionWarning::StopFailed {
                    service: service.name.clone(),
                    reason: reason_of(&e),
                });
            }
            self.services.remove(&service.name).map_err(|e| {
                ServstrapError::from(ApplicationError::ServiceInstallFailed {
                    reason: format!("could not remove existing registration: {}", reason_of(&e)),
                })
            })?;
        }

        info!(service = %service.name, application = %service.application.display(), "Installing service");
        self.services
            .install(&service.name, &service.application, &service.parameters)
            .map_err(|e| {
                ServstrapError::from(ApplicationError::ServiceInstallFailed {
                    reason: reason_of(&e),
                })
            })?;

        // Log capture needs the directory to exist before the service first
        // starts.
        self.filesystem.create_dir_all(&layout.logs_dir)?;

        self.services.configure(service).map_err(|e| {
            ServstrapError::from(ApplicationError::ServiceInstallFailed {
                reason: format!("configuration failed: {}", reason_of(&e)),
            })
        })?;

        Ok(replaced)
    }
}

/// The human-facing reason inside an error, without the layer prefix.
fn reason_of(err: &ServstrapError) -> String {
    match err {
        ServstrapError::Application(inner) => inner.to_string(),
        ServstrapError::Domain(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
