//! The `ServiceDefinition` aggregate: everything the service-control
//! utility needs to register and configure one service.
//!
//! A definition is assembled once per provisioning run from the identity,
//! the layout, and run-time settings (description text, startup mode,
//! rotation thresholds). It is handed to the `ServiceControl` port whole so
//! adapters decide how to map fields onto their tool's parameter names.
//!
//! # Domain purity
//!
//! This module must not import `tracing`. Observability is the
//! responsibility of the application and CLI layers, not the domain.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{
    entities::{identity::ProjectIdentity, layout::ProjectLayout},
    value_objects::{RotationPolicy, StartupMode},
};

/// A complete, registry-ready service description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDefinition {
    /// Service name in the OS registry. Identical to the project name.
    pub name: String,
    /// Human-facing display name, derived from the project name.
    pub display_name: String,
    /// Description text shown by the service manager.
    pub description: String,
    /// Executable the service runs: the environment's windowed interpreter.
    pub application: PathBuf,
    /// Working directory: the project root.
    pub working_dir: PathBuf,
    /// Argument string passed to the application.
    pub parameters: String,
    pub startup: StartupMode,
    /// Where the service's stdout is redirected.
    pub stdout_log: PathBuf,
    /// Where the service's stderr is redirected.
    pub stderr_log: PathBuf,
    pub rotation: RotationPolicy,
}

impl ServiceDefinition {
    /// Assemble the definition for one project.
    ///
    /// `application` is the interpreter inside the freshly created
    /// environment; the entry-point file name becomes the sole argument.
    pub fn for_project(
        identity: &ProjectIdentity,
        layout: &ProjectLayout,
        application: PathBuf,
        description: impl Into<String>,
        startup: StartupMode,
        rotation: RotationPolicy,
    ) -> Self {
        Self {
            name: identity.service_name().to_string(),
            display_name: identity.display_name(),
            description: description.into(),
            application,
            working_dir: layout.root.clone(),
            parameters: super::layout::ENTRY_POINT.to_string(),
            startup,
            stdout_log: layout.stdout_log.clone(),
            stderr_log: layout.stderr_log.clone(),
            rotation,
        }
    }
}
