//! Servstrap Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Servstrap
//! service-provisioning tool, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         servstrap-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │           (ProvisionService)            │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, EnvironmentTool, Service-  │
//! │        Control, PrivilegeProbe)         │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    servstrap-adapters (Infrastructure)  │
//! │ (LocalFilesystem, VenvEnvironment,      │
//! │       NssmServiceControl, fakes)        │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Domain Layer (Pure Logic)         │
//! │ (ProjectIdentity, ProjectLayout,        │
//! │        ServiceDefinition)               │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use servstrap_core::{
//!     application::{ProvisionRequest, ProvisionService},
//!     domain::ProjectIdentity,
//! };
//!
//! // 1. Describe what to provision
//! let identity = ProjectIdentity::parse("billing-sync").unwrap();
//! let request = ProvisionRequest::new(identity, r"C:\automation");
//!
//! // 2. Use application service (with injected adapters)
//! let service = ProvisionService::new(filesystem, environment, services, privileges);
//! let report = service.provision(&request).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ProvisionReport, ProvisionRequest, ProvisionService, ProvisionWarning, StatusReport,
        ports::{EnvironmentTool, Filesystem, PrivilegeProbe, ServiceControl},
    };
    pub use crate::domain::{
        ProjectIdentity, ProjectLayout, ProjectName, RotationPolicy, ServiceDefinition,
        ServiceState, StartupMode,
    };
    pub use crate::error::{ServstrapError, ServstrapResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
