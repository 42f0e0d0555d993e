//! Core domain layer for Servstrap.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O — filesystem, environment creation, service registration — is
//! handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or registry calls
//! - **No external crates**: Only std library + thiserror + serde derives
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Derivation over configuration**: every path and name flows from the
//!   validated project identity and the base directory

// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    identity::{ProjectIdentity, ProjectName},
    layout::ProjectLayout,
    service::ServiceDefinition,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{RotationPolicy, ServiceState, StartupMode};
