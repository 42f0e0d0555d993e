//! Infrastructure adapters for Servstrap.
//!
//! This crate implements the ports defined in
//! `servstrap_core::application::ports`. It contains all external
//! dependencies and I/O operations: the local filesystem, the `python`
//! venv/pip tool, the `nssm` service-management utility, and the privilege
//! probe. Each port also ships an in-memory fake so the provisioning
//! sequence can be tested without mutating a real machine.

pub mod environment;
pub mod filesystem;
pub mod privileges;
pub mod service_control;

mod process;

// Re-export commonly used adapters
pub use environment::{MemoryEnvironment, VenvEnvironment};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use privileges::{FixedPrivileges, HostPrivileges};
pub use service_control::{MemoryServiceControl, NssmServiceControl};
