//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `servstrap-adapters` implement
//! these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory operations
//!   - `PrivilegeProbe`: elevation check
//!   - `EnvironmentTool`: isolated runtime environment + package installs
//!   - `ServiceControl`: OS service registration
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EnvironmentTool, Filesystem, PrivilegeProbe, ServiceControl};
