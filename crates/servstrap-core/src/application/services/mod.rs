//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: "provision a project" and "inspect its state".

pub mod provision_service;

pub use provision_service::{
    DEFAULT_DESCRIPTION, ProvisionReport, ProvisionRequest, ProvisionService, ProvisionWarning,
    StatusReport,
};
