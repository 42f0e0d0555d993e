//! Domain entities: identity, layout, and the service definition.

pub mod identity;
pub mod layout;
pub mod service;

pub use identity::{ProjectIdentity, ProjectName};
pub use layout::ProjectLayout;
pub use service::ServiceDefinition;
