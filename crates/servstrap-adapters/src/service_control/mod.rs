//! Service-control adapters: the NSSM wrapper utility and an in-memory fake.

pub mod memory;
pub mod nssm;

pub use memory::MemoryServiceControl;
pub use nssm::NssmServiceControl;
