//! JSON-file-backed implementations of the collaborator traits.

pub mod contact_store;
pub mod rate_store;

pub use contact_store::ContactStore;
pub use rate_store::RateStore;
