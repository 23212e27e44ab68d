//! Service layer for the resource store.
//! - `aggregate`: the resource index, the derived rate ref index and the lock that guards both.
//! - `storage`: durable JSON files (aggregate document, single-entity maps).
//! - `directory`/`file`: contact and rate collaborators.
//! - `services`: use-case entry points enforcing the aggregate's invariants.

pub mod errors;
pub mod pagination;
pub mod runtime;
pub mod storage;
pub mod aggregate;
pub mod directory;
pub mod file;
pub mod services;
#[cfg(test)]
pub mod test_support;

pub use aggregate::ResourceStore;
pub use errors::ServiceError;
pub use pagination::Window;
pub use services::resource_service::ResourceService;
