//! External collaborators consulted for derived fields.
//! Implementations can be file-backed, database-backed, or remote services.

pub mod contacts;
pub mod rates;

pub use contacts::ContactDirectory;
pub use rates::RateCatalog;
