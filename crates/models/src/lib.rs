//! Domain entities for the resource store.
//! - `Resource` is the aggregate root and embeds its `RateRef`s.
//! - `Contact` and `Rate` are read-only views of external entities.
//! - Input DTOs carry client payloads and their validation rules.

pub mod errors;
pub mod resource;
pub mod rate_ref;
pub mod contact;
pub mod rate;

pub use contact::Contact;
pub use errors::ModelError;
pub use rate::Rate;
pub use rate_ref::{RateRef, RateRefInput};
pub use resource::{Resource, ResourceInput};

/// Generate a new opaque entity id.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Reject empty or whitespace-only required fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Ids are server-generated; any non-empty id in a create payload is rejected.
pub fn reject_client_id(entity: &str, id: Option<&str>) -> Result<(), ModelError> {
    match id.map(str::trim) {
        Some(id) if !id.is_empty() => Err(ModelError::Validation(format!(
            "{entity} id <{id}> must not be set by the client"
        ))),
        _ => Ok(()),
    }
}
