use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("duplicate: {0}")]
    Duplicate(String),
    /// The resource index and the rate ref index disagree. Never user-triggered.
    #[error("internal consistency error: {0}")]
    Internal(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: &str) -> Self { Self::NotFound(format!("no {entity} with ID <{id}> was found")) }
    pub fn storage(e: impl std::fmt::Display) -> Self { Self::Storage(e.to_string()) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_maps_to_validation() {
        let err: ServiceError = ModelError::Validation("name is required".into()).into();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "name is required"));
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = ServiceError::not_found("resource", "abc");
        assert_eq!(err.to_string(), "not found: no resource with ID <abc> was found");
    }
}
