use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::rate::Rate;
use crate::{reject_client_id, validate_required};

/// Reference from a resource to an external rate.
/// `rate_title` is copied from the rate when the reference is created and never refreshed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRef {
    pub id: String,
    pub rate_id: String,
    #[serde(default)]
    pub rate_title: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

impl RateRef {
    pub fn new(id: String, rate_id: &str, rate: &Rate, principal: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            rate_id: rate_id.trim().to_string(),
            rate_title: rate.title.clone(),
            created_at: now,
            created_by: principal.to_string(),
        }
    }
}

/// Create payload for a rate reference. `rate_title` is ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateRefInput {
    pub id: Option<String>,
    pub rate_id: String,
    pub rate_title: Option<String>,
}

impl RateRefInput {
    pub fn new(rate_id: impl Into<String>) -> Self {
        Self { rate_id: rate_id.into(), ..Default::default() }
    }

    pub fn validate_for_create(&self) -> Result<(), ModelError> {
        reject_client_id("rateRef", self.id.as_deref())?;
        validate_required("rateId", &self.rate_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_is_snapshotted_from_rate() {
        let r = RateRef::new("rr-1".into(), " r1 ", &Rate::new("Standard"), "alice", Utc::now());
        assert_eq!(r.rate_id, "r1");
        assert_eq!(r.rate_title, "Standard");
    }

    #[test]
    fn input_rejects_client_id_and_blank_rate() {
        assert!(RateRefInput::new("r1").validate_for_create().is_ok());
        assert!(RateRefInput::new("").validate_for_create().is_err());
        let mut input = RateRefInput::new("r1");
        input.id = Some("rr-9".into());
        assert!(matches!(input.validate_for_create(), Err(ModelError::Validation(_))));
    }
}
