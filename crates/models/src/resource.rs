use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contact::Contact;
use crate::errors::ModelError;
use crate::rate_ref::RateRef;
use crate::{reject_client_id, validate_required};

/// Resource aggregate root.
/// - `first_name`/`last_name` are derived from the contact behind `contact_id`
/// - `rate_refs` keeps insertion order and holds at most one entry per `rate_id`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub contact_id: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub modified_at: DateTime<Utc>,
    pub modified_by: String,
    #[serde(default)]
    pub rate_refs: Vec<RateRef>,
}

impl Resource {
    /// Build a fresh aggregate with all audit fields set to the same instant and principal.
    pub fn new(
        id: String,
        input: &ResourceInput,
        contact: &Contact,
        principal: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: input.name.trim().to_string(),
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            contact_id: input.contact_id.trim().to_string(),
            created_at: now,
            created_by: principal.to_string(),
            modified_at: now,
            modified_by: principal.to_string(),
            rate_refs: Vec::new(),
        }
    }

    /// Overwrite the client-editable fields and re-derive names from `contact`.
    /// Id, creation stamps and rate refs are left as they are.
    pub fn apply(&mut self, input: &ResourceInput, contact: &Contact, principal: &str, now: DateTime<Utc>) {
        self.name = input.name.trim().to_string();
        self.contact_id = input.contact_id.trim().to_string();
        self.first_name = contact.first_name.clone();
        self.last_name = contact.last_name.clone();
        self.touch(principal, now);
    }

    pub fn touch(&mut self, principal: &str, now: DateTime<Utc>) {
        self.modified_at = now;
        self.modified_by = principal.to_string();
    }

    pub fn rate_ref(&self, rate_ref_id: &str) -> Option<&RateRef> {
        self.rate_refs.iter().find(|r| r.id == rate_ref_id)
    }

    pub fn references_rate(&self, rate_id: &str) -> bool {
        self.rate_refs.iter().any(|r| r.rate_id == rate_id)
    }

    /// Remove an embedded rate ref by id, returning it if it was present.
    pub fn take_rate_ref(&mut self, rate_ref_id: &str) -> Option<RateRef> {
        let pos = self.rate_refs.iter().position(|r| r.id == rate_ref_id)?;
        Some(self.rate_refs.remove(pos))
    }
}

/// Create/update payload.
/// A client may echo back a full read model, so server-owned fields are
/// accepted here; they are checked (`id`) or ignored (names, creation stamps).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourceInput {
    pub id: Option<String>,
    pub name: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub contact_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
}

impl ResourceInput {
    pub fn new(name: impl Into<String>, contact_id: impl Into<String>) -> Self {
        Self { name: name.into(), contact_id: contact_id.into(), ..Default::default() }
    }

    /// Checks shared by create and update.
    pub fn validate(&self) -> Result<(), ModelError> {
        validate_required("name", &self.name)?;
        validate_required("contactId", &self.contact_id)?;
        Ok(())
    }

    /// Create additionally forbids a client-chosen id.
    pub fn validate_for_create(&self) -> Result<(), ModelError> {
        reject_client_id("resource", self.id.as_deref())?;
        self.validate()
    }

    /// Update allows echoing the id back, but not changing it.
    pub fn validate_for_update(&self, id: &str) -> Result<(), ModelError> {
        if let Some(given) = self.id.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            if given != id {
                return Err(ModelError::Validation(format!(
                    "resource id is immutable (<{given}> given for <{id}>)"
                )));
            }
        }
        self.validate()
    }
}
