use std::collections::HashMap;

use models::RateRef;

use crate::errors::ServiceError;

/// Flat-index entry: a copy of an embedded rate ref plus its owner.
#[derive(Clone, Debug, PartialEq)]
pub struct RateRefEntry {
    pub resource_id: String,
    pub rate_ref: RateRef,
}

/// Secondary index: rate ref id -> (owner, rate ref).
#[derive(Clone, Debug, Default)]
pub struct RateRefIndex {
    by_id: HashMap<String, RateRefEntry>,
}

impl RateRefIndex {
    pub fn len(&self) -> usize { self.by_id.len() }
    pub fn is_empty(&self) -> bool { self.by_id.is_empty() }
    pub fn contains(&self, id: &str) -> bool { self.by_id.contains_key(id) }
    pub fn get(&self, id: &str) -> Option<&RateRefEntry> { self.by_id.get(id) }

    pub(crate) fn insert(&mut self, resource_id: &str, rate_ref: RateRef) -> Result<(), ServiceError> {
        if self.by_id.contains_key(&rate_ref.id) {
            return Err(ServiceError::Duplicate(format!("rateRef <{}> exists already", rate_ref.id)));
        }
        let entry = RateRefEntry { resource_id: resource_id.to_string(), rate_ref };
        self.by_id.insert(entry.rate_ref.id.clone(), entry);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<RateRefEntry> { self.by_id.remove(id) }

    pub fn iter(&self) -> impl Iterator<Item = &RateRefEntry> { self.by_id.values() }

    /// Entries whose owner is `resource_id`.
    pub fn owned_by<'a>(&'a self, resource_id: &'a str) -> impl Iterator<Item = &'a RateRefEntry> + 'a {
        self.by_id.values().filter(move |e| e.resource_id == resource_id)
    }
}
