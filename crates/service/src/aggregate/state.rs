use std::collections::HashSet;

use chrono::{DateTime, Utc};
use models::{Contact, RateRef, Resource, ResourceInput};
use tracing::error;

use crate::aggregate::{RateRefIndex, ResourceIndex};
use crate::errors::ServiceError;

/// Both indices, mutated only together.
///
/// # Invariants
/// - every rate ref embedded in a resource has exactly one flat entry naming that resource
/// - every flat entry has an embedded copy in the resource it names
/// - within a resource, `rate_id` is unique
#[derive(Clone, Debug, Default)]
pub struct AggregateState {
    resources: ResourceIndex,
    rate_refs: RateRefIndex,
}

fn inconsistency(msg: String) -> ServiceError {
    error!(error = %msg, "resource index inconsistency");
    ServiceError::Internal(msg)
}

impl AggregateState {
    /// Build both indices from loaded aggregates. Documents that already break an
    /// invariant are rejected rather than repaired.
    pub fn from_resources(resources: Vec<Resource>) -> Result<Self, ServiceError> {
        let mut state = Self::default();
        for resource in resources {
            {
                let mut rate_ids = HashSet::new();
                for rate_ref in &resource.rate_refs {
                    if !rate_ids.insert(rate_ref.rate_id.as_str()) {
                        return Err(inconsistency(format!(
                            "resource <{}> references rate <{}> more than once",
                            resource.id, rate_ref.rate_id
                        )));
                    }
                    state
                        .rate_refs
                        .insert(&resource.id, rate_ref.clone())
                        .map_err(|e| inconsistency(format!("loaded data is inconsistent: {e}")))?;
                }
            }
            state
                .resources
                .insert(resource)
                .map_err(|e| inconsistency(format!("loaded data is inconsistent: {e}")))?;
        }
        Ok(state)
    }

    pub fn resources(&self) -> &ResourceIndex { &self.resources }
    pub fn rate_refs(&self) -> &RateRefIndex { &self.rate_refs }

    pub fn resource(&self, id: &str) -> Result<&Resource, ServiceError> {
        self.resources.get(id).ok_or_else(|| ServiceError::not_found("resource", id))
    }

    /// Aggregates in listing order, as persisted.
    pub fn snapshot(&self) -> Vec<Resource> {
        self.resources.sorted().into_iter().cloned().collect()
    }

    pub fn insert_resource(&mut self, resource: Resource) -> Result<(), ServiceError> {
        if self.resources.contains(&resource.id) {
            return Err(ServiceError::Duplicate(format!("resource <{}> exists already", resource.id)));
        }
        if let Some(taken) = resource.rate_refs.iter().find(|r| self.rate_refs.contains(&r.id)) {
            return Err(ServiceError::Duplicate(format!("rateRef <{}> exists already", taken.id)));
        }
        for rate_ref in &resource.rate_refs {
            self.rate_refs.insert(&resource.id, rate_ref.clone())?;
        }
        self.resources.insert(resource)
    }

    /// Apply client fields and re-derived names; rate refs are untouched.
    pub fn update_resource(
        &mut self,
        id: &str,
        input: &ResourceInput,
        contact: &Contact,
        principal: &str,
        now: DateTime<Utc>,
    ) -> Result<Resource, ServiceError> {
        let resource = self.resources.get_mut(id).ok_or_else(|| ServiceError::not_found("resource", id))?;
        resource.apply(input, contact, principal, now);
        Ok(resource.clone())
    }

    /// Cascade: drop every embedded rate ref from the flat index, then the resource.
    pub fn remove_resource(&mut self, id: &str) -> Result<Resource, ServiceError> {
        let resource = self.resource(id)?;
        let rate_ref_ids: Vec<String> = resource.rate_refs.iter().map(|r| r.id.clone()).collect();
        for rate_ref_id in rate_ref_ids {
            match self.rate_refs.remove(&rate_ref_id) {
                Some(entry) if entry.resource_id == id => {}
                Some(entry) => {
                    return Err(inconsistency(format!(
                        "rateRef <{rate_ref_id}> of resource <{id}> is indexed under resource <{}>",
                        entry.resource_id
                    )))
                }
                None => {
                    return Err(inconsistency(format!(
                        "rateRef <{rate_ref_id}> of resource <{id}> is missing from the rateRef index"
                    )))
                }
            }
        }
        self.resources
            .remove(id)
            .ok_or_else(|| inconsistency(format!("resource <{id}> vanished during delete")))
    }

    pub fn add_rate_ref(
        &mut self,
        resource_id: &str,
        rate_ref: RateRef,
        principal: &str,
        now: DateTime<Utc>,
    ) -> Result<RateRef, ServiceError> {
        let resource = self.resource(resource_id)?;
        if resource.references_rate(&rate_ref.rate_id) {
            return Err(ServiceError::Duplicate(format!(
                "resource <{resource_id}> already references rate <{}>",
                rate_ref.rate_id
            )));
        }
        self.rate_refs.insert(resource_id, rate_ref.clone())?;
        let resource = self
            .resources
            .get_mut(resource_id)
            .ok_or_else(|| ServiceError::not_found("resource", resource_id))?;
        resource.rate_refs.push(rate_ref.clone());
        resource.touch(principal, now);
        Ok(rate_ref)
    }

    /// Look up through the flat index, then require that the entry belongs to
    /// `resource_id` and that its embedded copy exists.
    pub fn rate_ref(&self, resource_id: &str, rate_ref_id: &str) -> Result<&RateRef, ServiceError> {
        let resource = self.resource(resource_id)?;
        let entry = self
            .rate_refs
            .get(rate_ref_id)
            .filter(|e| e.resource_id == resource_id)
            .ok_or_else(|| ServiceError::not_found("rateRef", rate_ref_id))?;
        if resource.rate_ref(rate_ref_id).is_none() {
            return Err(inconsistency(format!(
                "rateRef <{rate_ref_id}> is indexed under resource <{resource_id}> but not embedded in it"
            )));
        }
        Ok(&entry.rate_ref)
    }

    pub fn remove_rate_ref(
        &mut self,
        resource_id: &str,
        rate_ref_id: &str,
        principal: &str,
        now: DateTime<Utc>,
    ) -> Result<RateRef, ServiceError> {
        self.resource(resource_id)?;
        let owned = self.rate_refs.get(rate_ref_id).is_some_and(|e| e.resource_id == resource_id);
        if !owned {
            return Err(ServiceError::not_found("rateRef", rate_ref_id));
        }
        let resource = self
            .resources
            .get_mut(resource_id)
            .ok_or_else(|| ServiceError::not_found("resource", resource_id))?;
        let removed = resource.take_rate_ref(rate_ref_id).ok_or_else(|| {
            inconsistency(format!("rateRef <{rate_ref_id}> is orphaned: not embedded in resource <{resource_id}>"))
        })?;
        resource.touch(principal, now);
        self.rate_refs
            .remove(rate_ref_id)
            .ok_or_else(|| inconsistency(format!("rateRef <{rate_ref_id}> is missing from the rateRef index")))?;
        Ok(removed)
    }

    /// Full cross-check of the two indices.
    pub fn verify(&self) -> Result<(), ServiceError> {
        let mut embedded = 0usize;
        for resource in self.resources.iter() {
            let mut rate_ids = HashSet::new();
            for rate_ref in &resource.rate_refs {
                embedded += 1;
                if !rate_ids.insert(rate_ref.rate_id.as_str()) {
                    return Err(inconsistency(format!(
                        "resource <{}> references rate <{}> more than once",
                        resource.id, rate_ref.rate_id
                    )));
                }
                match self.rate_refs.get(&rate_ref.id) {
                    Some(entry) if entry.resource_id == resource.id && entry.rate_ref == *rate_ref => {}
                    _ => {
                        return Err(inconsistency(format!(
                            "embedded rateRef <{}> of resource <{}> has no matching index entry",
                            rate_ref.id, resource.id
                        )))
                    }
                }
            }
        }
        for entry in self.rate_refs.iter() {
            let backed = self
                .resources
                .get(&entry.resource_id)
                .is_some_and(|r| r.rate_ref(&entry.rate_ref.id).is_some());
            if !backed {
                return Err(inconsistency(format!(
                    "indexed rateRef <{}> has no embedded copy in resource <{}>",
                    entry.rate_ref.id, entry.resource_id
                )));
            }
        }
        if embedded != self.rate_refs.len() {
            return Err(inconsistency(format!(
                "{embedded} embedded rateRefs but {} indexed",
                self.rate_refs.len()
            )));
        }
        Ok(())
    }

    /// Drop a flat entry without touching its embedded copy.
    #[cfg(test)]
    pub(crate) fn corrupt_drop_index_entry(&mut self, rate_ref_id: &str) {
        self.rate_refs.remove(rate_ref_id);
    }
}
