//! Resource aggregate service.
//!
//! # Responsibility
//! - CRUD for resources and their nested rate refs.
//! - Resolve derived fields (contact names, rate title) before mutating.
//!
//! # Invariants
//! - Input validation and collaborator lookups happen before the write lock is taken.
//! - Every mutation is persisted inside the same lock scope (see `ResourceStore::mutate`).

use std::sync::Arc;

use chrono::Utc;
use models::{generate_id, RateRef, RateRefInput, Resource, ResourceInput};
use tracing::{debug, info};

use crate::aggregate::ResourceStore;
use crate::directory::{ContactDirectory, RateCatalog};
use crate::errors::ServiceError;
use crate::pagination::Window;

#[derive(Clone)]
pub struct ResourceService {
    store: Arc<ResourceStore>,
    contacts: Arc<dyn ContactDirectory>,
    rates: Arc<dyn RateCatalog>,
}

impl ResourceService {
    pub fn new(store: Arc<ResourceStore>, contacts: Arc<dyn ContactDirectory>, rates: Arc<dyn RateCatalog>) -> Self {
        Self { store, contacts, rates }
    }

    pub fn store(&self) -> &Arc<ResourceStore> { &self.store }

    /// Resources sorted by name then id, sliced to `window`.
    pub async fn list_resources(&self, window: Window) -> Vec<Resource> {
        let page = self
            .store
            .read(|s| {
                let sorted = s.resources().sorted();
                window.slice(&sorted).into_iter().cloned().collect::<Vec<_>>()
            })
            .await;
        debug!(position = window.position, size = window.size, returned = page.len(), "list resources");
        page
    }

    pub async fn count_resources(&self) -> usize {
        self.store.read(|s| s.resources().len()).await
    }

    /// Create a resource. Any client-supplied id is rejected, colliding or not.
    pub async fn create_resource(&self, principal: &str, input: ResourceInput) -> Result<Resource, ServiceError> {
        input.validate_for_create()?;
        let contact = self.contacts.find_contact(input.contact_id.trim()).await?;
        let resource = Resource::new(generate_id(), &input, &contact, principal, Utc::now());
        self.store.mutate(|s| s.insert_resource(resource.clone())).await?;
        info!(resource_id = %resource.id, contact_id = %resource.contact_id, principal, "resource created");
        Ok(resource)
    }

    pub async fn read_resource(&self, id: &str) -> Result<Resource, ServiceError> {
        self.store.read(|s| s.resource(id).cloned()).await
    }

    /// Update name and contact; names are re-derived, creation stamps and rate refs kept.
    pub async fn update_resource(
        &self,
        principal: &str,
        id: &str,
        input: ResourceInput,
    ) -> Result<Resource, ServiceError> {
        self.store.read(|s| s.resource(id).map(|_| ())).await?;
        input.validate_for_update(id)?;
        let contact = self.contacts.find_contact(input.contact_id.trim()).await?;
        let updated = self
            .store
            .mutate(|s| s.update_resource(id, &input, &contact, principal, Utc::now()))
            .await?;
        info!(resource_id = %id, principal, "resource updated");
        Ok(updated)
    }

    /// Delete a resource and, with it, every rate ref it owns.
    pub async fn delete_resource(&self, id: &str) -> Result<Resource, ServiceError> {
        let removed = self.store.mutate(|s| s.remove_resource(id)).await?;
        info!(resource_id = %id, rate_refs = removed.rate_refs.len(), "resource deleted");
        Ok(removed)
    }

    /// Embedded rate refs of one resource in insertion order, sliced to `window`.
    pub async fn list_rate_refs(&self, resource_id: &str, window: Window) -> Result<Vec<RateRef>, ServiceError> {
        self.store
            .read(|s| s.resource(resource_id).map(|r| window.slice(&r.rate_refs)))
            .await
    }

    pub async fn create_rate_ref(
        &self,
        principal: &str,
        resource_id: &str,
        input: RateRefInput,
    ) -> Result<RateRef, ServiceError> {
        self.store.read(|s| s.resource(resource_id).map(|_| ())).await?;
        input.validate_for_create()?;
        let rate_id = input.rate_id.trim();
        let rate = self.rates.find_rate(rate_id).await?;
        let now = Utc::now();
        let rate_ref = RateRef::new(generate_id(), rate_id, &rate, principal, now);
        let created = self
            .store
            .mutate(|s| s.add_rate_ref(resource_id, rate_ref, principal, now))
            .await?;
        info!(resource_id, rate_ref_id = %created.id, rate_id = %created.rate_id, principal, "rateRef created");
        Ok(created)
    }

    /// Read a rate ref; it must belong to `resource_id`.
    pub async fn read_rate_ref(&self, resource_id: &str, rate_ref_id: &str) -> Result<RateRef, ServiceError> {
        self.store.read(|s| s.rate_ref(resource_id, rate_ref_id).cloned()).await
    }

    pub async fn delete_rate_ref(
        &self,
        principal: &str,
        resource_id: &str,
        rate_ref_id: &str,
    ) -> Result<RateRef, ServiceError> {
        let removed = self
            .store
            .mutate(|s| s.remove_rate_ref(resource_id, rate_ref_id, principal, Utc::now()))
            .await?;
        info!(resource_id, rate_ref_id, principal, "rateRef deleted");
        Ok(removed)
    }
}
