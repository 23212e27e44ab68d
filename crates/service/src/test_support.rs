#![cfg(test)]
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use models::{generate_id, Contact, Rate, Resource, ResourceInput};

use crate::aggregate::ResourceStore;
use crate::directory::{ContactDirectory, RateCatalog};
use crate::errors::ServiceError;
use crate::services::resource_service::ResourceService;
use crate::storage::aggregate_file::{AggregateFile, AggregateStorage};

/// Unique scratch directory under the system temp dir (not created).
pub fn temp_dir(tag: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{tag}_{}", uuid::Uuid::new_v4()))
}

pub async fn write_seed(root: &Path, prefix: &str, resources: &[Resource]) -> Result<(), anyhow::Error> {
    let dir = root.join(prefix);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(AggregateFile::SEED_FILE), serde_json::to_vec(resources)?).await?;
    Ok(())
}

pub fn sample_resource(name: &str, contact_id: &str) -> Resource {
    Resource::new(
        generate_id(),
        &ResourceInput::new(name, contact_id),
        &Contact::new("Jo", "Doe"),
        "seed",
        Utc::now(),
    )
}

/// Storage double: remembers the last snapshot and can be told to fail.
pub struct MemoryStorage {
    initial: Vec<Resource>,
    saved: tokio::sync::Mutex<Option<Vec<Resource>>>,
    failing: AtomicBool,
}

impl MemoryStorage {
    pub fn new(initial: Vec<Resource>) -> Arc<Self> {
        Arc::new(Self { initial, saved: tokio::sync::Mutex::new(None), failing: AtomicBool::new(false) })
    }

    pub fn fail_saves(&self, fail: bool) { self.failing.store(fail, Ordering::SeqCst); }

    pub async fn saved(&self) -> Option<Vec<Resource>> { self.saved.lock().await.clone() }
}

#[async_trait]
impl AggregateStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Resource>, ServiceError> { Ok(self.initial.clone()) }

    async fn save(&self, resources: &[Resource]) -> Result<(), ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::Storage("disk full".into()));
        }
        *self.saved.lock().await = Some(resources.to_vec());
        Ok(())
    }
}

/// In-memory collaborator double keyed by id.
pub struct StaticDirectory<V> {
    entries: Mutex<HashMap<String, V>>,
}

impl<V: Clone> StaticDirectory<V> {
    pub fn new(entries: impl IntoIterator<Item = (&'static str, V)>) -> Arc<Self> {
        let map = entries.into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        Arc::new(Self { entries: Mutex::new(map) })
    }

    pub fn set(&self, id: &str, value: V) {
        self.entries.lock().unwrap().insert(id.to_string(), value);
    }

    fn get(&self, id: &str) -> Option<V> { self.entries.lock().unwrap().get(id).cloned() }
}

#[async_trait]
impl ContactDirectory for StaticDirectory<Contact> {
    async fn find_contact(&self, id: &str) -> Result<Contact, ServiceError> {
        self.get(id).ok_or_else(|| ServiceError::not_found("contact", id))
    }
}

#[async_trait]
impl RateCatalog for StaticDirectory<Rate> {
    async fn find_rate(&self, id: &str) -> Result<Rate, ServiceError> {
        self.get(id).ok_or_else(|| ServiceError::not_found("rate", id))
    }
}

pub struct Fixture {
    pub service: ResourceService,
    pub storage: Arc<MemoryStorage>,
    pub contacts: Arc<StaticDirectory<Contact>>,
    pub rates: Arc<StaticDirectory<Rate>>,
}

/// Empty store with contacts c1 (Jo Doe), c2 (Ann Lee) and rates r1 (Standard), r2 (Premium).
pub async fn fixture() -> Fixture {
    let storage = MemoryStorage::new(vec![]);
    let contacts = StaticDirectory::new([("c1", Contact::new("Jo", "Doe")), ("c2", Contact::new("Ann", "Lee"))]);
    let rates = StaticDirectory::new([("r1", Rate::new("Standard")), ("r2", Rate::new("Premium"))]);
    let store = ResourceStore::open(storage.clone()).await.expect("open store");
    let service = ResourceService::new(store, contacts.clone(), rates.clone());
    Fixture { service, storage, contacts, rates }
}
