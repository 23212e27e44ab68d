use std::sync::Arc;

use async_trait::async_trait;
use models::Contact;
use tracing::debug;

use crate::directory::ContactDirectory;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// File-backed contact directory.
/// Keeps a map of `contact id -> names` persisted as JSON.
#[derive(Clone)]
pub struct ContactStore {
    store: Arc<JsonMapStore<String, Contact>>,
}

impl ContactStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Contact>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Seeding and maintenance helpers; request handling only reads through `ContactDirectory`.
    pub async fn list(&self) -> Vec<(String, Contact)> {
        self.store.list().await
    }

    /// Upsert a contact and persist.
    pub async fn put(&self, id: impl Into<String>, contact: Contact) -> Result<(), ServiceError> {
        self.store.insert(id.into(), contact).await
    }

    /// Delete a contact; returns whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.store.remove(&id.to_string()).await
    }
}

#[async_trait]
impl ContactDirectory for ContactStore {
    async fn find_contact(&self, id: &str) -> Result<Contact, ServiceError> {
        let found = self.store.get(&id.to_string()).await;
        debug!(contact_id = %id, found = found.is_some(), "contact lookup");
        found.ok_or_else(|| ServiceError::not_found("contact", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn contact_lookup_and_persistence() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_contacts_{}.json", Uuid::new_v4()));
        let store = ContactStore::new(&tmp).await?;

        assert!(matches!(store.find_contact("c1").await, Err(ServiceError::NotFound(_))));
        store.put("c1", Contact::new("Jo", "Doe")).await?;
        assert_eq!(store.find_contact("c1").await?, Contact::new("Jo", "Doe"));

        // reload store from disk to ensure persistence
        let reopened = ContactStore::new(&tmp).await?;
        assert_eq!(reopened.list().await.len(), 1);
        assert!(reopened.delete("c1").await?);
        assert!(reopened.find_contact("c1").await.is_err());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
