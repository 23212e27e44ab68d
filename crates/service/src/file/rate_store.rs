use std::sync::Arc;

use async_trait::async_trait;
use models::Rate;
use tracing::debug;

use crate::directory::RateCatalog;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// File-backed rate catalog: `rate id -> title`, persisted as JSON.
#[derive(Clone)]
pub struct RateStore {
    store: Arc<JsonMapStore<String, Rate>>,
}

impl RateStore {
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, Rate>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    /// Seeding and maintenance helpers; request handling only reads through `RateCatalog`.
    pub async fn list(&self) -> Vec<(String, Rate)> {
        self.store.list().await
    }

    /// Upsert a rate and persist.
    pub async fn put(&self, id: impl Into<String>, rate: Rate) -> Result<(), ServiceError> {
        self.store.insert(id.into(), rate).await
    }
}

#[async_trait]
impl RateCatalog for RateStore {
    async fn find_rate(&self, id: &str) -> Result<Rate, ServiceError> {
        let found = self.store.get(&id.to_string()).await;
        debug!(rate_id = %id, found = found.is_some(), "rate lookup");
        found.ok_or_else(|| ServiceError::not_found("rate", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn rate_lookup_reads_existing_file() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_rates_{}.json", Uuid::new_v4()));
        tokio::fs::write(&tmp, br#"{"r1":{"title":"Standard"}}"#).await?;
        let store = RateStore::new(&tmp).await?;

        assert_eq!(store.find_rate("r1").await?.title, "Standard");
        assert!(matches!(store.find_rate("r2").await, Err(ServiceError::NotFound(_))));

        store.put("r2", Rate::new("Premium")).await?;
        assert_eq!(store.list().await.len(), 2);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
