use std::path::{Path, PathBuf};

use async_trait::async_trait;
use models::Resource;
use tokio::fs;
use tracing::{error, info};

use crate::errors::ServiceError;
use crate::storage::write_json_atomic;

/// Durable home of the resource aggregates.
/// Implementations always read and write the whole collection.
#[async_trait]
pub trait AggregateStorage: Send + Sync {
    async fn load(&self) -> Result<Vec<Resource>, ServiceError>;
    async fn save(&self, resources: &[Resource]) -> Result<(), ServiceError>;
}

/// File storage under `<root>/<prefix>/`:
/// - `seed.json`: read-only template, used when no data file exists yet
/// - `data.json`: read-write document, created from the seed on first load
///
/// With `persistent = false` nothing is ever written.
#[derive(Clone, Debug)]
pub struct AggregateFile {
    data_path: PathBuf,
    seed_path: PathBuf,
    persistent: bool,
}

impl AggregateFile {
    pub const DATA_FILE: &'static str = "data.json";
    pub const SEED_FILE: &'static str = "seed.json";

    pub fn new<P: Into<PathBuf>>(root: P, prefix: &str, persistent: bool) -> Self {
        let dir = root.into().join(prefix.trim_matches('/'));
        Self {
            data_path: dir.join(Self::DATA_FILE),
            seed_path: dir.join(Self::SEED_FILE),
            persistent,
        }
    }

    pub fn data_path(&self) -> &Path { &self.data_path }
    pub fn seed_path(&self) -> &Path { &self.seed_path }

    async fn read(path: &Path) -> Result<Vec<Resource>, ServiceError> {
        let bytes = fs::read(path).await.map_err(|e| {
            error!(path = %path.display(), error = %e, "resource file is not readable");
            ServiceError::NotFound(format!("file {} is not readable: {e}", path.display()))
        })?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("cannot parse {}: {e}", path.display())))
    }
}

#[async_trait]
impl AggregateStorage for AggregateFile {
    async fn load(&self) -> Result<Vec<Resource>, ServiceError> {
        let data_exists = fs::try_exists(&self.data_path).await.map_err(|e| {
            error!(path = %self.data_path.display(), error = %e, "cannot stat resource data file");
            ServiceError::Storage(format!("cannot stat {}: {e}", self.data_path.display()))
        })?;
        let resources = if data_exists {
            info!(path = %self.data_path.display(), "loading persistent resource data");
            Self::read(&self.data_path).await?
        } else {
            info!(
                data = %self.data_path.display(),
                seed = %self.seed_path.display(),
                "persistent resource data missing; seeding"
            );
            Self::read(&self.seed_path).await?
        };

        if self.persistent && !data_exists {
            if let Some(parent) = self.data_path.parent() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
            write_json_atomic(&self.data_path, &resources).await?;
            info!(path = %self.data_path.display(), "persistent resource data created from seed");
        }
        info!(count = resources.len(), "resources loaded");
        Ok(resources)
    }

    async fn save(&self, resources: &[Resource]) -> Result<(), ServiceError> {
        if !self.persistent {
            return Ok(());
        }
        write_json_atomic(&self.data_path, resources).await?;
        info!(path = %self.data_path.display(), count = resources.len(), "resources exported");
        Ok(())
    }
}
