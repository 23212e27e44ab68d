use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::aggregate::AggregateState;
use crate::errors::ServiceError;
use crate::storage::aggregate_file::AggregateStorage;

/// Lock-guarded aggregate state plus its durable storage.
///
/// A mutation holds the write lock across "mutate indices, then save", so
/// writers are serialized and readers never observe an unsaved state.
/// If the mutation or the save fails, the pre-mutation state is put back.
pub struct ResourceStore {
    state: RwLock<AggregateState>,
    storage: Arc<dyn AggregateStorage>,
}

impl ResourceStore {
    /// Load all aggregates from `storage` and build the indices.
    pub async fn open(storage: Arc<dyn AggregateStorage>) -> Result<Arc<Self>, ServiceError> {
        let resources = storage.load().await?;
        let state = AggregateState::from_resources(resources)?;
        info!(
            resources = state.resources().len(),
            rate_refs = state.rate_refs().len(),
            "resource store opened"
        );
        Ok(Arc::new(Self { state: RwLock::new(state), storage }))
    }

    /// Run a read-only closure against the current state.
    pub async fn read<R>(&self, f: impl FnOnce(&AggregateState) -> R) -> R {
        let state = self.state.read().await;
        f(&*state)
    }

    /// Apply a mutation and persist the full snapshot as one unit.
    pub async fn mutate<R>(
        &self,
        f: impl FnOnce(&mut AggregateState) -> Result<R, ServiceError>,
    ) -> Result<R, ServiceError> {
        let mut state = self.state.write().await;
        let before = state.clone();
        let out = match f(&mut *state) {
            Ok(out) => out,
            Err(e) => {
                *state = before;
                return Err(e);
            }
        };
        if let Err(e) = self.storage.save(&state.snapshot()).await {
            error!(error = %e, "persisting resources failed; mutation rolled back");
            *state = before;
            return Err(e);
        }
        Ok(out)
    }

    /// Cross-check both indices.
    pub async fn verify(&self) -> Result<(), ServiceError> {
        self.read(|s| s.verify()).await
    }

    #[cfg(test)]
    pub(crate) async fn with_state_mut(&self, f: impl FnOnce(&mut AggregateState)) {
        let mut state = self.state.write().await;
        f(&mut *state);
    }
}
