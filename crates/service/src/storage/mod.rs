//! Storage abstractions for service layer
//!
//! Contains the file-backed stores and the helpers they share for
//! persisting small collections as JSON documents.

pub mod aggregate_file;
pub mod json_map_store;

use std::path::Path;

use serde::Serialize;
use tokio::fs;

use crate::errors::ServiceError;

/// Serialize `value` and replace `path` with it.
/// Writes to a sibling `*.tmp` file first so a crash mid-write never leaves a truncated document.
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec_pretty(value).map_err(ServiceError::storage)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).await.map_err(|e| ServiceError::Storage(format!("cannot write {}: {e}", tmp.display())))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|e| ServiceError::Storage(format!("cannot replace {}: {e}", path.display())))
}
