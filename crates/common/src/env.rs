//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::warn;

/// Ensure the data directory exists; warn when neither the resource data nor its seed is present.
pub async fn ensure_env(data_dir: &str, prefix: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    let dir = Path::new(data_dir).join(prefix);
    let data = dir.join("data.json");
    let seed = dir.join("seed.json");
    if tokio::fs::metadata(&data).await.is_err() && tokio::fs::metadata(&seed).await.is_err() {
        warn!(data = %data.display(), seed = %seed.display(), "no resource data or seed found; startup will fail");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_data_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("common_env_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();
        ensure_env(&dir_str, "resources").await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
