use async_trait::async_trait;
use models::Rate;

use crate::errors::ServiceError;

/// Rate-by-id lookup. Unknown ids fail with `ServiceError::NotFound`.
#[async_trait]
pub trait RateCatalog: Send + Sync {
    async fn find_rate(&self, id: &str) -> Result<Rate, ServiceError>;
}
