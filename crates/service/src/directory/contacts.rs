use async_trait::async_trait;
use models::Contact;

use crate::errors::ServiceError;

/// Contact-by-id lookup. Unknown ids fail with `ServiceError::NotFound`.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn find_contact(&self, id: &str) -> Result<Contact, ServiceError>;
}
