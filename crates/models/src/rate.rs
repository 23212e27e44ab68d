use serde::{Deserialize, Serialize};

/// Title view of an external rate; snapshotted into a `RateRef` at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub title: String,
}

impl Rate {
    pub fn new(title: impl Into<String>) -> Self { Self { title: title.into() } }
}
