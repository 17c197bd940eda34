//! Shared data models used across modules

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A row of the `urls` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct StoredUrl {
    pub id: Uuid,
    pub url: String,
}

impl StoredUrl {
    /// New record with a freshly generated id
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
        }
    }
}
