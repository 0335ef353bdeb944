use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One key of the planner's key-value storage table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}
