use crate::model::market::Provider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a sync-queue row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Waiting to be picked up
    Pending,
    /// Currently being processed
    Running,
    /// Finished successfully
    Completed,
    /// Finished with an error (see `last_error`)
    Failed,
}

impl SyncStatus {
    /// Storage representation of the status
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a status from its storage representation, defaulting to Pending
    #[must_use]
    pub fn from_str_or_pending(s: &str) -> Self {
        match s {
            "running" => Self::Running,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One unit of background sync work: refresh market data for one inventory
/// item from one provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncJob {
    /// Job identifier (nanoid)
    pub id: String,
    /// Inventory item to refresh
    pub inventory_id: String,
    /// Provider to query
    pub provider: Provider,
    /// Current status
    pub status: SyncStatus,
    /// Number of attempts so far
    pub attempts: i32,
    /// Error message from the last failed attempt
    pub last_error: Option<String>,
    /// When the row was enqueued
    pub created_at: DateTime<Utc>,
    /// Last status transition
    pub updated_at: DateTime<Utc>,
}
