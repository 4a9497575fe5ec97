use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context sent alongside the project snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Identifies the wizard session across requests.
    pub session_id: Uuid,
    /// When the snapshot was taken.
    pub generated_at: DateTime<Utc>,
}

impl SnapshotMetadata {
    /// Metadata for `session_id` stamped with the current time.
    pub fn now(session_id: Uuid) -> Self {
        Self {
            session_id,
            generated_at: Utc::now(),
        }
    }
}
