use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ServedBy;

/// One timing observation appended to the timing recorder.
///
/// Cache-path samples (one per completed lookup attempt) feed the rolling
/// p95 used to tune the hedge delay; per-query winner samples record the
/// overall outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencySample {
    pub duration_ms: u64,
    pub served_by: ServedBy,
    pub recorded_at: DateTime<Utc>,
}

impl LatencySample {
    /// Create a sample stamped with the current time.
    pub fn now(duration_ms: u64, served_by: ServedBy) -> Self {
        Self {
            duration_ms,
            served_by,
            recorded_at: Utc::now(),
        }
    }
}
