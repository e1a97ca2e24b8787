use async_trait::async_trait;

use crate::errors::EngramResult;
use crate::types::LatencySample;

/// Append-only timing log consumed by the hedge-delay feedback loop.
/// Retention and compaction are the implementation's concern.
#[async_trait]
pub trait ITimingRecorder: Send + Sync {
    /// Append one sample for a project.
    async fn append(&self, project_id: &str, sample: LatencySample) -> EngramResult<()>;

    /// p95 of the most recent `window` cache-path samples for a project, in
    /// milliseconds. `None` when no cache-path samples exist yet.
    async fn p95(&self, project_id: &str, window: usize) -> EngramResult<Option<u64>>;
}
