//! Default in-memory timing recorder.
//!
//! Per-project bounded ring buffers; the p95 is computed over the most
//! recent cache-path samples only, since that is what tunes the hedge.

use std::collections::VecDeque;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use engram_core::constants::MAX_LATENCY_SAMPLES_PER_PROJECT;
use engram_core::errors::EngramResult;
use engram_core::traits::ITimingRecorder;
use engram_core::types::{LatencySample, ServedBy};

/// Append-only latency log with ring-buffer retention.
pub struct LatencyLog {
    samples: DashMap<String, VecDeque<LatencySample>>,
    max_per_project: usize,
}

impl LatencyLog {
    pub fn new() -> Self {
        Self::with_capacity(MAX_LATENCY_SAMPLES_PER_PROJECT)
    }

    pub fn with_capacity(max_per_project: usize) -> Self {
        Self {
            samples: DashMap::new(),
            max_per_project,
        }
    }

    /// Total samples currently retained for a project.
    pub fn count(&self, project_id: &str) -> usize {
        self.samples.get(project_id).map_or(0, |s| s.len())
    }

    /// Samples retained for a project, oldest first.
    pub fn entries(&self, project_id: &str) -> Vec<LatencySample> {
        self.samples
            .get(project_id)
            .map_or_else(Vec::new, |s| s.iter().cloned().collect())
    }
}

impl Default for LatencyLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ITimingRecorder for LatencyLog {
    async fn append(&self, project_id: &str, sample: LatencySample) -> EngramResult<()> {
        trace!(
            project_id,
            duration_ms = sample.duration_ms,
            served_by = %sample.served_by,
            "latency sample"
        );
        let mut entry = self.samples.entry(project_id.to_string()).or_default();
        entry.push_back(sample);
        while entry.len() > self.max_per_project {
            entry.pop_front();
        }
        Ok(())
    }

    async fn p95(&self, project_id: &str, window: usize) -> EngramResult<Option<u64>> {
        let Some(entry) = self.samples.get(project_id) else {
            return Ok(None);
        };
        let mut recent: Vec<u64> = entry
            .iter()
            .rev()
            .filter(|s| s.served_by == ServedBy::Cache)
            .take(window.max(1))
            .map(|s| s.duration_ms)
            .collect();
        if recent.is_empty() {
            return Ok(None);
        }
        recent.sort_unstable();
        let idx = ((0.95 * (recent.len() - 1) as f64).round() as usize).min(recent.len() - 1);
        Ok(Some(recent[idx]))
    }
}
