//! Hedge delay computation.
//!
//! Static mode uses the configured delay; adaptive mode tracks the p95 of
//! recent cache-path latencies, falling back to the static delay while the
//! window is empty. Both modes honor the configured floor.

use std::time::Duration;

use tracing::warn;

use engram_core::config::HedgeConfig;
use engram_core::traits::ITimingRecorder;

pub(crate) async fn hedge_delay(
    config: &HedgeConfig,
    timing: &dyn ITimingRecorder,
    project_id: &str,
) -> Duration {
    let base_ms = if config.use_adaptive_delay {
        match timing.p95(project_id, config.latency_window).await {
            Ok(Some(p95)) => p95,
            Ok(None) => config.delay_ms,
            Err(error) => {
                warn!(%error, "latency p95 unavailable; using the static delay");
                config.delay_ms
            }
        }
    } else {
        config.delay_ms
    };
    Duration::from_millis(base_ms.max(config.min_delay_ms))
}
