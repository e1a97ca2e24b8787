use serde::{Deserialize, Serialize};

use super::defaults;

/// Hedged-execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HedgeConfig {
    /// Static hedge delay before the retrieval path is started.
    pub delay_ms: u64,
    /// Floor applied to the delay in both static and adaptive mode.
    pub min_delay_ms: u64,
    /// When true, the delay tracks the p95 of recent cache-path latencies
    /// instead of `delay_ms`.
    pub use_adaptive_delay: bool,
    /// Number of recent cache-path samples consulted for the p95.
    pub latency_window: usize,
}

impl Default for HedgeConfig {
    fn default() -> Self {
        Self {
            delay_ms: defaults::DEFAULT_HEDGE_DELAY_MS,
            min_delay_ms: defaults::DEFAULT_HEDGE_MIN_DELAY_MS,
            use_adaptive_delay: false,
            latency_window: defaults::DEFAULT_LATENCY_WINDOW,
        }
    }
}
