use serde::{Deserialize, Serialize};

use super::defaults;

/// Pheromone cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Minimum cosine similarity for a lookup to count as a hit.
    pub match_threshold: f64,
    /// Pheromone increment applied on every hit.
    pub hit_boost: f64,
    /// Pheromone decrement applied by each evaporation tick.
    pub evap_rate: f64,
    /// Lower pheromone clamp.
    pub pheromone_min: f64,
    /// Upper pheromone clamp.
    pub pheromone_max: f64,
    /// Pheromone level assigned to freshly promoted entries. Kept above the
    /// minimum so new content survives at least one evaporation cycle.
    pub pheromone_initial: f64,
    /// Global token budget across all resident entries.
    pub max_tokens: usize,
    /// Maximum number of resident entries.
    pub max_items: usize,
    /// Interval between background evaporation sweeps.
    pub evaporation_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            match_threshold: defaults::DEFAULT_MATCH_THRESHOLD,
            hit_boost: defaults::DEFAULT_HIT_BOOST,
            evap_rate: defaults::DEFAULT_EVAP_RATE,
            pheromone_min: defaults::DEFAULT_PHEROMONE_MIN,
            pheromone_max: defaults::DEFAULT_PHEROMONE_MAX,
            pheromone_initial: defaults::DEFAULT_PHEROMONE_INITIAL,
            max_tokens: defaults::DEFAULT_MAX_TOKENS,
            max_items: defaults::DEFAULT_MAX_ITEMS,
            evaporation_interval_secs: defaults::DEFAULT_EVAPORATION_INTERVAL_SECS,
        }
    }
}
