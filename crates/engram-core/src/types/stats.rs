use serde::{Deserialize, Serialize};

/// Point-in-time view of the pheromone cache, for operability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheStatsSnapshot {
    pub item_count: usize,
    pub total_tokens: usize,
    /// Hits over total lookups since startup; 0.0 before the first lookup.
    pub hit_rate: f64,
    /// Mean pheromone across resident entries; 0.0 when empty.
    pub avg_pheromone: f64,
}
