use chrono::{DateTime, Utc};

/// One resident content chunk.
///
/// `pheromone` stays within the configured `[pheromone_min, pheromone_max]`
/// after every mutation; only the cache mutates it.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub pheromone: f64,
    pub token_estimate: usize,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl CacheEntry {
    pub(crate) fn new(
        key: impl Into<String>,
        content: impl Into<String>,
        embedding: Vec<f32>,
        token_estimate: usize,
        pheromone: f64,
    ) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            content: content.into(),
            embedding,
            pheromone,
            token_estimate,
            created_at: now,
            last_accessed: now,
        }
    }
}
