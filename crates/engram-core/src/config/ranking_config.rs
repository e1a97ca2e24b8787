use serde::{Deserialize, Serialize};

use super::defaults;

/// Hybrid ranker configuration.
///
/// The three weights blend the lexical, vector, and recency signals into the
/// final score; a candidate missing from a signal contributes zero for that
/// term.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub fts_weight: f64,
    pub vector_weight: f64,
    pub recency_weight: f64,
    /// Prefiltered rows below this cosine similarity are discarded.
    pub vector_min_score: f64,
    /// Row cap for the locality-range prefilter query.
    pub vector_candidates: usize,
    /// Characteristic time of the recency decay.
    pub recency_half_life_days: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            fts_weight: defaults::DEFAULT_FTS_WEIGHT,
            vector_weight: defaults::DEFAULT_VECTOR_WEIGHT,
            recency_weight: defaults::DEFAULT_RECENCY_WEIGHT,
            vector_min_score: defaults::DEFAULT_VECTOR_MIN_SCORE,
            vector_candidates: defaults::DEFAULT_VECTOR_CANDIDATES,
            recency_half_life_days: defaults::DEFAULT_RECENCY_HALF_LIFE_DAYS,
        }
    }
}
