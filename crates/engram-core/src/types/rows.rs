use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One lexical text-search hit from the record store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalHit {
    pub record_id: String,
    /// Normalized lexical relevance in [0, 1].
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

/// One row from the locality-range prefilter query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRow {
    pub record_id: String,
    pub embedding: Vec<f32>,
    pub created_at: DateTime<Utc>,
}

/// One row from the most-recent fallback query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentRow {
    pub record_id: String,
    pub created_at: DateTime<Utc>,
}
