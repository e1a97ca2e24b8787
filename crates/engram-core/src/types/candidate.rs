use serde::{Deserialize, Serialize};
use std::fmt;

/// Which path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServedBy {
    /// Pheromone cache hit.
    Cache,
    /// Hybrid-ranked retrieval over the record store.
    Rag,
    /// Unranked most-recent fallback.
    Fallback,
}

impl fmt::Display for ServedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServedBy::Cache => write!(f, "cache"),
            ServedBy::Rag => write!(f, "rag"),
            ServedBy::Fallback => write!(f, "fallback"),
        }
    }
}

/// A scored candidate produced for a single query. Transient — never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub record_id: String,
    pub lexical_score: f64,
    /// `None` when the candidate never reached the vector comparison.
    pub vector_score: Option<f64>,
    pub recency_score: f64,
    /// Weighted blend of the three signals. `None` marks an unranked
    /// fallback result — callers must not treat it as a scored match.
    pub final_score: Option<f64>,
    pub served_by: ServedBy,
    /// Resident content, populated for cache-served candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Stored embedding, carried when the candidate passed the vector
    /// prefilter so promotion can reuse it. Not part of the wire shape.
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
}

/// The response of a single `recall` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallResponse {
    pub results: Vec<RankedCandidate>,
    pub served_by: ServedBy,
    pub duration_ms: u64,
}
