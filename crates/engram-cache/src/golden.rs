//! Golden-corpus preload.
//!
//! The cache is rebuilt from this fixed, read-only corpus on every startup;
//! entries promoted at runtime are a cache, not a source of truth, and are
//! lost on restart.

use serde::{Deserialize, Serialize};
use tracing::info;

use engram_core::errors::{CacheError, EngramResult};
use engram_core::traits::IEmbeddingProvider;

use crate::cache::PheromoneCache;
use crate::estimate::TokenEstimator;

/// One reference document preloaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenDoc {
    /// Stable key; the blake3 hash of the text is used when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

impl GoldenDoc {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    pub fn with_id(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
        }
    }
}

/// Parse a golden corpus from its JSON form: an array of `{id?, text}`.
pub fn corpus_from_json(input: &str) -> EngramResult<Vec<GoldenDoc>> {
    serde_json::from_str(input).map_err(|e| {
        CacheError::PreloadFailed {
            reason: format!("invalid golden corpus JSON: {e}"),
        }
        .into()
    })
}

/// Embed, estimate, and promote the golden corpus. Returns the number of
/// entries actually inserted (duplicates and oversized docs are skipped by
/// the cache's own admission rules).
pub fn preload(
    cache: &PheromoneCache,
    docs: &[GoldenDoc],
    embedder: &dyn IEmbeddingProvider,
    estimator: &TokenEstimator,
) -> EngramResult<usize> {
    let texts: Vec<String> = docs.iter().map(|d| d.text.clone()).collect();
    let embeddings = embedder.embed_batch(&texts)?;
    if embeddings.len() != docs.len() {
        return Err(CacheError::PreloadFailed {
            reason: format!(
                "embedder returned {} vectors for {} documents",
                embeddings.len(),
                docs.len()
            ),
        }
        .into());
    }

    let mut inserted = 0;
    for (doc, embedding) in docs.iter().zip(embeddings) {
        let key = doc
            .id
            .clone()
            .unwrap_or_else(|| blake3::hash(doc.text.as_bytes()).to_hex().to_string());
        let tokens = estimator.estimate_cached(&doc.text);
        if cache.promote(&key, &doc.text, embedding, tokens) {
            inserted += 1;
        }
    }

    info!(docs = docs.len(), inserted, "golden corpus preloaded");
    Ok(inserted)
}
