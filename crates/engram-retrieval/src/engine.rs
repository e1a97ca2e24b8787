//! HybridRanker: lexical + locality-prefiltered vector + recency, blended
//! into one ordering.
//!
//! Pipeline: text search → locality-range prefilter → exact cosine →
//! union by record id → weighted blend → sort/truncate, with a most-recent
//! fallback when the union is empty.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use engram_core::config::{LocalityConfig, RankingConfig};
use engram_core::constants::LOCALITY_RETRY_WIDEN_FACTOR;
use engram_core::errors::EngramResult;
use engram_core::scoring::{cosine_similarity, recency_score};
use engram_core::traits::IRecordStore;
use engram_core::types::{RankedCandidate, ServedBy, VectorRow};

/// Candidate state accumulated during the union step.
struct Partial {
    lexical: f64,
    vector: Option<f64>,
    created_at: DateTime<Utc>,
    embedding: Option<Vec<f32>>,
}

/// The hybrid ranking engine over the record store.
pub struct HybridRanker {
    store: Arc<dyn IRecordStore>,
    ranking: RankingConfig,
    locality: LocalityConfig,
}

impl HybridRanker {
    pub fn new(
        store: Arc<dyn IRecordStore>,
        ranking: RankingConfig,
        locality: LocalityConfig,
    ) -> Self {
        Self {
            store,
            ranking,
            locality,
        }
    }

    /// Rank records for a query, best first, at most `limit` results.
    ///
    /// Candidates reach the union from the lexical search, the vector
    /// prefilter, or both; a missing signal contributes zero to the blend.
    /// An empty union degrades to the `limit` most recent records, each
    /// marked with `final_score = None`.
    pub async fn rank(
        &self,
        project_id: &str,
        query_text: &str,
        query_embedding: &[f32],
        limit: usize,
    ) -> EngramResult<Vec<RankedCandidate>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let lexical = self.store.text_search(project_id, query_text).await?;
        debug!(project_id, hits = lexical.len(), "lexical candidates");

        let vector_rows = self.prefilter(project_id, query_embedding).await;

        let mut union: HashMap<String, Partial> = HashMap::new();
        for hit in lexical {
            union.insert(
                hit.record_id,
                Partial {
                    lexical: hit.score,
                    vector: None,
                    created_at: hit.created_at,
                    embedding: None,
                },
            );
        }

        let mut vector_kept = 0usize;
        for row in vector_rows {
            let score = cosine_similarity(query_embedding, &row.embedding);
            if score < self.ranking.vector_min_score {
                continue;
            }
            vector_kept += 1;
            match union.entry(row.record_id) {
                Entry::Occupied(mut occupied) => {
                    let partial = occupied.get_mut();
                    partial.vector = Some(score);
                    partial.embedding = Some(row.embedding);
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(Partial {
                        lexical: 0.0,
                        vector: Some(score),
                        created_at: row.created_at,
                        embedding: Some(row.embedding),
                    });
                }
            }
        }
        debug!(vector_kept, union = union.len(), "candidate union built");

        if union.is_empty() {
            return self.fallback(project_id, limit).await;
        }

        let now = Utc::now();
        let mut scored: Vec<(RankedCandidate, DateTime<Utc>)> = union
            .into_iter()
            .map(|(record_id, partial)| {
                let recency =
                    recency_score(partial.created_at, now, self.ranking.recency_half_life_days);
                let final_score = self.ranking.fts_weight * partial.lexical
                    + self.ranking.vector_weight * partial.vector.unwrap_or(0.0)
                    + self.ranking.recency_weight * recency;
                (
                    RankedCandidate {
                        record_id,
                        lexical_score: partial.lexical,
                        vector_score: partial.vector,
                        recency_score: recency,
                        final_score: Some(final_score),
                        served_by: ServedBy::Rag,
                        content: None,
                        embedding: partial.embedding,
                    },
                    partial.created_at,
                )
            })
            .collect();

        scored.sort_by(|a, b| {
            let fa = a.0.final_score.unwrap_or(f64::MIN);
            let fb = b.0.final_score.unwrap_or(f64::MIN);
            fb.partial_cmp(&fa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.1.cmp(&a.1))
        });
        scored.truncate(limit);

        info!(
            project_id,
            results = scored.len(),
            top_score = scored.first().and_then(|(c, _)| c.final_score),
            "ranking complete"
        );
        Ok(scored.into_iter().map(|(candidate, _)| candidate).collect())
    }

    /// Locality-range prefilter. One failed query is retried once with the
    /// radius widened; a second failure degrades to no vector candidates
    /// instead of aborting the whole ranking call.
    async fn prefilter(&self, project_id: &str, query_embedding: &[f32]) -> Vec<VectorRow> {
        let key = crate::locality::locality_key(query_embedding, &self.locality);
        let (low, high) =
            crate::locality::range_around(key, self.locality.range_radius, self.locality.key_bits);

        let first = self
            .store
            .fetch_by_locality_range(project_id, low, high, self.ranking.vector_candidates)
            .await;
        match first {
            Ok(rows) => {
                debug!(key, low, high, rows = rows.len(), "vector prefilter");
                rows
            }
            Err(error) => {
                let widened = self
                    .locality
                    .range_radius
                    .saturating_mul(LOCALITY_RETRY_WIDEN_FACTOR);
                let (low, high) =
                    crate::locality::range_around(key, widened, self.locality.key_bits);
                warn!(%error, widened, "prefilter failed; retrying with widened range");
                match self
                    .store
                    .fetch_by_locality_range(project_id, low, high, self.ranking.vector_candidates)
                    .await
                {
                    Ok(rows) => rows,
                    Err(error) => {
                        warn!(%error, "widened prefilter failed; continuing without vector candidates");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Most-recent fallback: unranked, `final_score = None`.
    async fn fallback(&self, project_id: &str, limit: usize) -> EngramResult<Vec<RankedCandidate>> {
        let recent = self.store.fetch_recent(project_id, limit).await?;
        let now = Utc::now();
        info!(project_id, rows = recent.len(), "serving most-recent fallback");
        Ok(recent
            .into_iter()
            .map(|row| RankedCandidate {
                record_id: row.record_id,
                lexical_score: 0.0,
                vector_score: None,
                recency_score: recency_score(
                    row.created_at,
                    now,
                    self.ranking.recency_half_life_days,
                ),
                final_score: None,
                served_by: ServedBy::Fallback,
                content: None,
                embedding: None,
            })
            .collect())
    }
}
