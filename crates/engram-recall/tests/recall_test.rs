use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use engram_cache::GoldenDoc;
use engram_core::config::{EngramConfig, LocalityConfig};
use engram_core::errors::{EngramError, EngramResult, RecallError};
use engram_core::traits::IEmbeddingProvider;
use engram_core::types::ServedBy;
use engram_recall::{LatencyLog, RecallEngine};
use test_fixtures::{init_test_logging, InMemoryRecordStore};

/// Embedder with pinned vectors per exact input text, so cosine outcomes in
/// the scenarios are chosen, not emergent.
struct PinnedEmbedder {
    map: HashMap<String, Vec<f32>>,
    default: Vec<f32>,
}

impl PinnedEmbedder {
    fn new(pairs: &[(&str, [f32; 4])]) -> Self {
        Self {
            map: pairs
                .iter()
                .map(|(text, v)| (text.to_string(), v.to_vec()))
                .collect(),
            default: vec![0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl IEmbeddingProvider for PinnedEmbedder {
    fn embed(&self, text: &str) -> EngramResult<Vec<f32>> {
        Ok(self.map.get(text).cloned().unwrap_or_else(|| self.default.clone()))
    }
    fn dimensions(&self) -> usize {
        4
    }
    fn name(&self) -> &str {
        "pinned"
    }
    fn is_available(&self) -> bool {
        true
    }
}

const GOLDEN_TEXT: &str = "golden reference document";
/// Cosine 0.9 against the golden embedding [1, 0, 0, 0].
const CLOSE_QUERY: &str = "close query";
/// Cosine 0.2 — below the 0.58 match threshold.
const FAR_QUERY: &str = "far query notes";

fn pinned() -> Arc<PinnedEmbedder> {
    Arc::new(PinnedEmbedder::new(&[
        (GOLDEN_TEXT, [1.0, 0.0, 0.0, 0.0]),
        (CLOSE_QUERY, [0.9, 0.43589, 0.0, 0.0]),
        (FAR_QUERY, [0.2, 0.9798, 0.0, 0.0]),
    ]))
}

fn store() -> Arc<InMemoryRecordStore> {
    Arc::new(InMemoryRecordStore::new(LocalityConfig::default()))
}

fn engine_with_golden(
    store: Arc<InMemoryRecordStore>,
    timing: Option<Arc<LatencyLog>>,
) -> RecallEngine {
    let mut builder = RecallEngine::builder()
        .config(EngramConfig::default())
        .store(store)
        .embedder(pinned())
        .golden_corpus(vec![GoldenDoc::with_id("gold", GOLDEN_TEXT)]);
    if let Some(timing) = timing {
        builder = builder.timing(timing);
    }
    builder.build().unwrap()
}

// ── Cache path ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn high_similarity_query_is_served_by_the_cache_and_reinforces() {
    init_test_logging();
    let store = store();
    let engine = engine_with_golden(Arc::clone(&store), None);
    let before = engine.cache().pheromone("gold").unwrap();

    let response = engine.recall("p", CLOSE_QUERY, 5).await.unwrap();

    assert_eq!(response.served_by, ServedBy::Cache);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].content.as_deref(), Some(GOLDEN_TEXT));
    assert!(response.results[0].final_score.unwrap() > 0.85);
    assert!(engine.cache().pheromone("gold").unwrap() > before);
    // The ranker never started: zero record-store calls of any kind.
    assert_eq!(store.calls.total(), 0);
}

// ── Retrieval path ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn low_similarity_query_engages_the_ranker() {
    init_test_logging();
    let store = store();
    let id = store.insert("p", FAR_QUERY, vec![0.2, 0.9798, 0.0, 0.0], Utc::now());
    let engine = engine_with_golden(Arc::clone(&store), None);

    let response = engine.recall("p", FAR_QUERY, 5).await.unwrap();

    assert_eq!(response.served_by, ServedBy::Rag);
    assert_eq!(response.results[0].record_id, id);
    assert!(store.calls.total() > 0, "the record store was consulted");
}

#[tokio::test(flavor = "multi_thread")]
async fn ranked_winner_above_threshold_is_promoted_into_the_cache() {
    let store = store();
    let id = store.insert("p", FAR_QUERY, vec![0.2, 0.9798, 0.0, 0.0], Utc::now());
    let engine = engine_with_golden(Arc::clone(&store), None);

    let response = engine.recall("p", FAR_QUERY, 5).await.unwrap();
    assert_eq!(response.served_by, ServedBy::Rag);

    // Promotion is fire-and-forget; give it a moment to land.
    let mut promoted = false;
    for _ in 0..100 {
        if engine.cache().contains(&id) {
            promoted = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(promoted, "top ranked candidate should migrate into the cache");
    assert_eq!(store.calls.content.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn no_candidates_yields_a_successful_fallback_response() {
    let store = store();
    store.insert("p", "unrelated body", vec![-1.0, 0.0, 0.0, 0.0], Utc::now());
    let engine = engine_with_golden(Arc::clone(&store), None);

    // Unknown text embeds to the default vector: misses the golden entry and
    // matches nothing lexically or by cosine.
    let response = engine.recall("p", "zzzz qqqq", 5).await.unwrap();

    assert_eq!(response.served_by, ServedBy::Fallback);
    assert_eq!(response.results.len(), 1);
    assert!(response.results[0].final_score.is_none());
}

// ── Failure semantics ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn unreachable_store_with_a_cache_miss_is_a_typed_error() {
    let store = store();
    store.fail_everything();
    let engine = engine_with_golden(Arc::clone(&store), None);

    let err = engine.recall("p", "zzzz qqqq", 5).await.unwrap_err();
    assert!(matches!(
        err,
        EngramError::Recall(RecallError::BothPathsFailed { .. })
    ));
}

#[tokio::test(start_paused = true)]
async fn unreachable_store_with_a_cache_hit_still_serves_the_cache() {
    let store = store();
    store.fail_everything();
    let engine = engine_with_golden(Arc::clone(&store), None);

    let response = engine.recall("p", CLOSE_QUERY, 5).await.unwrap();
    assert_eq!(response.served_by, ServedBy::Cache);
}

#[tokio::test(start_paused = true)]
async fn empty_query_is_rejected_before_any_work() {
    let store = store();
    let engine = engine_with_golden(Arc::clone(&store), None);

    for query in ["", "   ", "\n\t"] {
        let err = engine.recall("p", query, 5).await.unwrap_err();
        assert!(matches!(err, EngramError::Recall(RecallError::InvalidQuery)));
    }
    assert_eq!(store.calls.total(), 0);
}

// ── Timing feedback ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn both_the_cache_attempt_and_the_winner_are_recorded() {
    let store = store();
    store.insert("p", FAR_QUERY, vec![0.2, 0.9798, 0.0, 0.0], Utc::now());
    let timing = Arc::new(LatencyLog::new());
    let engine = engine_with_golden(Arc::clone(&store), Some(Arc::clone(&timing)));

    engine.recall("p", FAR_QUERY, 5).await.unwrap();

    // Samples are appended from spawned tasks; wait for both.
    let mut samples = Vec::new();
    for _ in 0..100 {
        samples = timing.entries("p");
        if samples.len() >= 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(samples.iter().any(|s| s.served_by == ServedBy::Cache));
    assert!(samples.iter().any(|s| s.served_by == ServedBy::Rag));
}

// ── Lifecycle and operability ────────────────────────────────────────────

#[test]
fn builder_requires_a_record_store() {
    let result = RecallEngine::builder().build();
    assert!(result.is_err());
}

#[tokio::test(start_paused = true)]
async fn cache_stats_and_force_evaporate_are_exposed() {
    let store = store();
    let engine = engine_with_golden(Arc::clone(&store), None);

    let stats = engine.cache_stats();
    assert_eq!(stats.item_count, 1);
    assert!(stats.total_tokens > 0);
    let before = stats.avg_pheromone;

    engine.force_evaporate();
    assert!(engine.cache_stats().avg_pheromone < before);
}

#[tokio::test(start_paused = true)]
async fn evaporation_lifecycle_starts_and_stops_cleanly() {
    let store = store();
    let engine = engine_with_golden(Arc::clone(&store), None);

    engine.start_evaporation();
    engine.start_evaporation(); // idempotent
    engine.shutdown().await;
    engine.shutdown().await; // safe when already stopped
}
