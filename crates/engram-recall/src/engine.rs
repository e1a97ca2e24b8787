//! RecallEngine: the public recall surface and the hedged race between the
//! cache leg and the retrieval leg.
//!
//! Protocol per query: start the cache lookup, arm the hedge timer, and on a
//! confirmed miss or a fired timer start the ranker; the first usable result
//! resolves the query. A ranked win above the cache threshold promotes its
//! top candidate as a side effect, even when that leg loses the race.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use engram_cache::{preload, EvaporationSweeper, GoldenDoc, PheromoneCache, TokenEstimator};
use engram_core::config::EngramConfig;
use engram_core::errors::{ConfigError, EngramResult, RecallError, RetrievalError};
use engram_core::traits::{IEmbeddingProvider, IRecordStore, ITimingRecorder};
use engram_core::types::{
    CacheStatsSnapshot, LatencySample, RankedCandidate, RecallResponse, ServedBy,
};
use engram_retrieval::HybridRanker;

use crate::delay;
use crate::embedding::FallbackEmbedder;
use crate::race::{self, HedgeOutcome};
use crate::timing::LatencyLog;

/// The recall orchestrator. Construct through [`RecallEngine::builder`].
pub struct RecallEngine {
    cache: Arc<PheromoneCache>,
    ranker: Arc<HybridRanker>,
    store: Arc<dyn IRecordStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    timing: Arc<dyn ITimingRecorder>,
    estimator: Arc<TokenEstimator>,
    config: EngramConfig,
    sweeper: Mutex<Option<EvaporationSweeper>>,
}

impl RecallEngine {
    pub fn builder() -> RecallEngineBuilder {
        RecallEngineBuilder::new()
    }

    /// Recall records for a free-text query scoped to a project.
    ///
    /// Returns a successful (possibly empty or fallback) response whenever
    /// any path produced an answer; errors only on an invalid query or when
    /// both paths were exhausted by upstream failure.
    pub async fn recall(
        &self,
        project_id: &str,
        query_text: &str,
        limit: usize,
    ) -> EngramResult<RecallResponse> {
        let started = Instant::now();
        if query_text.trim().is_empty() {
            return Err(RecallError::InvalidQuery.into());
        }

        let query_embedding = self.embedder.embed(query_text)?;
        let hedge_delay =
            delay::hedge_delay(&self.config.hedge, self.timing.as_ref(), project_id).await;
        debug!(project_id, delay_ms = hedge_delay.as_millis() as u64, "hedge armed");

        // Cache leg: spawned so it runs to completion even if it loses the
        // race, and records its own latency sample either way.
        let cache_handle = {
            let cache = Arc::clone(&self.cache);
            let timing = Arc::clone(&self.timing);
            let embedding = query_embedding.clone();
            let project = project_id.to_string();
            tokio::spawn(async move {
                let lookup_started = Instant::now();
                let hit = cache.lookup(&embedding);
                let sample = LatencySample::now(
                    lookup_started.elapsed().as_millis() as u64,
                    ServedBy::Cache,
                );
                tokio::spawn(async move {
                    timing.append(&project, sample).await.ok();
                });
                hit
            })
        };
        let cache_leg = async move { cache_handle.await.ok().flatten() };

        // Retrieval leg, started lazily by the race. Promotion happens
        // inside the spawned task, so it fires even when this leg loses.
        let start_ranker = || {
            let ranker = Arc::clone(&self.ranker);
            let cache = Arc::clone(&self.cache);
            let store = Arc::clone(&self.store);
            let embedder = Arc::clone(&self.embedder);
            let estimator = Arc::clone(&self.estimator);
            let match_threshold = self.config.cache.match_threshold;
            let project = project_id.to_string();
            let query = query_text.to_string();
            let embedding = query_embedding.clone();
            let handle: tokio::task::JoinHandle<EngramResult<Vec<RankedCandidate>>> =
                tokio::spawn(async move {
                    let results = ranker.rank(&project, &query, &embedding, limit).await?;
                    if let Some(top) = results.first() {
                        if top.final_score.map_or(false, |score| score > match_threshold) {
                            tokio::spawn(promote_candidate(
                                cache,
                                store,
                                embedder,
                                estimator,
                                top.record_id.clone(),
                                top.embedding.clone(),
                            ));
                        }
                    }
                    Ok(results)
                });
            async move {
                match handle.await {
                    Ok(result) => result,
                    Err(join_error) => {
                        Err(RetrievalError::upstream("ranker", join_error.to_string()).into())
                    }
                }
            }
        };

        match race::run(cache_leg, start_ranker, hedge_delay).await {
            Ok(HedgeOutcome::Primary(hit)) => {
                let candidate = RankedCandidate {
                    record_id: hit.key,
                    lexical_score: 0.0,
                    vector_score: Some(hit.similarity),
                    recency_score: 0.0,
                    final_score: Some(hit.similarity),
                    served_by: ServedBy::Cache,
                    content: Some(hit.content),
                    embedding: None,
                };
                self.resolve(project_id, vec![candidate], ServedBy::Cache, started)
            }
            Ok(HedgeOutcome::Hedged(results)) => {
                let served_by = if results.first().map_or(true, |c| c.final_score.is_none()) {
                    ServedBy::Fallback
                } else {
                    ServedBy::Rag
                };
                self.resolve(project_id, results, served_by, started)
            }
            Err(error) => {
                warn!(project_id, %error, "retrieval failed with no cache hit");
                Err(RecallError::BothPathsFailed {
                    reason: error.to_string(),
                }
                .into())
            }
        }
    }

    /// Cache observability snapshot.
    pub fn cache_stats(&self) -> CacheStatsSnapshot {
        self.cache.stats()
    }

    /// Run one evaporation pass immediately.
    pub fn force_evaporate(&self) {
        self.cache.evaporate_tick();
    }

    /// Start the background evaporation sweeper. Idempotent; must be called
    /// from within a tokio runtime.
    pub fn start_evaporation(&self) {
        let mut guard = self.sweeper.lock().unwrap_or_else(|p| p.into_inner());
        if guard.is_none() {
            *guard = Some(EvaporationSweeper::start(
                Arc::clone(&self.cache),
                Duration::from_secs(self.config.cache.evaporation_interval_secs),
            ));
        }
    }

    /// Stop the background sweeper, if running.
    pub async fn shutdown(&self) {
        let sweeper = {
            let mut guard = self.sweeper.lock().unwrap_or_else(|p| p.into_inner());
            guard.take()
        };
        if let Some(sweeper) = sweeper {
            sweeper.stop().await;
        }
    }

    /// Direct access to the cache, mainly for inspection.
    pub fn cache(&self) -> &PheromoneCache {
        &self.cache
    }

    fn resolve(
        &self,
        project_id: &str,
        results: Vec<RankedCandidate>,
        served_by: ServedBy,
        started: Instant,
    ) -> EngramResult<RecallResponse> {
        let duration_ms = started.elapsed().as_millis() as u64;
        let timing = Arc::clone(&self.timing);
        let project = project_id.to_string();
        let sample = LatencySample::now(duration_ms, served_by);
        tokio::spawn(async move {
            timing.append(&project, sample).await.ok();
        });
        info!(
            project_id,
            served_by = %served_by,
            duration_ms,
            results = results.len(),
            "recall resolved"
        );
        Ok(RecallResponse {
            results,
            served_by,
            duration_ms,
        })
    }
}

/// Fire-and-forget promotion of a ranked winner into the cache. Failures are
/// logged and swallowed; promotion is an optimization, not an obligation.
async fn promote_candidate(
    cache: Arc<PheromoneCache>,
    store: Arc<dyn IRecordStore>,
    embedder: Arc<dyn IEmbeddingProvider>,
    estimator: Arc<TokenEstimator>,
    record_id: String,
    known_embedding: Option<Vec<f32>>,
) {
    let content = match store.fetch_content(&record_id).await {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug!(record_id, "promotion skipped: record content missing");
            return;
        }
        Err(error) => {
            warn!(record_id, %error, "promotion skipped: content fetch failed");
            return;
        }
    };

    let embedding = match known_embedding {
        Some(embedding) => embedding,
        None => match embedder.embed(&content) {
            Ok(embedding) => embedding,
            Err(error) => {
                warn!(record_id, %error, "promotion skipped: embedding failed");
                return;
            }
        },
    };

    let token_estimate = estimator.estimate_cached(&content);
    cache.promote(&record_id, &content, embedding, token_estimate);
}

/// Builder for [`RecallEngine`]: explicit dependency injection, golden
/// corpus preload at build time.
pub struct RecallEngineBuilder {
    config: EngramConfig,
    store: Option<Arc<dyn IRecordStore>>,
    embedder: Option<Arc<dyn IEmbeddingProvider>>,
    timing: Option<Arc<dyn ITimingRecorder>>,
    golden: Vec<GoldenDoc>,
}

impl RecallEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngramConfig::default(),
            store: None,
            embedder: None,
            timing: None,
            golden: Vec::new(),
        }
    }

    pub fn config(mut self, config: EngramConfig) -> Self {
        self.config = config;
        self
    }

    /// The record store collaborator (required).
    pub fn store(mut self, store: Arc<dyn IRecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Embedding provider; the deterministic term-hash fallback is used when
    /// none is configured.
    pub fn embedder(mut self, embedder: Arc<dyn IEmbeddingProvider>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Timing recorder; an in-memory latency log is used when none is
    /// configured.
    pub fn timing(mut self, timing: Arc<dyn ITimingRecorder>) -> Self {
        self.timing = Some(timing);
        self
    }

    /// Golden corpus preloaded into the cache at build time.
    pub fn golden_corpus(mut self, docs: Vec<GoldenDoc>) -> Self {
        self.golden = docs;
        self
    }

    pub fn build(self) -> EngramResult<RecallEngine> {
        self.config.validate()?;
        let store = self.store.ok_or(ConfigError::Invalid {
            field: "record_store",
            reason: "a record store collaborator is required".to_string(),
        })?;
        let embedder = self
            .embedder
            .unwrap_or_else(|| Arc::new(FallbackEmbedder::default()));
        let timing = self
            .timing
            .unwrap_or_else(|| Arc::new(LatencyLog::new()));

        let estimator = Arc::new(TokenEstimator::new()?);
        let cache = Arc::new(PheromoneCache::new(self.config.cache.clone()));
        if !self.golden.is_empty() {
            let inserted = preload(&cache, &self.golden, embedder.as_ref(), &estimator)?;
            debug!(inserted, "cache warmed from golden corpus");
        }

        let ranker = Arc::new(HybridRanker::new(
            Arc::clone(&store),
            self.config.ranking.clone(),
            self.config.locality.clone(),
        ));

        Ok(RecallEngine {
            cache,
            ranker,
            store,
            embedder,
            timing,
            estimator,
            config: self.config,
            sweeper: Mutex::new(None),
        })
    }
}

impl Default for RecallEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
