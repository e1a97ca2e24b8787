//! Shared fixtures for integration tests across the workspace: an in-memory
//! record store with call counters and failure injection, plus logging init.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Once, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use engram_core::config::LocalityConfig;
use engram_core::errors::{EngramResult, RetrievalError};
use engram_core::traits::IRecordStore;
use engram_core::types::{LexicalHit, RecentRow, VectorRow};
use engram_retrieval::locality;

/// One stored record. The locality key is computed at write time with the
/// same mapping the ranker uses at query time.
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub id: String,
    pub project_id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub locality_key: u64,
    pub created_at: DateTime<Utc>,
}

/// Per-operation call counters.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub text_search: AtomicUsize,
    pub locality_range: AtomicUsize,
    pub recent: AtomicUsize,
    pub content: AtomicUsize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.text_search.load(Ordering::SeqCst)
            + self.locality_range.load(Ordering::SeqCst)
            + self.recent.load(Ordering::SeqCst)
            + self.content.load(Ordering::SeqCst)
    }
}

/// In-memory `IRecordStore` for tests.
pub struct InMemoryRecordStore {
    records: RwLock<Vec<StoredRecord>>,
    locality: LocalityConfig,
    pub calls: CallCounts,
    fail_text_search: AtomicBool,
    fail_recent: AtomicBool,
    fail_locality_remaining: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new(locality: LocalityConfig) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            locality,
            calls: CallCounts::default(),
            fail_text_search: AtomicBool::new(false),
            fail_recent: AtomicBool::new(false),
            fail_locality_remaining: AtomicUsize::new(0),
        }
    }

    /// Insert a record, deriving its locality key from the embedding.
    /// Returns the generated record id.
    pub fn insert(
        &self,
        project_id: &str,
        content: &str,
        embedding: Vec<f32>,
        created_at: DateTime<Utc>,
    ) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let key = locality::locality_key(&embedding, &self.locality);
        self.records
            .write()
            .expect("fixture store lock")
            .push(StoredRecord {
                id: id.clone(),
                project_id: project_id.to_string(),
                content: content.to_string(),
                embedding,
                locality_key: key,
                created_at,
            });
        id
    }

    pub fn set_fail_text_search(&self, fail: bool) {
        self.fail_text_search.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_recent(&self, fail: bool) {
        self.fail_recent.store(fail, Ordering::SeqCst);
    }

    /// Make the next `n` locality-range calls fail.
    pub fn fail_next_locality_calls(&self, n: usize) {
        self.fail_locality_remaining.store(n, Ordering::SeqCst);
    }

    /// Simulate an unreachable store: every operation fails.
    pub fn fail_everything(&self) {
        self.set_fail_text_search(true);
        self.set_fail_recent(true);
        self.fail_next_locality_calls(usize::MAX);
    }

    /// Query-token overlap in [0, 1]: matched query tokens over total query
    /// tokens.
    fn lexical_score(query: &str, content: &str) -> f64 {
        let query_tokens = tokenize(query);
        if query_tokens.is_empty() {
            return 0.0;
        }
        let content_tokens = tokenize(content);
        let matched = query_tokens
            .iter()
            .filter(|t| content_tokens.contains(*t))
            .count();
        matched as f64 / query_tokens.len() as f64
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.len() >= 2)
        .map(|s| s.to_lowercase())
        .collect()
}

#[async_trait]
impl IRecordStore for InMemoryRecordStore {
    async fn text_search(&self, project_id: &str, query: &str) -> EngramResult<Vec<LexicalHit>> {
        self.calls.text_search.fetch_add(1, Ordering::SeqCst);
        if self.fail_text_search.load(Ordering::SeqCst) {
            return Err(RetrievalError::upstream("text_search", "injected failure").into());
        }
        let records = self.records.read().expect("fixture store lock");
        let mut hits: Vec<LexicalHit> = records
            .iter()
            .filter(|r| r.project_id == project_id)
            .filter_map(|r| {
                let score = Self::lexical_score(query, &r.content);
                (score > 0.0).then(|| LexicalHit {
                    record_id: r.id.clone(),
                    score,
                    created_at: r.created_at,
                })
            })
            .collect();
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(hits)
    }

    async fn fetch_by_locality_range(
        &self,
        project_id: &str,
        low_key: u64,
        high_key: u64,
        limit: usize,
    ) -> EngramResult<Vec<VectorRow>> {
        self.calls.locality_range.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fail_locality_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != usize::MAX {
                self.fail_locality_remaining
                    .store(remaining - 1, Ordering::SeqCst);
            }
            return Err(
                RetrievalError::upstream("fetch_by_locality_range", "injected failure").into(),
            );
        }
        let records = self.records.read().expect("fixture store lock");
        Ok(records
            .iter()
            .filter(|r| {
                r.project_id == project_id
                    && r.locality_key >= low_key
                    && r.locality_key <= high_key
            })
            .take(limit)
            .map(|r| VectorRow {
                record_id: r.id.clone(),
                embedding: r.embedding.clone(),
                created_at: r.created_at,
            })
            .collect())
    }

    async fn fetch_recent(&self, project_id: &str, limit: usize) -> EngramResult<Vec<RecentRow>> {
        self.calls.recent.fetch_add(1, Ordering::SeqCst);
        if self.fail_recent.load(Ordering::SeqCst) {
            return Err(RetrievalError::upstream("fetch_recent", "injected failure").into());
        }
        let records = self.records.read().expect("fixture store lock");
        let mut rows: Vec<RecentRow> = records
            .iter()
            .filter(|r| r.project_id == project_id)
            .map(|r| RecentRow {
                record_id: r.id.clone(),
                created_at: r.created_at,
            })
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn fetch_content(&self, record_id: &str) -> EngramResult<Option<String>> {
        self.calls.content.fetch_add(1, Ordering::SeqCst);
        let records = self.records.read().expect("fixture store lock");
        Ok(records
            .iter()
            .find(|r| r.id == record_id)
            .map(|r| r.content.clone()))
    }
}

/// Initialize tracing for integration tests; safe to call repeatedly.
pub fn init_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init()
            .ok();
    });
}
