//! The cache proper: lookup, reinforcement, promotion, evaporation, and
//! synchronous capacity enforcement under a single lock domain.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, trace, warn};

use engram_core::config::CacheConfig;
use engram_core::errors::{CacheError, EngramResult};
use engram_core::scoring::cosine_similarity;
use engram_core::types::CacheStatsSnapshot;

use crate::entry::CacheEntry;
use crate::eviction;
use crate::stats::CacheStats;

/// A successful lookup.
#[derive(Debug, Clone)]
pub struct CacheHit {
    pub key: String,
    pub content: String,
    pub similarity: f64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    total_tokens: usize,
}

/// Pheromone-reinforced content cache.
///
/// One instance per process, explicitly constructed and injected — never a
/// global. All mutation goes through this type; `total_tokens <= max_tokens`
/// and `entries.len() <= max_items` hold whenever the lock is released.
pub struct PheromoneCache {
    state: RwLock<CacheState>,
    config: CacheConfig,
    stats: CacheStats,
}

impl PheromoneCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            config,
            stats: CacheStats::default(),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Best-match lookup against every resident entry (linear scan; the
    /// working set is hundreds of entries). Returns a hit only when the best
    /// cosine similarity clears `match_threshold`; a hit reinforces the entry.
    pub fn lookup(&self, query_embedding: &[f32]) -> Option<CacheHit> {
        let best = {
            let state = self.read_state();
            let mut best: Option<(&CacheEntry, f64)> = None;
            for entry in state.entries.values() {
                let similarity = cosine_similarity(query_embedding, &entry.embedding);
                if best.map_or(true, |(_, b)| similarity > b) {
                    best = Some((entry, similarity));
                }
            }
            best.map(|(e, similarity)| (e.key.clone(), e.content.clone(), similarity))
        };

        match best {
            Some((key, content, similarity)) if similarity >= self.config.match_threshold => {
                self.reinforce(&key);
                self.stats.record_hit();
                trace!(key = %key, similarity, "cache hit");
                Some(CacheHit {
                    key,
                    content,
                    similarity,
                })
            }
            best => {
                self.stats.record_miss();
                trace!(
                    best_similarity = best.map(|b| b.2).unwrap_or(0.0),
                    "cache miss"
                );
                None
            }
        }
    }

    /// Boost an entry's pheromone by `hit_boost` (clamped) and touch its
    /// access time. Returns false if the key is not resident.
    pub fn reinforce(&self, key: &str) -> bool {
        let mut state = self.write_state();
        match state.entries.get_mut(key) {
            Some(entry) => {
                entry.pheromone = (entry.pheromone + self.config.hit_boost)
                    .clamp(self.config.pheromone_min, self.config.pheromone_max);
                entry.last_accessed = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Insert a new entry at `pheromone_initial`, then enforce capacity
    /// synchronously. A key that is already resident is left untouched, and
    /// an entry whose token estimate alone exceeds the budget is rejected
    /// rather than admitted at the cost of the entire working set.
    /// Returns whether the entry was inserted.
    pub fn promote(
        &self,
        key: &str,
        content: &str,
        embedding: Vec<f32>,
        token_estimate: usize,
    ) -> bool {
        if token_estimate > self.config.max_tokens {
            warn!(
                key,
                token_estimate,
                max_tokens = self.config.max_tokens,
                "rejecting promotion: entry exceeds the whole token budget"
            );
            return false;
        }

        let mut state = self.write_state();
        if state.entries.contains_key(key) {
            debug!(key, "promotion skipped: already resident");
            return false;
        }

        let pheromone = self
            .config
            .pheromone_initial
            .clamp(self.config.pheromone_min, self.config.pheromone_max);
        let entry = CacheEntry::new(key, content, embedding, token_estimate, pheromone);
        state.total_tokens += entry.token_estimate;
        state.entries.insert(entry.key.clone(), entry);
        self.enforce_capacity(&mut state);
        debug!(
            key,
            token_estimate,
            items = state.entries.len(),
            total_tokens = state.total_tokens,
            "promoted entry"
        );
        true
    }

    /// One evaporation pass: every entry's pheromone drops by `evap_rate`,
    /// clamped at `pheromone_min`. Never deletes entries.
    pub fn evaporate_tick(&self) {
        let mut state = self.write_state();
        for entry in state.entries.values_mut() {
            entry.pheromone = (entry.pheromone - self.config.evap_rate)
                .max(self.config.pheromone_min);
        }
        debug!(entries = state.entries.len(), "evaporation tick");
    }

    /// Point-in-time stats for operability.
    pub fn stats(&self) -> CacheStatsSnapshot {
        let state = self.read_state();
        let item_count = state.entries.len();
        let avg_pheromone = if item_count == 0 {
            0.0
        } else {
            state.entries.values().map(|e| e.pheromone).sum::<f64>() / item_count as f64
        };
        CacheStatsSnapshot {
            item_count,
            total_tokens: state.total_tokens,
            hit_rate: self.stats.hit_rate(),
            avg_pheromone,
        }
    }

    pub fn len(&self) -> usize {
        self.read_state().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.read_state().entries.contains_key(key)
    }

    /// Current pheromone level of an entry, if resident.
    pub fn pheromone(&self, key: &str) -> Option<f64> {
        self.read_state().entries.get(key).map(|e| e.pheromone)
    }

    /// Audit the capacity invariants. A violation is an internal bug class;
    /// eviction restores the limits inside the same operation that would
    /// break them, so this never fails on a correct build.
    pub fn check_invariants(&self) -> EngramResult<()> {
        let state = self.read_state();
        if state.total_tokens > self.config.max_tokens
            || state.entries.len() > self.config.max_items
        {
            return Err(CacheError::CapacityInvariantViolation {
                items: state.entries.len(),
                tokens: state.total_tokens,
            }
            .into());
        }
        Ok(())
    }

    /// Evict by `(pheromone asc, last_accessed asc, created_at desc)` until
    /// both limits hold. Runs inside the write lock, so no caller can observe
    /// an over-capacity state.
    fn enforce_capacity(&self, state: &mut RwLockWriteGuard<'_, CacheState>) {
        while state.total_tokens > self.config.max_tokens
            || state.entries.len() > self.config.max_items
        {
            let Some(victim) = eviction::select_victim(state.entries.values()) else {
                break;
            };
            if let Some(entry) = state.entries.remove(&victim) {
                state.total_tokens -= entry.token_estimate;
                debug!(
                    key = %victim,
                    pheromone = entry.pheromone,
                    freed_tokens = entry.token_estimate,
                    "evicted entry"
                );
            }
        }
        debug_assert!(
            state.total_tokens <= self.config.max_tokens
                && state.entries.len() <= self.config.max_items,
            "capacity invariant violated after eviction"
        );
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(|poisoned| {
            warn!("cache lock poisoned by a panicking thread; recovering");
            poisoned.into_inner()
        })
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(|poisoned| {
            warn!("cache lock poisoned by a panicking thread; recovering");
            poisoned.into_inner()
        })
    }
}
