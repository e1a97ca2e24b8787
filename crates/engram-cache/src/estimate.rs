//! Token estimation via cl100k BPE, with a content-hash cache in front.

use moka::sync::Cache;
use tiktoken_rs::CoreBPE;
use tracing::debug;

use engram_core::errors::{CacheError, EngramResult};

const ESTIMATE_CACHE_CAPACITY: u64 = 10_000;

/// Counts tokens for promoted and preloaded content.
///
/// Keys the front cache by blake3 content hash so repeated promotions of the
/// same chunk never re-encode.
pub struct TokenEstimator {
    bpe: CoreBPE,
    cache: Cache<String, usize>,
}

impl TokenEstimator {
    pub fn new() -> EngramResult<Self> {
        let bpe = tiktoken_rs::cl100k_base().map_err(|e| CacheError::TokenizerInit {
            reason: e.to_string(),
        })?;
        debug!("token estimator ready (cl100k)");
        Ok(Self {
            bpe,
            cache: Cache::builder().max_capacity(ESTIMATE_CACHE_CAPACITY).build(),
        })
    }

    /// Exact BPE token count, uncached.
    pub fn estimate(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Token count through the content-hash cache.
    pub fn estimate_cached(&self, text: &str) -> usize {
        let key = blake3::hash(text.as_bytes()).to_hex().to_string();
        if let Some(count) = self.cache.get(&key) {
            return count;
        }
        let count = self.estimate(text);
        self.cache.insert(key, count);
        count
    }
}
