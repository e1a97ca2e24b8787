/// Pheromone cache errors.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Internal bug class: eviction failed to restore the configured limits.
    /// Must never escape to callers of the public recall surface.
    #[error("capacity invariant violated: {items} items / {tokens} tokens after eviction")]
    CapacityInvariantViolation { items: usize, tokens: usize },

    #[error("tokenizer initialization failed: {reason}")]
    TokenizerInit { reason: String },

    #[error("golden corpus preload failed: {reason}")]
    PreloadFailed { reason: String },
}
