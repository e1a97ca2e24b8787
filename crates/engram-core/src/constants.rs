/// Engram system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimensionality of the fallback term-hash embedder.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;

/// Widening factor applied to the locality range radius when the first
/// prefilter query fails and is retried.
pub const LOCALITY_RETRY_WIDEN_FACTOR: u64 = 8;

/// Maximum latency samples retained per project by the in-memory recorder.
pub const MAX_LATENCY_SAMPLES_PER_PROJECT: usize = 1024;
