//! # engram-retrieval
//!
//! The hybrid retrieval path: a locality-key prefilter narrows vector
//! candidates ahead of exact cosine comparison, and the ranker blends
//! lexical, vector, and recency signals into a single ordering with a
//! most-recent fallback when nothing clears the quality bars.

mod engine;
pub mod locality;

pub use engine::HybridRanker;
