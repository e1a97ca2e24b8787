//! # engram-cache
//!
//! Pheromone-reinforced in-memory cache: a bounded working set of high-value
//! content chunks. Repeated access reinforces an entry's survival priority,
//! disuse decays it, and capacity pressure evicts the least-reinforced
//! entries first.

mod cache;
mod entry;
mod estimate;
mod eviction;
mod golden;
mod stats;
mod sweeper;

pub use cache::{CacheHit, PheromoneCache};
pub use entry::CacheEntry;
pub use estimate::TokenEstimator;
pub use golden::{corpus_from_json, preload, GoldenDoc};
pub use sweeper::EvaporationSweeper;
