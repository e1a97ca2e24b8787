//! # engram-recall
//!
//! The hedged execution orchestrator. Each query races the pheromone-cache
//! lookup against the hybrid retrieval path under an adaptive timing budget:
//! the cache leg starts immediately, the retrieval leg is armed behind a
//! hedge timer, and whichever finishes first with a usable answer wins.
//! Observed cache latencies feed back into future hedge delays.

mod delay;
mod embedding;
mod engine;
pub mod race;
mod timing;

pub use embedding::FallbackEmbedder;
pub use engine::{RecallEngine, RecallEngineBuilder};
pub use timing::LatencyLog;
