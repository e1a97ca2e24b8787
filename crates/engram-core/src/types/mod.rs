//! Shared data types: ranked candidates, collaborator rows, latency samples,
//! and cache stats.

mod candidate;
mod latency;
mod rows;
mod stats;

pub use candidate::{RankedCandidate, RecallResponse, ServedBy};
pub use latency::LatencySample;
pub use rows::{LexicalHit, RecentRow, VectorRow};
pub use stats::CacheStatsSnapshot;
