//! Eviction ordering.
//!
//! The victim is the minimum by `(pheromone asc, last_accessed asc,
//! created_at desc)`: lowest pheromone loses first; among equals the least
//! recently accessed; among those, the most recently created — it has had
//! the least time to prove its value.

use std::cmp::Ordering;

use crate::entry::CacheEntry;

fn victim_order(a: &CacheEntry, b: &CacheEntry) -> Ordering {
    a.pheromone
        .total_cmp(&b.pheromone)
        .then_with(|| a.last_accessed.cmp(&b.last_accessed))
        .then_with(|| b.created_at.cmp(&a.created_at))
}

/// Key of the entry that loses under the eviction ordering, if any.
pub(crate) fn select_victim<'a, I>(entries: I) -> Option<String>
where
    I: Iterator<Item = &'a CacheEntry>,
{
    entries.min_by(|a, b| victim_order(a, b)).map(|e| e.key.clone())
}
