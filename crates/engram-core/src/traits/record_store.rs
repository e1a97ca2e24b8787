use async_trait::async_trait;

use crate::errors::EngramResult;
use crate::types::{LexicalHit, RecentRow, VectorRow};

/// The relational record store holding the memory records.
///
/// Implementations store each record's embedding and locality key at write
/// time, using the same key derivation the ranker applies at query time.
/// Implementations carry their own upstream timeouts — a stalled store must
/// not hang a query forever.
#[async_trait]
pub trait IRecordStore: Send + Sync {
    /// Project-scoped full-text search.
    async fn text_search(&self, project_id: &str, query: &str) -> EngramResult<Vec<LexicalHit>>;

    /// Project-scoped window of records whose locality key falls in
    /// `[low_key, high_key]`, capped at `limit` rows.
    async fn fetch_by_locality_range(
        &self,
        project_id: &str,
        low_key: u64,
        high_key: u64,
        limit: usize,
    ) -> EngramResult<Vec<VectorRow>>;

    /// The `limit` most recently created records for a project.
    async fn fetch_recent(&self, project_id: &str, limit: usize) -> EngramResult<Vec<RecentRow>>;

    /// Full content of one record, if it exists.
    async fn fetch_content(&self, record_id: &str) -> EngramResult<Option<String>>;
}
