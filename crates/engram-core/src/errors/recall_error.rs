/// Orchestrator-level errors surfaced by `recall`.
#[derive(Debug, thiserror::Error)]
pub enum RecallError {
    /// Empty query text with nothing to embed. Surfaced immediately; no race
    /// is started.
    #[error("invalid query: empty text and no embeddable content")]
    InvalidQuery,

    /// Both the cache and the retrieval path were exhausted because an
    /// upstream collaborator is unreachable. Distinct from a successful
    /// empty result.
    #[error("both recall paths failed: {reason}")]
    BothPathsFailed { reason: String },
}
