/// Retrieval-path errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    /// The record store (or another upstream collaborator) failed.
    #[error("upstream failure in {operation}: {reason}")]
    Upstream { operation: String, reason: String },

    #[error("embedding failed: {reason}")]
    Embedding { reason: String },
}

impl RetrievalError {
    pub fn upstream(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Upstream {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}
