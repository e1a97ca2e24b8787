//! Error taxonomy for the recall engine.
//!
//! Each subsystem has its own enum; `EngramError` aggregates them for
//! callers that cross subsystem boundaries. A cache miss is not an error —
//! it is a normal control-flow outcome and is modeled as `Option`/`None`.

mod cache_error;
mod config_error;
mod recall_error;
mod retrieval_error;

pub use cache_error::CacheError;
pub use config_error::ConfigError;
pub use recall_error::RecallError;
pub use retrieval_error::RetrievalError;

/// Convenience alias used across the workspace.
pub type EngramResult<T> = Result<T, EngramError>;

/// Top-level error aggregating all subsystems.
#[derive(Debug, thiserror::Error)]
pub enum EngramError {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Recall(#[from] RecallError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
