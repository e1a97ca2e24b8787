//! Collaborator traits. The record store, timing recorder, and embedding
//! provider live outside this core; these traits are their seams.

mod embedding;
mod record_store;
mod timing;

pub use embedding::IEmbeddingProvider;
pub use record_store::IRecordStore;
pub use timing::ITimingRecorder;
