//! # Warda Store
//!
//! File-backed persistence for accepted replies and reviewer feedback.
//!
//! Replies that pass the validation pipeline are written as JSON files in a
//! sharded directory layout under the reply data directory; replies that fail
//! are never persisted. Listing tolerates corrupt or foreign files by
//! skipping them with a warning, so one bad record never takes the export
//! down.

pub mod error;
pub mod store;

pub use error::{ReplyStoreError, StoreResult};
pub use store::{ReplyRecord, ReplyStore};
