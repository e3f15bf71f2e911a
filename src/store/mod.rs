//! Deduplicating persistent stores.
//!
//! The pipeline writes into two store instances: a cell store and an
//! object store. Object entries reference cell entries, so the pipeline
//! registers cells first and commits the cell store first.

pub mod memory;

use serde::{Deserialize, Serialize};

/// Error type for store operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// Durable write failed at commit time.
    #[error("commit failed: {0}")]
    CommitFailed(String),
}

/// Result of inserting one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionOutcome<H> {
    /// Handle to the stored entry, new or preexisting.
    pub handle: H,
    /// True iff the value was not already present.
    pub was_new: bool,
}

/// Keyed, deduplicating container.
///
/// Insertion stages values in memory; `commit` makes the staged state
/// durable. Implementations deduplicate by value: inserting an existing
/// value returns the existing handle with `was_new == false`.
pub trait DedupStore<T> {
    /// Handle type identifying stored entries.
    type Handle: Copy + PartialEq;

    /// Number of staged entries.
    fn size(&self) -> usize;

    /// Stage a value, deduplicating by value.
    fn insert(&mut self, value: T) -> InsertionOutcome<Self::Handle>;

    /// Make the staged state durable.
    fn commit(&mut self) -> Result<(), StoreError>;
}

pub use memory::InMemoryStore;
