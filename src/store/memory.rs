//! In-memory deduplicating store.
//!
//! BTreeMap-backed for deterministic iteration order. Durable state is a
//! committed snapshot held separately from the staged map; a dry run
//! stages work without ever touching it. Commit fault injection is built
//! in so callers can exercise abort paths.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{DedupStore, InsertionOutcome, StoreError};
use crate::fingerprint::content_hash;

/// In-memory deduplicating store with an explicit committed snapshot.
///
/// Handles are content fingerprints of the stored values.
#[derive(Debug, Clone)]
pub struct InMemoryStore<T: Ord> {
    staged: BTreeMap<T, u64>,
    committed: BTreeMap<T, u64>,
    fail_commits: bool,
    commit_attempts: usize,
}

impl<T: Ord + Clone + Serialize> InMemoryStore<T> {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            staged: BTreeMap::new(),
            committed: BTreeMap::new(),
            fail_commits: false,
            commit_attempts: 0,
        }
    }

    /// Number of committed (durable) entries.
    pub fn committed_size(&self) -> usize {
        self.committed.len()
    }

    /// Committed values in deterministic order.
    pub fn committed_values(&self) -> Vec<&T> {
        self.committed.keys().collect()
    }

    /// Staged values in deterministic order.
    pub fn staged_values(&self) -> Vec<&T> {
        self.staged.keys().collect()
    }

    /// True iff the value is staged.
    pub fn contains(&self, value: &T) -> bool {
        self.staged.contains_key(value)
    }

    /// Fault injection: make subsequent commits fail.
    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }

    /// Number of commit attempts so far, successful or not.
    pub fn commit_attempts(&self) -> usize {
        self.commit_attempts
    }
}

impl<T: Ord + Clone + Serialize> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone + Serialize> DedupStore<T> for InMemoryStore<T> {
    type Handle = u64;

    fn size(&self) -> usize {
        self.staged.len()
    }

    fn insert(&mut self, value: T) -> InsertionOutcome<u64> {
        if let Some(&handle) = self.staged.get(&value) {
            return InsertionOutcome {
                handle,
                was_new: false,
            };
        }
        let handle = content_hash(&value);
        self.staged.insert(value, handle);
        InsertionOutcome {
            handle,
            was_new: true,
        }
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        self.commit_attempts += 1;
        if self.fail_commits {
            return Err(StoreError::CommitFailed(
                "injected commit failure".to_string(),
            ));
        }
        self.committed = self.staged.clone();
        Ok(())
    }
}
