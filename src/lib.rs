//! # orbit-kernel
//!
//! Deterministic canonical-form reduction and deduplicating bulk
//! enumeration for symmetry-acted spaces.
//!
//! The kernel answers two questions:
//!
//! > Which single representative stands for everything symmetry-equivalent
//! > to this object, and how do I stream candidates into a store without
//! > recording the same orbit twice?
//!
//! ## Core Contract
//!
//! 1. Given an object and a deterministic range of group actions, select
//!    the orbit's maximal element under a total order, together with the
//!    action mapping onto it and the subgroup fixing the object
//! 2. Stream generator batches through filter → canonicalize →
//!    dedup-insert into a cell store and an object store, with
//!    reproducible counters and an ordered two-store commit
//!
//! ## Architecture
//!
//! ```text
//! Generator → Filter → {DirectInsert | CanonicalEngine → Insert}
//!                                           │
//!                              CellStore ───┴─── ObjectStore
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Action ranges are slices; canonical tie-breaks follow slice order
//! - Batches run in supplied order, candidates in generator order
//! - Stores deduplicate by value with content-fingerprint handles
//! - A dry run reports the same counters as a real run

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cache;
pub mod engine;
pub mod fingerprint;
pub mod generators;
pub mod pipeline;
pub mod progress;
pub mod stabilizer;
pub mod store;
pub mod types;

// Re-exports
pub use types::{
    BasisOrder, Cell, Config, CrossCellOrder, GroupAction, PointOp, SitePermutation,
    WithinCellOrder, LATTICE_POINT_GROUP,
};
pub use engine::{CanonicalEngine, CanonicalOutcome, EngineError, SymCompare};
pub use stabilizer::{orbit_of, orbit_size, stabilizer_of, Stabilizer};
pub use fingerprint::{content_hash, content_hash_hex, to_stable_bytes};
pub use cache::{CacheStats, CanonicalCache};
pub use store::{DedupStore, InMemoryStore, InsertionOutcome, StoreError};
pub use progress::{CapturingProgress, NoOpProgress, ProgressEvent, ProgressSink, TracingProgress};
pub use pipeline::{
    enumerate_and_insert, make_canonical_and_insert, BatchReport, BatchStatus, CandidateSource,
    DatabaseReady, EnumerationBatch, EnumerationOptions, InputError, PipelineError, RunReport,
    StoreKind,
};
pub use generators::{AllOccupationsSource, DistinctOccupationsSource, OccEnumInput};

/// Schema version for all serialized kernel types.
/// Increment on breaking changes to any schema type.
pub const ORBIT_KERNEL_SCHEMA_VERSION: &str = "1.0.0";
