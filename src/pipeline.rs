//! Deduplicated bulk enumeration.
//!
//! Drives named batches of candidate generators into two linked stores.
//! The control flow:
//!
//! ```text
//! for (name, input) in batches:
//!   generator = make_generator(name, input)
//!   for candidate in generator:
//!     if filter rejects candidate: count it and skip
//!     if the generator guarantees db-ready output: insert directly
//!     else: insert the primitive canonical record
//!           (and the non-primitive record too, unless primitive_only)
//! unless dry_run:
//!   commit the cell store, then the object store
//! ```
//!
//! Every object insertion registers its cell first; an object entry never
//! references an unregistered cell, and the cell store commits first for
//! the same reason.
//!
//! ## Determinism Guarantees
//!
//! Batches run in supplied order and candidates in generator order, so
//! counters and final store state are reproducible for deterministic
//! generators and comparators. A dry run reports the same counters as a
//! real run and leaves durable state untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::EngineError;
use crate::progress::ProgressSink;
use crate::store::{DedupStore, StoreError};

/// One named unit of enumeration work. The input is opaque to the core;
/// only the generator factory inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnumerationBatch<I> {
    /// Batch name, used in reports and progress output.
    pub name: String,
    /// Input spec handed to the generator factory.
    pub input: I,
}

impl<I> EnumerationBatch<I> {
    /// Create a named batch.
    pub fn new(name: impl Into<String>, input: I) -> Self {
        Self {
            name: name.into(),
            input,
        }
    }
}

/// Rejected input spec.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("invalid input: {reason}")]
pub struct InputError {
    /// Why the spec was rejected.
    pub reason: String,
}

impl InputError {
    /// Create an input error.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Lazy, finite, non-restartable candidate stream.
pub trait CandidateSource: Iterator {
    /// True when every produced object is guaranteed already canonical and
    /// store-ready, letting the pipeline insert directly instead of
    /// canonicalizing. Guaranteed sources are trusted unconditionally; no
    /// extra orbit check is performed.
    fn is_guaranteed_db_ready(&self) -> bool {
        false
    }
}

/// Narrow interface the pipeline needs from a candidate object.
pub trait DatabaseReady: Sized + Clone + Ord {
    /// The cell type registered in the cell store.
    type Cell: Clone + Ord;

    /// The cell this object is defined on.
    fn cell(&self) -> Self::Cell;

    /// Smallest-period re-expression of this object.
    fn primitive(&self) -> Self;

    /// Canonical cell plus canonical form within it.
    fn canonical_record(&self) -> Result<Self, EngineError>;
}

/// Options controlling one enumeration run.
pub struct EnumerationOptions<T> {
    /// Name of the enumeration method, for reports and progress output.
    pub method_name: String,
    /// Optional candidate filter, applied before any canonicalization
    /// work.
    pub filter: Option<Box<dyn Fn(&T) -> bool>>,
    /// When set, only the primitive canonical record is inserted.
    pub primitive_only: bool,
    /// When set, all computation and counting proceeds but commits are
    /// skipped.
    pub dry_run: bool,
}

impl<T> EnumerationOptions<T> {
    /// Options with no filter, primitive-only unset, and dry-run off.
    pub fn new(method_name: impl Into<String>) -> Self {
        Self {
            method_name: method_name.into(),
            filter: None,
            primitive_only: false,
            dry_run: false,
        }
    }

    /// Set the candidate filter.
    pub fn with_filter(mut self, filter: impl Fn(&T) -> bool + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Set the primitive-only flag.
    pub fn primitive_only(mut self, primitive_only: bool) -> Self {
        self.primitive_only = primitive_only;
        self
    }

    /// Set the dry-run flag.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Terminal state of one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// The generator ran to exhaustion.
    Completed,
    /// The generator factory rejected the input spec; the batch produced
    /// nothing.
    InvalidInput {
        /// Why the spec was rejected.
        reason: String,
    },
    /// Canonicalization failed on a candidate; the batch stopped there.
    Failed {
        /// Index of the failing candidate in generator order.
        object_index: usize,
        /// What went wrong.
        reason: String,
    },
}

/// Per-batch counters and terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Batch name.
    pub name: String,
    /// Candidates that passed the filter.
    pub accepted: usize,
    /// Objects newly inserted into the object store.
    pub new_inserted: usize,
    /// Candidates rejected by the filter.
    pub filtered: usize,
    /// How the batch ended.
    pub status: BatchStatus,
}

/// Run-wide counters and per-batch reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// Name of the enumeration method.
    pub method_name: String,
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Object-store size before the run.
    pub objects_before: usize,
    /// Object-store size after the run.
    pub objects_after: usize,
    /// One report per batch, in batch order.
    pub batches: Vec<BatchReport>,
    /// True iff both stores committed.
    pub committed: bool,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    /// Objects added by this run.
    pub fn new_inserted(&self) -> usize {
        self.objects_after - self.objects_before
    }
}

/// Which store a commit failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreKind {
    /// The cell store.
    Cell,
    /// The object store.
    Object,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKind::Cell => write!(f, "cell"),
            StoreKind::Object => write!(f, "object"),
        }
    }
}

/// Error type for enumeration runs.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A durable commit failed and the run aborted. The report carries the
    /// in-memory progress made before the failure; when the cell store is
    /// the one that failed, the object-store commit was never attempted.
    #[error("{store} store commit failed: {source}")]
    CommitFailed {
        /// Which store failed to commit.
        store: StoreKind,
        /// Counters accumulated before the failure.
        report: RunReport,
        /// The underlying store error.
        #[source]
        source: StoreError,
    },
}

/// Canonicalize one candidate and insert it, registering its cell first.
///
/// Inserts the primitive canonical record; when `primitive_only` is false
/// and the candidate's own canonical record differs from the primitive
/// one, inserts that as well. Returns the number of newly inserted
/// objects.
pub fn make_canonical_and_insert<T, SC, SO>(
    object: &T,
    cell_store: &mut SC,
    object_store: &mut SO,
    primitive_only: bool,
) -> Result<usize, EngineError>
where
    T: DatabaseReady,
    SC: DedupStore<T::Cell>,
    SO: DedupStore<T>,
{
    let primitive = object.primitive().canonical_record()?;
    let mut new_inserted = 0;

    cell_store.insert(primitive.cell());
    if object_store.insert(primitive.clone()).was_new {
        new_inserted += 1;
    }

    if !primitive_only {
        let full = object.canonical_record()?;
        if full != primitive {
            cell_store.insert(full.cell());
            if object_store.insert(full).was_new {
                new_inserted += 1;
            }
        }
    }

    Ok(new_inserted)
}

/// Run every batch through filter, canonicalization, and insertion, then
/// commit both stores unless `dry_run` is set.
///
/// A rejected input spec or a canonicalization failure ends that batch and
/// is recorded on its report; remaining batches still run. A commit
/// failure aborts the run with [`PipelineError::CommitFailed`].
pub fn enumerate_and_insert<I, T, G, F, SC, SO>(
    options: &EnumerationOptions<T>,
    mut make_generator: F,
    batches: &[EnumerationBatch<I>],
    cell_store: &mut SC,
    object_store: &mut SO,
    progress: &mut dyn ProgressSink,
) -> Result<RunReport, PipelineError>
where
    T: DatabaseReady,
    G: CandidateSource<Item = T>,
    F: FnMut(&str, &I) -> Result<G, InputError>,
    SC: DedupStore<T::Cell>,
    SO: DedupStore<T>,
{
    let started_at = Utc::now();
    let objects_before = object_store.size();
    progress.run_started(&options.method_name, options.dry_run, objects_before);

    let mut batch_reports = Vec::with_capacity(batches.len());
    for batch in batches {
        progress.batch_started(&batch.name, options.dry_run);
        let report = run_batch(options, &mut make_generator, batch, cell_store, object_store);
        progress.batch_finished(&report, options.dry_run);
        batch_reports.push(report);
    }

    let mut report = RunReport {
        run_id: Uuid::new_v4(),
        method_name: options.method_name.clone(),
        dry_run: options.dry_run,
        objects_before,
        objects_after: object_store.size(),
        batches: batch_reports,
        committed: false,
        started_at,
        finished_at: Utc::now(),
    };

    if !options.dry_run {
        if let Err(source) = cell_store.commit() {
            tracing::error!(error = %source, "cell store commit failed; object store commit skipped");
            report.finished_at = Utc::now();
            return Err(PipelineError::CommitFailed {
                store: StoreKind::Cell,
                report,
                source,
            });
        }
        if let Err(source) = object_store.commit() {
            tracing::error!(error = %source, "object store commit failed");
            report.finished_at = Utc::now();
            return Err(PipelineError::CommitFailed {
                store: StoreKind::Object,
                report,
                source,
            });
        }
        report.committed = true;
    }

    report.finished_at = Utc::now();
    progress.run_finished(&report);
    Ok(report)
}

fn run_batch<I, T, G, F, SC, SO>(
    options: &EnumerationOptions<T>,
    make_generator: &mut F,
    batch: &EnumerationBatch<I>,
    cell_store: &mut SC,
    object_store: &mut SO,
) -> BatchReport
where
    T: DatabaseReady,
    G: CandidateSource<Item = T>,
    F: FnMut(&str, &I) -> Result<G, InputError>,
    SC: DedupStore<T::Cell>,
    SO: DedupStore<T>,
{
    let mut report = BatchReport {
        name: batch.name.clone(),
        accepted: 0,
        new_inserted: 0,
        filtered: 0,
        status: BatchStatus::Completed,
    };

    let generator = match make_generator(&batch.name, &batch.input) {
        Ok(generator) => generator,
        Err(error) => {
            tracing::warn!(batch = %batch.name, error = %error, "input spec rejected");
            report.status = BatchStatus::InvalidInput {
                reason: error.reason,
            };
            return report;
        }
    };

    let guaranteed = generator.is_guaranteed_db_ready();
    for (object_index, candidate) in generator.enumerate() {
        if let Some(filter) = &options.filter {
            if !filter(&candidate) {
                report.filtered += 1;
                continue;
            }
        }
        report.accepted += 1;

        if guaranteed {
            cell_store.insert(candidate.cell());
            if object_store.insert(candidate).was_new {
                report.new_inserted += 1;
            }
        } else {
            match make_canonical_and_insert(
                &candidate,
                cell_store,
                object_store,
                options.primitive_only,
            ) {
                Ok(new_inserted) => report.new_inserted += new_inserted,
                Err(error) => {
                    tracing::error!(
                        batch = %batch.name,
                        object_index,
                        error = %error,
                        "canonicalization failed"
                    );
                    report.status = BatchStatus::Failed {
                        object_index,
                        reason: error.to_string(),
                    };
                    return report;
                }
            }
        }
    }

    report
}
