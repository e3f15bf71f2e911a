//! Run and batch progress reporting.
//!
//! Observability only: sinks receive counters, they never influence
//! control flow. There is no process-wide logging state; the pipeline
//! threads an explicit sink through the run.

use crate::pipeline::{BatchReport, RunReport};

/// Receiver for run and batch lifecycle events.
pub trait ProgressSink {
    /// A run is starting.
    fn run_started(&mut self, method: &str, dry_run: bool, objects_before: usize);

    /// A batch is starting.
    fn batch_started(&mut self, name: &str, dry_run: bool);

    /// A batch finished; counters are final for that batch.
    fn batch_finished(&mut self, report: &BatchReport, dry_run: bool);

    /// The run finished, including any commits.
    fn run_finished(&mut self, report: &RunReport);
}

fn dry_run_prefix(dry_run: bool) -> &'static str {
    if dry_run {
        "(dry run) "
    } else {
        ""
    }
}

/// Structured-logging sink backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn run_started(&mut self, method: &str, dry_run: bool, objects_before: usize) {
        tracing::info!(
            method,
            objects_before,
            "{}begin enumeration run",
            dry_run_prefix(dry_run)
        );
    }

    fn batch_started(&mut self, name: &str, dry_run: bool) {
        tracing::info!(batch = name, "{}enumerating", dry_run_prefix(dry_run));
    }

    fn batch_finished(&mut self, report: &BatchReport, dry_run: bool) {
        tracing::info!(
            batch = %report.name,
            accepted = report.accepted,
            new_inserted = report.new_inserted,
            filtered = report.filtered,
            status = ?report.status,
            "{}batch done",
            dry_run_prefix(dry_run)
        );
    }

    fn run_finished(&mut self, report: &RunReport) {
        tracing::info!(
            run_id = %report.run_id,
            objects_before = report.objects_before,
            objects_after = report.objects_after,
            committed = report.committed,
            "{}run done",
            dry_run_prefix(report.dry_run)
        );
    }
}

/// Sink that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressSink for NoOpProgress {
    fn run_started(&mut self, _method: &str, _dry_run: bool, _objects_before: usize) {}

    fn batch_started(&mut self, _name: &str, _dry_run: bool) {}

    fn batch_finished(&mut self, _report: &BatchReport, _dry_run: bool) {}

    fn run_finished(&mut self, _report: &RunReport) {}
}

/// One recorded progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A run started.
    RunStarted {
        /// Method name.
        method: String,
        /// Dry-run indicator.
        dry_run: bool,
        /// Object-store size at the start.
        objects_before: usize,
    },
    /// A batch started.
    BatchStarted {
        /// Batch name.
        name: String,
        /// Dry-run indicator.
        dry_run: bool,
    },
    /// A batch finished.
    BatchFinished {
        /// The batch's final report.
        report: BatchReport,
        /// Dry-run indicator.
        dry_run: bool,
    },
    /// The run finished.
    RunFinished {
        /// Object-store size at the end.
        objects_after: usize,
        /// Whether both stores committed.
        committed: bool,
    },
}

/// Sink that records events for assertions in tests.
#[derive(Debug, Clone, Default)]
pub struct CapturingProgress {
    /// Recorded events, in order.
    pub events: Vec<ProgressEvent>,
}

impl CapturingProgress {
    /// Create an empty capturing sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressSink for CapturingProgress {
    fn run_started(&mut self, method: &str, dry_run: bool, objects_before: usize) {
        self.events.push(ProgressEvent::RunStarted {
            method: method.to_string(),
            dry_run,
            objects_before,
        });
    }

    fn batch_started(&mut self, name: &str, dry_run: bool) {
        self.events.push(ProgressEvent::BatchStarted {
            name: name.to_string(),
            dry_run,
        });
    }

    fn batch_finished(&mut self, report: &BatchReport, dry_run: bool) {
        self.events.push(ProgressEvent::BatchFinished {
            report: report.clone(),
            dry_run,
        });
    }

    fn run_finished(&mut self, report: &RunReport) {
        self.events.push(ProgressEvent::RunFinished {
            objects_after: report.objects_after,
            committed: report.committed,
        });
    }
}
