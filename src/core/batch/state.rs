//! Shared progress state of the running batch

use crate::core::models::RecordStatus;
use parking_lot::Mutex;
use serde::Serialize;

/// Terminal outcome of one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl From<RecordStatus> for Outcome {
    fn from(status: RecordStatus) -> Self {
        match status {
            RecordStatus::Succeeded => Outcome::Succeeded,
            _ => Outcome::Failed,
        }
    }
}

/// Consistent view of the counters at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ProgressSnapshot {
    pub processed: usize,
    pub total: usize,
    pub in_progress: usize,
    #[serde(rename = "success_count")]
    pub succeeded: usize,
    #[serde(rename = "fail_count")]
    pub failed: usize,
    /// Succeeded over processed, in percent
    pub success_rate: f64,
    /// Processed over total, in percent
    pub percent_complete: f64,
}

/// Names of the persisted result files of the last batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct ResultArtifacts {
    pub success_file: Option<String>,
    pub fail_file: Option<String>,
}

/// Everything `/status` reports about the engine
#[derive(Debug, Clone, Serialize)]
pub struct BatchStatus {
    pub active: bool,
    pub snapshot: ProgressSnapshot,
    pub artifacts: ResultArtifacts,
    pub peak_in_progress: usize,
}

#[derive(Debug, Default)]
struct Counters {
    active: bool,
    total: usize,
    processed: usize,
    in_progress: usize,
    peak_in_progress: usize,
    succeeded: usize,
    failed: usize,
    artifacts: ResultArtifacts,
}

impl Counters {
    fn snapshot(&self) -> ProgressSnapshot {
        let ratio = |num: usize, den: usize| {
            if den == 0 {
                0.0
            } else {
                num as f64 / den as f64 * 100.0
            }
        };

        ProgressSnapshot {
            processed: self.processed,
            total: self.total,
            in_progress: self.in_progress,
            succeeded: self.succeeded,
            failed: self.failed,
            success_rate: ratio(self.succeeded, self.processed),
            percent_complete: ratio(self.processed, self.total),
        }
    }
}

/// Counters of the current (or last) batch behind one lock
///
/// Every mutation and every snapshot takes the same lock, so readers never
/// observe `succeeded + failed != processed`.
#[derive(Debug, Default)]
pub struct BatchState {
    inner: Mutex<Counters>,
}

impl BatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the engine for a batch of `total` records
    ///
    /// Returns `false` without touching anything if a batch is active.
    pub fn try_begin(&self, total: usize) -> bool {
        let mut counters = self.inner.lock();
        if counters.active {
            return false;
        }
        *counters = Counters {
            active: true,
            total,
            ..Counters::default()
        };
        true
    }

    /// A worker picked up a record
    pub fn enter(&self) {
        let mut counters = self.inner.lock();
        counters.in_progress += 1;
        counters.peak_in_progress = counters.peak_in_progress.max(counters.in_progress);
    }

    /// A worker finished a record; returns the snapshot right after the update
    pub fn update(&self, outcome: Outcome) -> ProgressSnapshot {
        let mut counters = self.inner.lock();
        counters.in_progress = counters.in_progress.saturating_sub(1);
        counters.processed += 1;
        match outcome {
            Outcome::Succeeded => counters.succeeded += 1,
            Outcome::Failed => counters.failed += 1,
        }
        counters.snapshot()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn record_artifacts(&self, artifacts: ResultArtifacts) {
        self.inner.lock().artifacts = artifacts;
    }

    pub fn artifacts(&self) -> ResultArtifacts {
        self.inner.lock().artifacts.clone()
    }

    /// Release the engine for the next batch
    pub fn finish(&self) {
        self.inner.lock().active = false;
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().active
    }

    /// Highest number of records in flight at once during the batch
    pub fn peak_in_progress(&self) -> usize {
        self.inner.lock().peak_in_progress
    }

    pub fn status(&self) -> BatchStatus {
        let counters = self.inner.lock();
        BatchStatus {
            active: counters.active,
            snapshot: counters.snapshot(),
            artifacts: counters.artifacts.clone(),
            peak_in_progress: counters.peak_in_progress,
        }
    }
}
