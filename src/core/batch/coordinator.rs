//! Batch admission and the bounded worker pool

use super::processor::ItemProcessor;
use super::state::{BatchState, ProgressSnapshot, ResultArtifacts};
use crate::config::BatchConfig;
use crate::core::events::{Event, EventBus, EventLevel};
use crate::core::models::{LoginFailure, Record};
use crate::core::verification::LoginPolicy;
use crate::storage::{Partition, ResultStore};
use crate::utils::error::{CheckerError, Result};
use futures::FutureExt;
use serde_json::Value;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::{Mutex, Semaphore};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Final accounting of one batch
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub batch_id: String,
    pub snapshot: ProgressSnapshot,
    pub artifacts: ResultArtifacts,
    /// Records in input order, each in a terminal state
    pub records: Vec<Record>,
    pub elapsed: Duration,
}

/// Handle to an accepted batch
///
/// Dropping the ticket does not stop the batch.
#[derive(Debug)]
pub struct BatchTicket {
    pub batch_id: String,
    pub total: usize,
    pub accepted_at: chrono::DateTime<chrono::Utc>,
    handle: JoinHandle<BatchSummary>,
}

impl BatchTicket {
    /// Wait for the batch to finish
    pub async fn wait(self) -> Result<BatchSummary> {
        self.handle
            .await
            .map_err(|e| CheckerError::internal(format!("Batch task failed: {}", e)))
    }
}

struct CoordinatorInner {
    config: BatchConfig,
    state: Arc<BatchState>,
    bus: EventBus,
    processor: ItemProcessor,
    store: Arc<dyn ResultStore>,
    runtime: Handle,
    /// Serializes counter updates with their progress events
    progress_gate: Mutex<()>,
}

/// Accepts batches one at a time and drives them to completion
#[derive(Clone)]
pub struct BatchCoordinator {
    inner: Arc<CoordinatorInner>,
}

impl BatchCoordinator {
    /// Create a coordinator bound to the current Tokio runtime
    pub fn new(
        config: BatchConfig,
        state: Arc<BatchState>,
        bus: EventBus,
        policy: Arc<dyn LoginPolicy>,
        store: Arc<dyn ResultStore>,
    ) -> Result<Self> {
        let runtime = Handle::try_current()
            .map_err(|e| CheckerError::internal(format!("No async runtime available: {}", e)))?;
        let processor = ItemProcessor::new(policy, bus.clone(), config.step_delays.clone());

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                state,
                bus,
                processor,
                store,
                runtime,
                progress_gate: Mutex::new(()),
            }),
        })
    }

    pub fn state(&self) -> &Arc<BatchState> {
        &self.inner.state
    }

    /// Start processing `records` in the background
    ///
    /// Fails with [`CheckerError::Busy`] while another batch is active; no
    /// state is touched in that case.
    pub async fn submit(&self, records: Vec<Record>) -> Result<BatchTicket> {
        if records.is_empty() {
            return Err(CheckerError::validation("A batch needs at least one record"));
        }

        let mut seen = HashSet::with_capacity(records.len());
        if let Some(duplicate) = records.iter().find(|r| !seen.insert(r.id())) {
            return Err(CheckerError::validation(format!(
                "Duplicate record in batch: {}",
                duplicate.id()
            )));
        }

        let total = records.len();
        if !self.inner.state.try_begin(total) {
            warn!("Batch rejected, another batch is active");
            self.inner
                .bus
                .publish(Event::general(
                    EventLevel::Warn,
                    "Already processing accounts, please wait",
                    Value::Null,
                ))
                .await;
            return Err(CheckerError::Busy);
        }

        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, total, "Batch accepted");

        let handle = self
            .inner
            .runtime
            .spawn(Self::run(Arc::clone(&self.inner), batch_id.clone(), records));

        Ok(BatchTicket {
            batch_id,
            total,
            accepted_at: chrono::Utc::now(),
            handle,
        })
    }

    async fn run(inner: Arc<CoordinatorInner>, batch_id: String, records: Vec<Record>) -> BatchSummary {
        let started = Instant::now();
        let total = records.len();

        inner.bus.publish(Event::batch_started(total)).await;
        inner.bus.publish(Event::progress(&inner.state.snapshot())).await;

        let gate = Arc::new(Semaphore::new(inner.config.max_concurrent.max(1)));
        let mut units = JoinSet::new();
        let mut finished: Vec<Option<Record>> = vec![None; total];

        for (index, record) in records.iter().cloned().enumerate() {
            let permit = match Arc::clone(&gate).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!(batch_id = %batch_id, "Concurrency gate closed: {}", e);
                    break;
                }
            };

            let inner = Arc::clone(&inner);
            units.spawn(async move {
                let unit = AssertUnwindSafe(Self::process_one(&inner, record))
                    .catch_unwind()
                    .await;
                drop(permit);
                (index, unit.ok())
            });
        }

        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((index, Some(record))) => finished[index] = Some(record),
                Ok((index, None)) => error!(batch_id = %batch_id, index, "Record unit panicked"),
                Err(e) => error!(batch_id = %batch_id, "Record unit failed: {}", e),
            }
        }

        // every record ends terminal and counted, even if its unit died
        let mut outcomes = Vec::with_capacity(total);
        for (slot, original) in finished.into_iter().zip(records) {
            let record = match slot {
                Some(record) => record,
                None => {
                    let mut record = original;
                    record.fail(LoginFailure::item_fault("Record processing was interrupted"));
                    Self::count(&inner, &record).await;
                    record
                }
            };
            outcomes.push(record);
        }

        let artifacts = Self::persist(&inner, &outcomes).await;
        inner.state.record_artifacts(artifacts.clone());
        inner.bus.publish(Event::result_files(&artifacts)).await;

        let snapshot = inner.state.snapshot();
        inner.bus.publish(Event::summary(&snapshot)).await;
        inner.state.finish();

        info!(
            batch_id = %batch_id,
            succeeded = snapshot.succeeded,
            failed = snapshot.failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Batch finished"
        );

        BatchSummary {
            batch_id,
            snapshot,
            artifacts,
            records: outcomes,
            elapsed: started.elapsed(),
        }
    }

    async fn process_one(inner: &CoordinatorInner, record: Record) -> Record {
        inner.state.enter();
        let record = inner.processor.process(record).await;
        Self::count(inner, &record).await;

        let pause = inner.config.delay_between();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        record
    }

    async fn count(inner: &CoordinatorInner, record: &Record) {
        let _gate = inner.progress_gate.lock().await;
        let snapshot = inner.state.update(record.status.into());
        inner.bus.publish(Event::progress(&snapshot)).await;
    }

    async fn persist(inner: &CoordinatorInner, records: &[Record]) -> ResultArtifacts {
        let mut artifacts = ResultArtifacts::default();

        for partition in [Partition::Succeeded, Partition::Failed] {
            match inner.store.write_result_file(records, partition).await {
                Ok(name) => match partition {
                    Partition::Succeeded => artifacts.success_file = Some(name),
                    Partition::Failed => artifacts.fail_file = Some(name),
                },
                Err(e) => {
                    error!("Failed to save {} results: {}", partition.prefix(), e);
                    inner
                        .bus
                        .publish(Event::persistence_failed(partition.prefix(), &e.to_string()))
                        .await;
                }
            }
        }

        artifacts
    }
}
