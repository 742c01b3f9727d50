//! Bounded-concurrency batch engine
//!
//! A [`BatchCoordinator`] accepts at most one batch at a time, runs each
//! record through the [`ItemProcessor`] with at most `max_concurrent`
//! records in flight, keeps the shared [`BatchState`] counters current and
//! persists both result partitions when the batch drains.

mod coordinator;
mod processor;
mod state;

pub use coordinator::{BatchCoordinator, BatchSummary, BatchTicket};
pub use processor::ItemProcessor;
pub use state::{BatchState, BatchStatus, Outcome, ProgressSnapshot, ResultArtifacts};
