//! Fully wired batch engine for tests

use super::policies::ScriptedPolicy;
use super::stores::MemoryResultStore;
use account_checker_rs::config::{BatchConfig, EventsConfig};
use account_checker_rs::core::events::ObserverHandle;
use account_checker_rs::{BatchCoordinator, BatchState, EventBus};
use serde_json::Value;
use std::sync::Arc;

pub struct TestEngine {
    pub coordinator: BatchCoordinator,
    pub bus: EventBus,
    pub state: Arc<BatchState>,
    pub policy: Arc<ScriptedPolicy>,
    pub store: Arc<MemoryResultStore>,
}

impl TestEngine {
    /// Engine with zero delays; must be created inside a Tokio runtime
    pub fn new(max_concurrent: usize, policy: ScriptedPolicy) -> Self {
        Self::with_store(max_concurrent, policy, MemoryResultStore::new())
    }

    pub fn with_store(max_concurrent: usize, policy: ScriptedPolicy, store: MemoryResultStore) -> Self {
        let bus = EventBus::new(&EventsConfig {
            queue_capacity: 1024,
            observer_buffer: 4096,
        });
        let state = Arc::new(BatchState::new());
        let policy = Arc::new(policy);
        let store = Arc::new(store);

        let coordinator = BatchCoordinator::new(
            BatchConfig::immediate(max_concurrent),
            Arc::clone(&state),
            bus.clone(),
            policy.clone(),
            store.clone(),
        )
        .expect("coordinator needs a runtime");

        Self {
            coordinator,
            bus,
            state,
            policy,
            store,
        }
    }

    /// Every event the observer has been sent so far, parsed
    pub async fn drain(&self, observer: &mut ObserverHandle) -> Vec<Value> {
        // a bus round-trip flushes earlier broadcasts
        self.bus.observer_count().await;

        let mut events = Vec::new();
        while let Some(message) = observer.try_recv() {
            events.push(serde_json::from_str(&message).expect("event is JSON"));
        }
        events
    }
}
