//! Batch engine configuration

use super::*;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Batch engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Maximum number of records processed at the same time
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Pause applied after each record's counters are updated
    #[serde(default = "default_delay_between_ms")]
    pub delay_between_ms: u64,
    /// Stand-in latency for each verification step
    #[serde(default)]
    pub step_delays: StepDelays,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            delay_between_ms: default_delay_between_ms(),
            step_delays: StepDelays::default(),
        }
    }
}

impl BatchConfig {
    /// Configuration with every delay disabled, used by tests and benchmarks
    pub fn immediate(max_concurrent: usize) -> Self {
        Self {
            max_concurrent,
            delay_between_ms: 0,
            step_delays: StepDelays::none(),
        }
    }

    pub fn delay_between(&self) -> Duration {
        Duration::from_millis(self.delay_between_ms)
    }
}

/// Latency window of one step: `base_ms` plus up to `jitter_ms` of random extra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDelay {
    pub base_ms: u64,
    #[serde(default)]
    pub jitter_ms: u64,
}

impl StepDelay {
    pub const fn new(base_ms: u64, jitter_ms: u64) -> Self {
        Self { base_ms, jitter_ms }
    }

    /// Draw one concrete delay from the window
    pub fn sample(&self) -> Duration {
        let extra = if self.jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..self.jitter_ms)
        };
        Duration::from_millis(self.base_ms.saturating_add(extra))
    }
}

/// Per-step latency windows, in workflow order
///
/// Steps left out of the YAML keep their default window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StepDelays {
    pub init_session: StepDelay,
    pub send_credentials: StepDelay,
    pub fetch_account_info: StepDelay,
    pub fetch_transactions: StepDelay,
}

impl Default for StepDelays {
    fn default() -> Self {
        Self {
            init_session: StepDelay::new(500, 500),
            send_credentials: StepDelay::new(500, 1000),
            fetch_account_info: StepDelay::new(500, 800),
            fetch_transactions: StepDelay::new(500, 1000),
        }
    }
}

impl StepDelays {
    pub const fn none() -> Self {
        Self {
            init_session: StepDelay::new(0, 0),
            send_credentials: StepDelay::new(0, 0),
            fetch_account_info: StepDelay::new(0, 0),
            fetch_transactions: StepDelay::new(0, 0),
        }
    }
}
