//! Event bus configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Event bus configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Capacity of the bus command queue shared by all publishers
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Outbound buffer per observer; an observer that falls this far behind is dropped
    #[serde(default = "default_observer_buffer")]
    pub observer_buffer: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            observer_buffer: default_observer_buffer(),
        }
    }
}
