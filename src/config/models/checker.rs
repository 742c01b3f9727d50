//! Top-level checker configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main checker configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CheckerConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Batch engine configuration
    pub batch: BatchConfig,
    /// Login policy configuration
    pub verification: VerificationConfig,
    /// Result artifact storage
    pub storage: StorageConfig,
    /// Event bus tuning
    pub events: EventsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}
