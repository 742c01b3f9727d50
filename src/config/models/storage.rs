//! Result storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Result storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the success/fail artifacts
    #[serde(default = "default_results_dir")]
    pub results_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
        }
    }
}
