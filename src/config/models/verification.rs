//! Login policy configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Which login policy backs the item processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VerificationMode {
    /// Randomised stand-in outcomes
    #[default]
    Simulated,
    /// Ask a remote verification endpoint
    Remote,
}

/// Login policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    #[serde(default)]
    pub mode: VerificationMode,
    /// Probability that a simulated login succeeds
    #[serde(default = "default_success_rate")]
    pub success_rate: f64,
    /// Share of simulated failures that ask for a challenge instead of rejecting credentials
    #[serde(default = "default_challenge_rate")]
    pub challenge_rate: f64,
    /// Remote verification endpoint
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Remote request timeout in seconds
    #[serde(default = "default_verify_timeout")]
    pub timeout_secs: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            mode: VerificationMode::default(),
            success_rate: default_success_rate(),
            challenge_rate: default_challenge_rate(),
            endpoint: None,
            timeout_secs: default_verify_timeout(),
        }
    }
}
