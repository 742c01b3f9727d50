//! Login policy trait

use super::{RemoteLoginPolicy, SimulatedPolicy};
use crate::config::{VerificationConfig, VerificationMode};
use crate::core::models::{AccountSnapshot, Credential, LoginFailure};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Result of one login attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(AccountSnapshot),
    Failure(LoginFailure),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Decides whether a credential logs in
///
/// Implementations classify every problem as a [`LoginFailure`]; they never
/// return errors to the caller.
#[async_trait]
pub trait LoginPolicy: Send + Sync {
    async fn login(&self, credential: &Credential) -> LoginOutcome;

    /// Policy name for logs
    fn name(&self) -> &'static str;
}

/// Build the policy selected by the configuration
pub fn build_policy(config: &VerificationConfig) -> Result<Arc<dyn LoginPolicy>> {
    let policy: Arc<dyn LoginPolicy> = match config.mode {
        VerificationMode::Simulated => Arc::new(SimulatedPolicy::new(
            config.success_rate,
            config.challenge_rate,
        )),
        VerificationMode::Remote => Arc::new(RemoteLoginPolicy::from_config(config)?),
    };

    info!("Using {} login policy", policy.name());
    Ok(policy)
}
