//! Randomised stand-in login policy

use super::policy::{LoginOutcome, LoginPolicy};
use crate::core::models::{AccountSnapshot, Credential, LoginFailure};
use async_trait::async_trait;
use chrono::{Duration, Local};
use rand::Rng;

/// Succeeds with probability `success_rate`; a failure asks for a challenge
/// with probability `challenge_rate`, otherwise the credentials are rejected
#[derive(Debug, Clone)]
pub struct SimulatedPolicy {
    success_rate: f64,
    challenge_rate: f64,
}

impl SimulatedPolicy {
    pub fn new(success_rate: f64, challenge_rate: f64) -> Self {
        Self {
            success_rate: success_rate.clamp(0.0, 1.0),
            challenge_rate: challenge_rate.clamp(0.0, 1.0),
        }
    }

    /// Decide one outcome synchronously
    pub fn decide(&self) -> LoginOutcome {
        let mut rng = rand::thread_rng();

        if rng.gen_bool(self.success_rate) {
            let days_ago = rng.gen_range(0..30);
            let deposit_time = Local::now() - Duration::days(days_ago);

            LoginOutcome::Success(AccountSnapshot {
                balance: rng.gen_range(0..10_000_000u64) as f64 / 100.0,
                last_deposit: rng.gen_range(0..1_000_000u64) as f64 / 100.0,
                deposit_time: deposit_time.format("%Y-%m-%d %H:%M:%S").to_string(),
                deposit_txcode: format!("D{}", rng.gen_range(0..i64::MAX)),
            })
        } else if rng.gen_bool(self.challenge_rate) {
            LoginOutcome::Failure(LoginFailure::challenge_required())
        } else {
            LoginOutcome::Failure(LoginFailure::credential_rejected())
        }
    }
}

impl Default for SimulatedPolicy {
    fn default() -> Self {
        Self::new(0.70, 0.30)
    }
}

#[async_trait]
impl LoginPolicy for SimulatedPolicy {
    async fn login(&self, _credential: &Credential) -> LoginOutcome {
        self.decide()
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}
