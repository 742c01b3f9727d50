//! Deterministic login policies

use account_checker_rs::{AccountSnapshot, Credential, LoginFailure, LoginOutcome, LoginPolicy};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Succeeds exactly for a fixed set of usernames and records how many
/// logins ran at once
pub struct ScriptedPolicy {
    succeed: HashSet<String>,
    escaping: HashSet<String>,
    latency: Duration,
    running: AtomicUsize,
    peak: AtomicUsize,
    calls: AtomicUsize,
}

impl ScriptedPolicy {
    pub fn succeeding<I, S>(usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            succeed: usernames.into_iter().map(Into::into).collect(),
            escaping: HashSet::new(),
            latency: Duration::ZERO,
            running: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Every login takes `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Logins of these usernames panic with a payload that panics again when
    /// dropped, so the fault escapes the processor's own guard
    pub fn with_escaping_fault<I, S>(mut self, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.escaping = usernames.into_iter().map(Into::into).collect();
        self
    }

    /// Highest number of logins observed in flight at once
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

struct RecurringFault;

impl Drop for RecurringFault {
    fn drop(&mut self) {
        panic!("fault raised again while being discarded");
    }
}

pub fn account_for(username: &str) -> AccountSnapshot {
    AccountSnapshot {
        balance: 1000.0,
        last_deposit: 50.0,
        deposit_time: "2026-10-01 12:00:00".to_string(),
        deposit_txcode: format!("D{}", username.len()),
    }
}

#[async_trait]
impl LoginPolicy for ScriptedPolicy {
    async fn login(&self, credential: &Credential) -> LoginOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.running.fetch_sub(1, Ordering::SeqCst);

        if self.escaping.contains(&credential.username) {
            std::panic::panic_any(RecurringFault);
        }

        if self.succeed.contains(&credential.username) {
            LoginOutcome::Success(account_for(&credential.username))
        } else {
            LoginOutcome::Failure(LoginFailure::credential_rejected())
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
