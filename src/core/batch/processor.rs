//! Per-record verification workflow

use crate::config::{StepDelay, StepDelays};
use crate::core::events::{Event, EventBus, Step};
use crate::core::models::{LoginFailure, Record};
use crate::core::verification::{LoginOutcome, LoginPolicy};
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};

/// Runs one record through the verification steps
///
/// Every outcome is classified onto the record; the processor itself never
/// fails.
#[derive(Clone)]
pub struct ItemProcessor {
    policy: Arc<dyn LoginPolicy>,
    bus: EventBus,
    delays: StepDelays,
}

impl ItemProcessor {
    pub fn new(policy: Arc<dyn LoginPolicy>, bus: EventBus, delays: StepDelays) -> Self {
        Self { policy, bus, delays }
    }

    async fn step(&self, username: &str, step: Step, delay: StepDelay) {
        self.bus.publish(Event::step(username, step)).await;

        let pause = delay.sample();
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
    }

    /// Process a record and return it in a terminal state
    pub async fn process(&self, mut record: Record) -> Record {
        let username = record.id().to_string();
        debug!(username = %username, "Processing record");

        self.bus.publish(Event::record_started(&username)).await;
        record.mark_in_flight();

        self.step(&username, Step::InitSession, self.delays.init_session)
            .await;
        self.step(&username, Step::SendCredentials, self.delays.send_credentials)
            .await;

        let outcome = AssertUnwindSafe(self.policy.login(&record.credential))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                error!(username = %username, "Login policy panicked");
                LoginOutcome::Failure(LoginFailure::item_fault(
                    "Internal error while verifying the account",
                ))
            });

        match outcome {
            LoginOutcome::Success(account) => {
                self.step(&username, Step::FetchAccountInfo, self.delays.fetch_account_info)
                    .await;
                self.step(&username, Step::FetchTransactions, self.delays.fetch_transactions)
                    .await;

                self.bus.publish(Event::transaction(&username, &account)).await;
                self.bus.publish(Event::result(&username, &account)).await;
                record.succeed(account);
            }
            LoginOutcome::Failure(failure) => {
                self.bus.publish(Event::login_failed(&username, &failure)).await;
                record.fail(failure);
            }
        }

        record
    }
}
