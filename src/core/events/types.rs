//! Event data model and constructors for every event the engine emits

use crate::core::batch::{ProgressSnapshot, ResultArtifacts};
use crate::core::models::{AccountSnapshot, LoginFailure};
use serde::Serialize;
use serde_json::{Value, json};

/// Kind of an event, serialized as the `type` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    General,
    ProcessStart,
    Step,
    Result,
    Progress,
    Transaction,
    Error,
    ResultFiles,
}

/// Severity of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventLevel {
    Info,
    Warn,
    Error,
    Debug,
}

/// Ordered sub-steps of verifying one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    InitSession,
    SendCredentials,
    FetchAccountInfo,
    FetchTransactions,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Self::InitSession => 1,
            Self::SendCredentials => 2,
            Self::FetchAccountInfo => 3,
            Self::FetchTransactions => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitSession => "init_session",
            Self::SendCredentials => "send_credentials",
            Self::FetchAccountInfo => "fetch_account_info",
            Self::FetchTransactions => "fetch_transactions",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Self::InitSession => "Initialize login session",
            Self::SendCredentials => "Send login credentials",
            Self::FetchAccountInfo => "Fetch account information",
            Self::FetchTransactions => "Fetch transaction history",
        }
    }
}

/// One immutable, ephemeral event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    /// Wall-clock emission time, `HH:MM:SS`
    pub timestamp: String,
    pub level: EventLevel,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub data: Value,
}

impl Event {
    pub fn new(level: EventLevel, kind: EventKind, message: impl Into<String>, data: Value) -> Self {
        Self {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            level,
            message: message.into(),
            kind,
            data,
        }
    }

    pub fn general(level: EventLevel, message: impl Into<String>, data: Value) -> Self {
        Self::new(level, EventKind::General, message, data)
    }

    /// Whole-batch start
    pub fn batch_started(total: usize) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::ProcessStart,
            format!("Starting to process {} accounts", total),
            json!({ "total": total }),
        )
    }

    /// A worker picked up one record
    pub fn record_started(username: &str) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::ProcessStart,
            format!("Start processing account: {}", username),
            json!({ "username": username, "step": "start", "step_number": 0 }),
        )
    }

    pub fn step(username: &str, step: Step) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::Step,
            format!("Step {}: {}", step.number(), step.description()),
            json!({
                "username": username,
                "step": step.name(),
                "step_number": step.number(),
            }),
        )
    }

    pub fn result(username: &str, account: &AccountSnapshot) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::Result,
            "Account login succeeded",
            json!({
                "username": username,
                "success": true,
                "balance": account.balance,
                "last_deposit": account.last_deposit,
                "deposit_time": account.deposit_time,
                "deposit_txcode": account.deposit_txcode,
            }),
        )
    }

    /// Latest deposit of a verified account
    pub fn transaction(username: &str, account: &AccountSnapshot) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::Transaction,
            "Latest transaction",
            json!({
                "username": username,
                "transaction_number": account.deposit_txcode,
                "transaction_time": account.deposit_time,
                "transaction_type": 1,
                "amount": account.last_deposit,
                "balance_after": account.balance,
                "is_latest_deposit": true,
            }),
        )
    }

    pub fn login_failed(username: &str, failure: &LoginFailure) -> Self {
        Self::new(
            EventLevel::Error,
            EventKind::Error,
            "Account login failed",
            json!({
                "username": username,
                "error_code": failure.code,
                "details": failure.details,
            }),
        )
    }

    /// A result partition could not be written
    pub fn persistence_failed(partition: &str, details: &str) -> Self {
        Self::new(
            EventLevel::Error,
            EventKind::Error,
            format!("Error saving {} file", partition),
            json!({
                "error_code": "PERSISTENCE_FAILED",
                "partition": partition,
                "details": details,
            }),
        )
    }

    pub fn progress(snapshot: &ProgressSnapshot) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::Progress,
            "Processing progress",
            json!({
                "processed": snapshot.processed,
                "total": snapshot.total,
                "in_progress": snapshot.in_progress,
                "success_rate": snapshot.success_rate,
                "success_count": snapshot.succeeded,
                "fail_count": snapshot.failed,
                "percent_complete": snapshot.percent_complete,
            }),
        )
    }

    pub fn result_files(artifacts: &ResultArtifacts) -> Self {
        Self::new(
            EventLevel::Info,
            EventKind::ResultFiles,
            "Result files have been created",
            json!({
                "success_file": artifacts.success_file.as_deref().unwrap_or_default(),
                "fail_file": artifacts.fail_file.as_deref().unwrap_or_default(),
            }),
        )
    }

    /// Final totals of a batch
    pub fn summary(snapshot: &ProgressSnapshot) -> Self {
        Self::general(
            EventLevel::Info,
            "All accounts processed",
            json!({
                "total": snapshot.total,
                "success": snapshot.succeeded,
                "failed": snapshot.failed,
            }),
        )
    }

    /// Username the event is about, if any
    pub fn username(&self) -> Option<&str> {
        self.data.get("username").and_then(Value::as_str)
    }
}
