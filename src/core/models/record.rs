//! Credential records and their outcome fields

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure code for rejected credentials
pub const AUTH_FAILED: &str = "AUTH_FAILED";
/// Failure code when the account system asks for a challenge (captcha)
pub const CAPTCHA_REQUIRED: &str = "CAPTCHA_REQUIRED";
/// Failure code for internal faults while processing one record
pub const ITEM_FAULT: &str = "ITEM_FAULT";

/// Lifecycle of a record inside a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RecordStatus {
    /// Loaded, not yet picked up by a worker
    #[default]
    Pending,
    /// A worker is processing it
    InFlight,
    /// Login verified
    Succeeded,
    /// Login rejected or processing faulted
    Failed,
}

impl RecordStatus {
    /// Whether the record reached its final state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Human readable label used in result files
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Not Processed",
            Self::InFlight => "Processing",
            Self::Succeeded => "Success",
            Self::Failed => "Failed",
        }
    }
}

/// Username/password pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Passwords never end up in logs
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Account data collected after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub balance: f64,
    pub last_deposit: f64,
    pub deposit_time: String,
    pub deposit_txcode: String,
}

/// Why a login did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFailure {
    pub code: String,
    pub details: String,
}

impl LoginFailure {
    pub fn new(code: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            details: details.into(),
        }
    }

    pub fn credential_rejected() -> Self {
        Self::new(AUTH_FAILED, "Login credentials are incorrect")
    }

    pub fn challenge_required() -> Self {
        Self::new(CAPTCHA_REQUIRED, "CAPTCHA verification required")
    }

    pub fn item_fault(details: impl Into<String>) -> Self {
        Self::new(ITEM_FAULT, details)
    }
}

/// One credential entry and its outcome
///
/// Only the worker that owns a record mutates it, and a terminal record is
/// never changed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub credential: Credential,
    pub status: RecordStatus,
    pub account: Option<AccountSnapshot>,
    pub failure: Option<LoginFailure>,
}

impl Record {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(username, password),
            status: RecordStatus::Pending,
            account: None,
            failure: None,
        }
    }

    /// Opaque key of the record
    pub fn id(&self) -> &str {
        &self.credential.username
    }

    pub fn mark_in_flight(&mut self) {
        if self.status == RecordStatus::Pending {
            self.status = RecordStatus::InFlight;
        }
    }

    pub fn succeed(&mut self, account: AccountSnapshot) {
        if self.status.is_terminal() {
            return;
        }
        self.account = Some(account);
        self.status = RecordStatus::Succeeded;
    }

    pub fn fail(&mut self, failure: LoginFailure) {
        if self.status.is_terminal() {
            return;
        }
        self.failure = Some(failure);
        self.status = RecordStatus::Failed;
    }
}
