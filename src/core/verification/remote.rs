//! Login policy backed by a remote verification endpoint
//!
//! The endpoint receives `{"username", "password"}` as JSON. A 2xx reply
//! carries `success` plus either the account fields or `error_code` and
//! `details`. Status 401/403 rejects the credentials, 428 asks for a
//! challenge, anything else is a fault of the record.

use super::policy::{LoginOutcome, LoginPolicy};
use crate::config::VerificationConfig;
use crate::core::models::{AccountSnapshot, AUTH_FAILED, Credential, LoginFailure};
use crate::utils::error::{CheckerError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginReply {
    success: bool,
    #[serde(default)]
    balance: f64,
    #[serde(default)]
    last_deposit: f64,
    #[serde(default)]
    deposit_time: String,
    #[serde(default)]
    deposit_txcode: String,
    #[serde(default)]
    error_code: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

impl From<LoginReply> for LoginOutcome {
    fn from(reply: LoginReply) -> Self {
        if reply.success {
            return LoginOutcome::Success(AccountSnapshot {
                balance: reply.balance,
                last_deposit: reply.last_deposit,
                deposit_time: reply.deposit_time,
                deposit_txcode: reply.deposit_txcode,
            });
        }

        LoginOutcome::Failure(LoginFailure::new(
            reply.error_code.unwrap_or_else(|| AUTH_FAILED.to_string()),
            reply
                .details
                .unwrap_or_else(|| "Login credentials are incorrect".to_string()),
        ))
    }
}

/// HTTP client for the verification endpoint
#[derive(Debug, Clone)]
pub struct RemoteLoginPolicy {
    client: Client,
    endpoint: String,
}

impl RemoteLoginPolicy {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckerError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &VerificationConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .ok_or_else(|| CheckerError::config("Remote verification requires an endpoint"))?;

        Self::new(endpoint, Duration::from_secs(config.timeout_secs))
    }

    async fn attempt(&self, credential: &Credential) -> std::result::Result<LoginOutcome, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&LoginRequest {
                username: &credential.username,
                password: &credential.password,
            })
            .send()
            .await?;

        let status = response.status();
        debug!(username = %credential.username, %status, "Verification endpoint replied");

        let outcome = match status {
            s if s.is_success() => response.json::<LoginReply>().await?.into(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                LoginOutcome::Failure(LoginFailure::credential_rejected())
            }
            StatusCode::PRECONDITION_REQUIRED => {
                LoginOutcome::Failure(LoginFailure::challenge_required())
            }
            s => LoginOutcome::Failure(LoginFailure::item_fault(format!(
                "Verification endpoint returned status {}",
                s.as_u16()
            ))),
        };

        Ok(outcome)
    }
}

#[async_trait]
impl LoginPolicy for RemoteLoginPolicy {
    async fn login(&self, credential: &Credential) -> LoginOutcome {
        match self.attempt(credential).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(username = %credential.username, "Verification request failed: {}", e);
                LoginOutcome::Failure(LoginFailure::item_fault(format!(
                    "Verification request failed: {}",
                    e
                )))
            }
        }
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}
