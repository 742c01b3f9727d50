//! Configuration loading from environment variables

use super::models::*;
use crate::utils::error::{CheckerError, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

fn parse_var<T>(name: &str, target: &mut T) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Ok(raw) = env::var(name) {
        *target = raw
            .parse()
            .map_err(|e| CheckerError::Config(format!("Invalid {}: {}", name, e)))?;
    }
    Ok(())
}

impl CheckerConfig {
    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();

        if let Ok(host) = env::var("CHECKER_HOST") {
            config.server.host = host;
        }
        parse_var("CHECKER_PORT", &mut config.server.port)?;
        parse_var("CHECKER_MAX_CONCURRENT", &mut config.batch.max_concurrent)?;
        parse_var("CHECKER_DELAY_BETWEEN_MS", &mut config.batch.delay_between_ms)?;

        if let Ok(dir) = env::var("CHECKER_RESULTS_DIR") {
            config.storage.results_dir = dir;
        }
        if let Ok(mode) = env::var("CHECKER_VERIFY_MODE") {
            config.verification.mode = match mode.to_lowercase().as_str() {
                "simulated" => VerificationMode::Simulated,
                "remote" => VerificationMode::Remote,
                other => {
                    return Err(CheckerError::Config(format!(
                        "Invalid CHECKER_VERIFY_MODE: {}",
                        other
                    )));
                }
            };
        }
        if let Ok(endpoint) = env::var("CHECKER_VERIFY_ENDPOINT") {
            config.verification.endpoint = Some(endpoint);
        }
        if let Ok(level) = env::var("CHECKER_LOG_LEVEL") {
            config.logging.level = level;
        }

        debug!("Configuration loaded from environment variables");
        Ok(config)
    }
}
