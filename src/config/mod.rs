//! Configuration management for the checker
//!
//! This module handles loading, validation, and management of all checker configuration.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{CheckerError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the checker
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Checker configuration
    pub checker: CheckerConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CheckerError::Config(format!("Failed to read config file: {}", e)))?;

        let checker: CheckerConfig = serde_yaml::from_str(&content)
            .map_err(|e| CheckerError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { checker };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let checker = CheckerConfig::from_env()?;
        let config = Self { checker };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.checker.server
    }

    /// Get batch engine configuration
    pub fn batch(&self) -> &BatchConfig {
        &self.checker.batch
    }

    /// Get verification policy configuration
    pub fn verification(&self) -> &VerificationConfig {
        &self.checker.verification
    }

    /// Get result storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.checker.storage
    }

    /// Get event bus configuration
    pub fn events(&self) -> &EventsConfig {
        &self.checker.events
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.checker.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.checker.validate().map_err(CheckerError::Config)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.checker)
            .map_err(|e| CheckerError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
