//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use url::Url;

impl Validate for CheckerConfig {
    fn validate(&self) -> Result<(), String> {
        self.server
            .validate()
            .map_err(|e| format!("Server config error: {}", e))?;
        self.batch
            .validate()
            .map_err(|e| format!("Batch config error: {}", e))?;
        self.verification
            .validate()
            .map_err(|e| format!("Verification config error: {}", e))?;
        self.storage
            .validate()
            .map_err(|e| format!("Storage config error: {}", e))?;
        self.events
            .validate()
            .map_err(|e| format!("Events config error: {}", e))?;
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if let Some(0) = self.workers {
            return Err("Worker count cannot be 0".to_string());
        }

        self.cors.validate()
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("max_concurrent must be at least 1".to_string());
        }
        Ok(())
    }
}

impl Validate for VerificationConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.success_rate) {
            return Err(format!(
                "success_rate must be between 0 and 1, got {}",
                self.success_rate
            ));
        }

        if !(0.0..=1.0).contains(&self.challenge_rate) {
            return Err(format!(
                "challenge_rate must be between 0 and 1, got {}",
                self.challenge_rate
            ));
        }

        if self.mode == VerificationMode::Remote {
            let endpoint = self
                .endpoint
                .as_deref()
                .ok_or_else(|| "remote mode requires an endpoint".to_string())?;
            let url = Url::parse(endpoint)
                .map_err(|e| format!("endpoint has invalid URL format: {}", e))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(format!(
                    "endpoint must use http:// or https:// scheme, got: {}",
                    url.scheme()
                ));
            }
            if self.timeout_secs == 0 {
                return Err("timeout_secs cannot be 0".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.results_dir.trim().is_empty() {
            return Err("results_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for EventsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.queue_capacity == 0 {
            return Err("queue_capacity must be at least 1".to_string());
        }
        if self.observer_buffer == 0 {
            return Err("observer_buffer must be at least 1".to_string());
        }
        Ok(())
    }
}
