//! Configuration data models
//!
//! This module defines all configuration structures used throughout the checker.

#![allow(missing_docs)]

pub mod batch;
pub mod checker;
pub mod events;
pub mod logging;
pub mod server;
pub mod storage;
pub mod verification;

pub use batch::*;
pub use checker::*;
pub use events::*;
pub use logging::*;
pub use server::*;
pub use storage::*;
pub use verification::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Default bound on simultaneously processed records
pub fn default_max_concurrent() -> usize {
    5
}

/// Default pause after each record, in milliseconds
pub fn default_delay_between_ms() -> u64 {
    500
}

pub fn default_success_rate() -> f64 {
    0.70
}

pub fn default_challenge_rate() -> f64 {
    0.30
}

pub fn default_verify_timeout() -> u64 {
    30
}

pub fn default_results_dir() -> String {
    "results".to_string()
}

pub fn default_queue_capacity() -> usize {
    1024
}

pub fn default_observer_buffer() -> usize {
    256
}

pub fn default_log_level() -> String {
    "info".to_string()
}
