//! # Account-Checker-RS
//!
//! Concurrent account credential checker: a credential file is ingested,
//! every record is verified with bounded parallelism, progress streams to
//! WebSocket observers in real time and outcomes land in two CSV result
//! files (succeeded / failed).
//!
//! ## Features
//!
//! - **At most one batch in flight**: a second submission is rejected, never queued
//! - **Bounded worker pool**: `max_concurrent` records verified at once
//! - **Live event stream**: one bus actor fans events out to every observer
//! - **Pluggable verification**: simulated or remote login policy
//!
//! ## Server Mode
//!
//! ```rust,no_run
//! use account_checker_rs::{Checker, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/checker.yaml").await?;
//!     let checker = Checker::new(config).await?;
//!     checker.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{CheckerError, ParseError, Result};

pub use core::batch::{BatchCoordinator, BatchState, BatchSummary, BatchTicket, ProgressSnapshot};
pub use core::events::{Event, EventBus, EventKind, EventLevel};
pub use core::models::{AccountSnapshot, Credential, LoginFailure, Record, RecordStatus};
pub use core::verification::{LoginOutcome, LoginPolicy, RemoteLoginPolicy, SimulatedPolicy};
pub use storage::{LocalResultStore, Partition, ResultStore, parse_records};

use tracing::info;

/// The checker service: HTTP server plus batch engine
pub struct Checker {
    config: Config,
    server: server::server::HttpServer,
}

impl Checker {
    /// Create a new checker instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new checker instance");

        let server = server::server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the checker until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting account checker");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Checker build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
            rust_version: option_env!("RUST_VERSION").unwrap_or("unknown"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
