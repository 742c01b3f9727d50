//! Server start-up helpers

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Where the running configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The YAML file at this path
    File(PathBuf),
    /// Defaults plus `CHECKER_*` variables; the file at this path was missing
    Environment(PathBuf),
}

impl ConfigSource {
    /// Report the source; call once the subscriber is installed
    pub fn log(&self) {
        match self {
            Self::File(path) => info!("Configuration loaded from {}", path.display()),
            Self::Environment(path) => warn!(
                "Configuration file {} not found, using defaults and environment",
                path.display()
            ),
        }
    }
}

/// Load the configuration file, falling back to defaults plus `CHECKER_*`
/// environment variables when it is missing
///
/// A file that exists but does not parse or validate is an error. Loading
/// happens before logging is set up, so the returned [`ConfigSource`] is
/// logged by the caller.
pub async fn load_config(path: impl AsRef<Path>) -> Result<(Config, ConfigSource)> {
    let path = path.as_ref();

    if !path.exists() {
        let config = Config::from_env()?;
        return Ok((config, ConfigSource::Environment(path.to_path_buf())));
    }

    let config = Config::from_file(path).await?;
    Ok((config, ConfigSource::File(path.to_path_buf())))
}

/// Run the server with the given configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting account checker");

    let server = HttpServer::new(&config).await?;
    info!("Server starting at: http://{}", config.server().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /status - Batch status");
    info!("   POST /upload - Submit a credential file");
    info!("   GET  /download/{{filename}} - Fetch a result file");
    info!("   GET  /ws - Live event stream");

    server.start().await
}
