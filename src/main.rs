//! Account-Checker-RS - concurrent credential checker service

#![allow(missing_docs)]

use account_checker_rs::server::builder::{load_config, run_server};
use account_checker_rs::utils::logging::init_tracing;
use account_checker_rs::{Result, build_info};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "checker", version, about = "Concurrent account credential checker")]
struct Args {
    /// Configuration file
    #[arg(short, long, env = "CHECKER_CONFIG", default_value = "config/checker.yaml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

async fn run(args: Args) -> Result<()> {
    let (mut config, source) = load_config(&args.config).await?;

    if let Some(host) = args.host {
        config.checker.server.host = host;
    }
    if let Some(port) = args.port {
        config.checker.server.port = port;
    }
    config.validate()?;

    init_tracing(config.logging())?;
    source.log();

    let build = build_info();
    info!(version = build.version, git = build.git_hash, "Account checker");

    run_server(config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the multi-line bind hints readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
