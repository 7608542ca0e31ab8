//! `GitBot` CLI entrypoint for one-off GitHub lookups.

use std::io::{self, Write};
use std::process::ExitCode;

use gitbot::{ApiError, GitHubApi, GitbotConfig};
use ortho_config::OrthoConfig;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ApiError> {
    let config = load_config()?;
    let api = GitHubApi::from_config(&config)?;

    let mut stdout = io::stdout().lock();
    cli::run(&config, &api, &mut stdout).await
}

/// Installs a stderr subscriber filtered by `RUST_LOG`.
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gitbot=info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ApiError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<GitbotConfig, ApiError> {
    GitbotConfig::load().map_err(|error| ApiError::Configuration {
        message: error.to_string(),
    })
}
