mod analytics;
mod cli;
mod config;
mod errors;
mod gateway;
mod models;
mod outreach;
mod search;
mod sequence;
mod shortlists;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url);
    }

    // Logs go to stderr so command output on stdout stays pipeable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    debug!("recruiter v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", config.api_url);

    let state = AppState::new(config)?;
    cli::run(cli.command, state).await
}
