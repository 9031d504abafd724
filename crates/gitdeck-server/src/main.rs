//! gitdeck: local dashboard for a git repository and its GitHub pull requests
//!
//! Serves a small browser UI plus a JSON API that runs git in the configured
//! repository and proxies pull request actions to GitHub.

use anyhow::Context;
use gitdeck_server::{Config, serve};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    config.validate().context("Invalid configuration")?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting gitdeck...");
    serve(&config).await
}
