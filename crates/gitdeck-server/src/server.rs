// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! HTTP server for gitdeck
//!
//! The router serves the JSON API under `/api` and the browser bundle from
//! the assets directory for every other path.

use std::path::Path;

use anyhow::Context;
use axum::Router;
use axum::routing::{get, patch, put};
use gitdeck_git::{GitCli, GitRepo};
use gitdeck_github::{GitHubClient, GitHubError};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::handlers;

/// State shared by all handlers
///
/// Everything here is cheap to clone and immutable; each request runs its
/// own git process.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Repository being browsed
    pub repo: GitRepo,
    /// GitHub API client
    pub github: GitHubClient,
    /// GitHub account owning the repository
    pub github_user: String,
}

impl AppState {
    /// Create state from its parts
    #[must_use]
    pub fn new(repo: GitRepo, github: GitHubClient, github_user: impl Into<String>) -> Self {
        Self {
            repo,
            github,
            github_user: github_user.into(),
        }
    }

    /// Build state from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns `GitHubError` if the HTTP client can't be built.
    pub fn from_config(config: &Config) -> Result<Self, GitHubError> {
        let mut runner = GitCli::new().with_timeout(config.git_timeout());
        if let Some(path) = config.repo_path() {
            runner = runner.with_repo_path(path);
        }
        let github = GitHubClient::with_api_url(config.github_api.as_str())?;
        Ok(Self::new(
            GitRepo::with_runner(runner),
            github,
            config.github_user.as_str(),
        ))
    }
}

/// Build the application router
pub fn router(state: AppState, assets: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/branches", get(handlers::list_branches))
        .route("/branches/{*branch}", get(handlers::branch_commits))
        .route("/commit/{commit}", get(handlers::commit_detail))
        .route("/compare", get(handlers::compare))
        .route("/project/init", get(handlers::project_init))
        .route(
            "/pulls",
            get(handlers::list_pulls).post(handlers::create_pull),
        )
        .route("/pulls/{number}", patch(handlers::update_pull))
        .route("/pulls/{number}/merge", put(handlers::merge_pull));

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(assets.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address can't be bound or the server fails.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config).context("Failed to create GitHub client")?;
    let assets = config.assets_path();
    let app = router(state, &assets);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(
        address = %addr,
        repo = ?config.repo_path(),
        assets = %assets.display(),
        "gitdeck listening on http://{addr}"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("gitdeck stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed
        std::future::pending::<()>().await;
    }
}
