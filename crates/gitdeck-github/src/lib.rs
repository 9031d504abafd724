// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! gitdeck-github: GitHub pull request access for gitdeck
//!
//! A thin client over the pull request endpoints of the GitHub REST API.
//! Access tokens are passed per call as [`secrecy::SecretString`] and are
//! never stored or logged.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitdeck_github::{GitHubClient, RepoSlug};
//!
//! # async fn run() -> Result<(), gitdeck_github::GitHubError> {
//! let client = GitHubClient::new()?;
//! let slug = RepoSlug::new("octocat", "Hello-World")?;
//!
//! for pr in client.list_pulls(slug, None).await? {
//!     println!("#{} [{}] {}", pr.number, pr.state, pr.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod pulls;

pub use client::{DEFAULT_API_URL, GitHubClient, RepoSlug};
pub use error::{ApiErrorBody, ApiErrorDetail, GitHubError};
pub use pulls::{MergeOutcome, NewPullRequest, PullRequest, PullRequestSummary, PullState};
pub use secrecy::SecretString;
