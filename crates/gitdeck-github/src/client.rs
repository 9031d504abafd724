// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! GitHub REST client for pull requests
//!
//! Tokens are supplied per call and never stored on the client.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use crate::error::{ApiErrorBody, GitHubError};
use crate::pulls::{MergeOutcome, NewPullRequest, PullRequest, PullRequestSummary, PullState};

/// Public GitHub API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Commit title used when merging from gitdeck
pub const MERGE_COMMIT_TITLE: &str = "Merged remotely with gitdeck";

const USER_AGENT: &str = concat!("gitdeck/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// Owner/repository pair a request targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepoSlug<'a> {
    /// User or organization
    pub owner: &'a str,
    /// Repository name
    pub repo: &'a str,
}

impl<'a> RepoSlug<'a> {
    /// Create a slug, checking both names are safe as URL path segments
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidName` for empty names, `.`/`..`, or names
    /// with characters outside `[A-Za-z0-9._-]`.
    pub fn new(owner: &'a str, repo: &'a str) -> Result<Self, GitHubError> {
        for name in [owner, repo] {
            let valid = !name.is_empty()
                && name != "."
                && name != ".."
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
            if !valid {
                return Err(GitHubError::InvalidName(name.to_string()));
            }
        }
        Ok(Self { owner, repo })
    }
}

/// Client for the pull request endpoints of the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    api_url: String,
}

impl GitHubClient {
    /// Create a client for the public GitHub API
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Network` if the HTTP client can't be built.
    pub fn new() -> Result<Self, GitHubError> {
        Self::with_api_url(DEFAULT_API_URL)
    }

    /// Create a client for a different API root (GitHub Enterprise, tests)
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::Network` if the HTTP client can't be built.
    pub fn with_api_url(api_url: impl Into<String>) -> Result<Self, GitHubError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The API root this client talks to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn pulls_url(&self, slug: RepoSlug<'_>) -> String {
        format!("{}/repos/{}/{}/pulls", self.api_url, slug.owner, slug.repo)
    }

    fn request(&self, method: Method, url: &str, token: Option<&SecretString>) -> RequestBuilder {
        debug!(%method, url, authenticated = token.is_some(), "GitHub request");
        let request = self.http.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, GitHubError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let text = response.text().await?;
        match serde_json::from_str::<ApiErrorBody>(&text) {
            Ok(body) => Err(GitHubError::Api {
                status: status.as_u16(),
                body,
            }),
            Err(_) => Err(GitHubError::UnexpectedResponse {
                status: status.as_u16(),
                message: text,
            }),
        }
    }

    /// List all pull requests (open, closed and merged)
    ///
    /// Public repositories can be listed without a token.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError` if the request fails or GitHub rejects it.
    pub async fn list_pulls(
        &self,
        slug: RepoSlug<'_>,
        token: Option<&SecretString>,
    ) -> Result<Vec<PullRequestSummary>, GitHubError> {
        let request = self
            .request(Method::GET, &self.pulls_url(slug), token)
            .query(&[("state", "all")]);
        let pulls: Vec<PullRequest> = Self::send(request).await?;
        Ok(pulls.into_iter().map(PullRequestSummary::from).collect())
    }

    /// Re-open or close a pull request
    ///
    /// # Errors
    ///
    /// Returns `GitHubError` if the request fails or GitHub rejects it.
    pub async fn update_state(
        &self,
        slug: RepoSlug<'_>,
        number: u64,
        state: PullState,
        token: &SecretString,
    ) -> Result<PullRequestSummary, GitHubError> {
        let url = format!("{}/{number}", self.pulls_url(slug));
        let request = self
            .request(Method::PATCH, &url, Some(token))
            .json(&json!({ "state": state }));
        let pull: PullRequest = Self::send(request).await?;
        Ok(pull.into())
    }

    /// Merge a pull request
    ///
    /// # Errors
    ///
    /// Returns `GitHubError` if the request fails or GitHub rejects it.
    pub async fn merge(
        &self,
        slug: RepoSlug<'_>,
        number: u64,
        token: &SecretString,
    ) -> Result<MergeOutcome, GitHubError> {
        let url = format!("{}/{number}/merge", self.pulls_url(slug));
        let request = self
            .request(Method::PUT, &url, Some(token))
            .json(&json!({ "commit_title": MERGE_COMMIT_TITLE }));
        Self::send(request).await
    }

    /// Open a new pull request
    ///
    /// # Errors
    ///
    /// Returns `GitHubError` if the request fails or GitHub rejects it.
    pub async fn create(
        &self,
        slug: RepoSlug<'_>,
        pull: &NewPullRequest,
        token: &SecretString,
    ) -> Result<PullRequestSummary, GitHubError> {
        let request = self
            .request(Method::POST, &self.pulls_url(slug), Some(token))
            .json(pull);
        let created: PullRequest = Self::send(request).await?;
        Ok(created.into())
    }
}
