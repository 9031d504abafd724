//! Pull request types
//!
//! [`PullRequest`] mirrors the subset of the GitHub payload gitdeck reads;
//! [`PullRequestSummary`] is the flattened row the browser renders.

use serde::{Deserialize, Serialize};

/// A branch reference inside a pull request payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullBranch {
    /// Branch name
    #[serde(rename = "ref")]
    pub name: String,
}

/// A GitHub account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Login name
    pub login: String,
}

/// A pull request as returned by the GitHub REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Global id
    pub id: u64,
    /// Number within the repository
    pub number: u64,
    /// API URL
    pub url: String,
    /// `open` or `closed`
    pub state: String,
    /// Title
    pub title: String,
    /// Description
    #[serde(default)]
    pub body: Option<String>,
    /// Merge time; set only for merged pull requests
    #[serde(default)]
    pub merged_at: Option<String>,
    /// Branch the changes merge into
    pub base: PullBranch,
    /// Branch holding the changes
    pub head: PullBranch,
    /// Author
    pub user: Account,
}

impl PullRequest {
    /// Whether the pull request has been merged
    #[must_use]
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }
}

/// Flattened pull request row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestSummary {
    /// GitHub's global id
    pub id: u64,
    /// Number within the repository
    pub number: u64,
    /// API URL of the pull request
    pub url: String,
    /// `merged`, `open` or `closed`
    pub state: String,
    /// Title
    pub title: String,
    /// Description, empty when GitHub has none
    pub body: String,
    /// Branch the changes merge into
    pub base: String,
    /// Branch with the changes
    pub head: String,
    /// Login of the author
    #[serde(rename = "user name")]
    pub user_name: String,
}

impl From<PullRequest> for PullRequestSummary {
    fn from(pr: PullRequest) -> Self {
        let state = if pr.is_merged() {
            "merged".to_string()
        } else {
            pr.state
        };
        Self {
            id: pr.id,
            number: pr.number,
            url: pr.url,
            state,
            title: pr.title,
            body: pr.body.unwrap_or_default(),
            base: pr.base.name,
            head: pr.head.name,
            user_name: pr.user.login,
        }
    }
}

/// Target state for re-opening or closing a pull request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullState {
    /// Re-open a closed pull request
    Open,
    /// Close an open pull request
    Closed,
}

/// Body for creating a pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPullRequest {
    /// Title (required, non-empty)
    pub title: String,
    /// Description
    #[serde(default)]
    pub body: String,
    /// Branch holding the changes
    pub head: String,
    /// Branch to merge into
    pub base: String,
}

/// Response of the merge endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOutcome {
    /// Merge commit SHA
    #[serde(default)]
    pub sha: Option<String>,
    /// Whether the merge happened
    pub merged: bool,
    /// GitHub's message
    pub message: String,
}
