// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Request handlers
//!
//! Each handler validates its input, runs one repository or GitHub
//! operation, and returns JSON.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use gitdeck_git::{CommitDetail, CommitSummary, CompareResult, GitRef};
use gitdeck_github::{NewPullRequest, PullRequestSummary, PullState, RepoSlug};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::server::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Response of `GET /api/branches`
#[derive(Debug, Serialize, Deserialize)]
pub struct BranchesResponse {
    /// Raw `git branch` tokens, current branch marked with `* `
    pub branches: Vec<String>,
}

/// Response of `GET /api/branches/{branch}`
#[derive(Debug, Serialize, Deserialize)]
pub struct CommitsResponse {
    /// Commits of the branch, newest first
    pub commits: Vec<CommitSummary>,
}

/// Response of `GET /api/project/init`
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectInit {
    /// Repository name
    pub project: String,
    /// GitHub account owning the repository
    #[serde(rename = "github username")]
    pub github_username: String,
}

/// Confirmation for pull request changes
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// What happened
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

// ============================================================================
// Input Types
// ============================================================================

/// Query of `GET /api/compare`
#[derive(Debug, Clone, Deserialize)]
pub struct CompareQuery {
    /// Branch with the changes
    #[serde(rename = "branchFrom")]
    pub branch_from: String,
    /// Branch the changes would merge into
    #[serde(rename = "branchTo")]
    pub branch_to: String,
}

/// Body of `PATCH /api/pulls/{number}`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePullInput {
    /// `open` or `closed`
    pub state: PullState,
}

// ============================================================================
// Token extraction
// ============================================================================

/// GitHub token from the `Authorization` header
///
/// Accepts `Bearer <token>` and `token <token>`. The token is only forwarded
/// to GitHub for the current request.
#[derive(Debug, Default)]
pub struct GitHubToken(pub Option<SecretString>);

impl GitHubToken {
    /// The token, or `ApiError::Unauthorized`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the request carried no token.
    pub fn require(self) -> Result<SecretString, ApiError> {
        self.0.ok_or(ApiError::Unauthorized)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for GitHubToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };
        let value = value
            .to_str()
            .map_err(|_| ApiError::BadRequest("Malformed Authorization header".to_string()))?;

        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("token "))
            .ok_or_else(|| {
                ApiError::BadRequest("Authorization must use the Bearer or token scheme".to_string())
            })?
            .trim();

        if token.is_empty() {
            return Ok(Self(None));
        }
        Ok(Self(Some(SecretString::from(token.to_string()))))
    }
}

// ============================================================================
// Repository handlers
// ============================================================================

/// `GET /api/branches`
pub async fn list_branches(
    State(state): State<AppState>,
) -> Result<Json<BranchesResponse>, ApiError> {
    let branches = state.repo.branches().await?;
    Ok(Json(BranchesResponse { branches }))
}

/// `GET /api/branches/{*branch}`
///
/// The branch may contain `/` and may still carry the `* ` marker.
pub async fn branch_commits(
    State(state): State<AppState>,
    branch: Result<Path<String>, PathRejection>,
) -> Result<Json<CommitsResponse>, ApiError> {
    let Path(branch) = branch?;
    let branch = GitRef::parse(branch.trim_start_matches('/'))?;
    let commits = state.repo.branch_log(&branch).await?;
    debug!(branch = %branch, commits = commits.len(), "Listed branch commits");
    Ok(Json(CommitsResponse { commits }))
}

/// `GET /api/commit/{commit}`
pub async fn commit_detail(
    State(state): State<AppState>,
    commit: Result<Path<String>, PathRejection>,
) -> Result<Json<CommitDetail>, ApiError> {
    let Path(commit) = commit?;
    let commit = GitRef::parse(&commit)?;
    state
        .repo
        .commit_detail(&commit)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No commit found for {commit}")))
}

/// `GET /api/compare?branchFrom=..&branchTo=..`
pub async fn compare(
    State(state): State<AppState>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<CompareResult>, ApiError> {
    let Query(query) = query?;
    let from = GitRef::parse(&query.branch_from)?;
    let to = GitRef::parse(&query.branch_to)?;
    Ok(Json(state.repo.compare(&from, &to).await?))
}

/// `GET /api/project/init`
pub async fn project_init(State(state): State<AppState>) -> Result<Json<ProjectInit>, ApiError> {
    let project = state.repo.project_name().await?;
    Ok(Json(ProjectInit {
        project,
        github_username: state.github_user.clone(),
    }))
}

// ============================================================================
// Pull request handlers
// ============================================================================

/// `GET /api/pulls`
pub async fn list_pulls(
    State(state): State<AppState>,
    token: GitHubToken,
) -> Result<Json<Vec<PullRequestSummary>>, ApiError> {
    let project = state.repo.project_name().await?;
    let slug = RepoSlug::new(&state.github_user, &project)?;
    let pulls = state.github.list_pulls(slug, token.0.as_ref()).await?;
    Ok(Json(pulls))
}

/// `POST /api/pulls`
pub async fn create_pull(
    State(state): State<AppState>,
    token: GitHubToken,
    input: Result<Json<NewPullRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let Json(mut pull) = input?;
    pull.title = pull.title.trim().to_string();
    if pull.title.is_empty() {
        return Err(ApiError::BadRequest(
            "Please at least provide a title for the PR".to_string(),
        ));
    }
    pull.head = GitRef::parse(&pull.head)?.as_str().to_string();
    pull.base = GitRef::parse(&pull.base)?.as_str().to_string();
    let token = token.require()?;

    let project = state.repo.project_name().await?;
    let slug = RepoSlug::new(&state.github_user, &project)?;
    let created = state.github.create(slug, &pull, &token).await?;
    info!(number = created.number, head = %pull.head, base = %pull.base, "Created pull request");

    Ok((
        StatusCode::CREATED,
        MessageResponse::new("PR created successfully"),
    ))
}

/// `PATCH /api/pulls/{number}`
pub async fn update_pull(
    State(state): State<AppState>,
    number: Result<Path<u64>, PathRejection>,
    token: GitHubToken,
    input: Result<Json<UpdatePullInput>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(number) = number?;
    let Json(input) = input?;
    let token = token.require()?;

    let project = state.repo.project_name().await?;
    let slug = RepoSlug::new(&state.github_user, &project)?;
    state
        .github
        .update_state(slug, number, input.state, &token)
        .await?;
    info!(number, state = ?input.state, "Updated pull request");

    Ok(MessageResponse::new("PR updated"))
}

/// `PUT /api/pulls/{number}/merge`
pub async fn merge_pull(
    State(state): State<AppState>,
    number: Result<Path<u64>, PathRejection>,
    token: GitHubToken,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(number) = number?;
    let token = token.require()?;

    let project = state.repo.project_name().await?;
    let slug = RepoSlug::new(&state.github_user, &project)?;
    let outcome = state.github.merge(slug, number, &token).await?;
    if !outcome.merged {
        return Err(ApiError::Conflict(outcome.message));
    }
    info!(number, sha = ?outcome.sha, "Merged pull request");

    Ok(MessageResponse::new("PR merged"))
}
