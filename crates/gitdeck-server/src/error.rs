// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! HTTP error responses
//!
//! Every handler returns `Result<_, ApiError>`. The error is rendered as
//! `{"message": ..., "errors": [...]}` with a status derived from its source.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gitdeck_git::GitError;
use gitdeck_github::{ApiErrorDetail, GitHubError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to the browser
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request
    #[error("{0}")]
    BadRequest(String),

    /// A pull request change without a GitHub token
    #[error("A GitHub token is required for this action")]
    Unauthorized,

    /// Nothing matched the request
    #[error("{0}")]
    NotFound(String),

    /// GitHub refused the request for a reason other than validation
    #[error("{0}")]
    Conflict(String),

    /// git failed
    #[error(transparent)]
    Git(#[from] GitError),

    /// GitHub request failed
    #[error(transparent)]
    GitHub(#[from] GitHubError),
}

/// JSON body of an error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human readable message
    pub message: String,
    /// Per-field errors reported by GitHub
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ApiErrorDetail>,
}

/// stderr fragments git prints for a revision that does not exist
const UNKNOWN_REVISION_MARKERS: &[&str] = &[
    "unknown revision",
    "bad revision",
    "bad object",
    "ambiguous argument",
];

fn is_unknown_revision(stderr: &str) -> bool {
    UNKNOWN_REVISION_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker))
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Git(e) => match e {
                GitError::InvalidReference { .. } => StatusCode::BAD_REQUEST,
                GitError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                GitError::CommandFailed { stderr, .. } if is_unknown_revision(stderr) => {
                    StatusCode::NOT_FOUND
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::GitHub(e) => match e {
                GitHubError::Api { status, .. } | GitHubError::UnexpectedResponse { status, .. } => {
                    StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
                }
                GitHubError::Network(_) => StatusCode::BAD_GATEWAY,
                GitHubError::InvalidName(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Response body for this error
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let errors = match self {
            Self::GitHub(GitHubError::Api { body, .. }) => body.errors.clone(),
            _ => Vec::new(),
        };
        ErrorBody {
            message: self.to_string(),
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
