// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Error types for gitdeck-github

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the `errors` array in a GitHub error body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Resource the error is about, e.g. `PullRequest`
    #[serde(default)]
    pub resource: Option<String>,
    /// Machine-readable code, e.g. `missing_field` or `custom`
    #[serde(default)]
    pub code: Option<String>,
    /// Offending field, if any
    #[serde(default)]
    pub field: Option<String>,
    /// Free-form message, used when there is no field
    #[serde(default)]
    pub message: Option<String>,
}

/// Structured error body returned by the GitHub REST API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Top-level message
    pub message: String,
    /// Per-field errors (validation failures)
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    /// Link to the relevant API documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,
}

impl ApiErrorBody {
    /// Join the message and each error into one human readable text
    ///
    /// Each error becomes a line of the form `resource: code => field`,
    /// falling back to the error's message when it names no field.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut summary = self.message.clone();
        for error in &self.errors {
            let target = error
                .field
                .as_deref()
                .or(error.message.as_deref())
                .unwrap_or_default();
            summary.push('\n');
            summary.push_str(&format!(
                "{}: {} => {}",
                error.resource.as_deref().unwrap_or_default(),
                error.code.as_deref().unwrap_or_default(),
                target
            ));
        }
        summary
    }
}

/// Errors that can occur while talking to GitHub
#[derive(Debug, Error)]
pub enum GitHubError {
    /// GitHub answered with a structured error body
    #[error("{}", .body.summary())]
    Api {
        /// HTTP status code
        status: u16,
        /// Parsed error body
        body: ApiErrorBody,
    },

    /// GitHub answered with a non-success status and an unparseable body
    #[error("Unexpected GitHub response ({status}): {message}")]
    UnexpectedResponse {
        /// HTTP status code
        status: u16,
        /// Raw response text
        message: String,
    },

    /// The request could not be sent or the response not read
    #[error("GitHub request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// An owner or repository name that can't be used in an API path
    #[error("Invalid GitHub name: {0}")]
    InvalidName(String),
}

impl GitHubError {
    /// HTTP status GitHub answered with, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidName(_) => None,
        }
    }
}
