// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Repository queries built on the git CLI
//!
//! Each operation builds an argument list, runs it through a [`GitRunner`]
//! and feeds the output to the log parser with the matching schema.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::command::{GitCli, GitRunner};
use crate::commit::{CommitDetail, CommitSummary};
use crate::diff::CompareResult;
use crate::error::GitError;
use crate::parser::{BRANCH_LOG, COMMIT_DETAIL, LogFormat, LogSchema, parse_log};
use crate::reference::{BranchName, GitRef};

/// Fallback project name when neither a remote nor a top-level path is known
const UNKNOWN_PROJECT: &str = "unknown";

/// A git repository accessed through the git CLI
#[derive(Clone)]
pub struct GitRepo {
    runner: Arc<dyn GitRunner>,
    format: LogFormat,
}

impl std::fmt::Debug for GitRepo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepo")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl GitRepo {
    /// Open the repository at `path` using the `git` executable
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::with_runner(GitCli::new().with_repo_path(path.as_ref()))
    }

    /// Use a custom runner
    #[must_use]
    pub fn with_runner(runner: impl GitRunner + 'static) -> Self {
        Self {
            runner: Arc::new(runner),
            format: LogFormat::CONTROL,
        }
    }

    /// Change the log delimiters requested from git
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    async fn git(&self, args: Vec<String>) -> Result<String, GitError> {
        Ok(self.runner.run(&args).await?.stdout)
    }

    fn log_args(&self, schema: &LogSchema, reference: &GitRef, extra: &[&str]) -> Vec<String> {
        let mut args = vec!["log".to_string(), schema.pretty_format(&self.format)];
        args.extend(extra.iter().map(|s| (*s).to_string()));
        args.push(reference.to_string());
        args.push("--".to_string());
        args
    }

    /// List local branches as printed by `git branch`
    ///
    /// Tokens are trimmed but keep the current-branch marker (`* main`). A
    /// detached HEAD is not a branch and is left out.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git branch` fails.
    pub async fn branches(&self) -> Result<Vec<String>, GitError> {
        let stdout = self
            .git(["branch", "--no-color"].map(str::to_string).to_vec())
            .await?;
        Ok(stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(BranchName::from_token)
            .filter(|branch| {
                if branch.is_detached() {
                    debug!(token = branch.token(), "Skipping detached HEAD");
                }
                !branch.is_detached()
            })
            .map(|branch| branch.token().to_string())
            .collect())
    }

    /// Log of a branch, newest first
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git fails or its output can't be parsed.
    pub async fn branch_log(&self, branch: &GitRef) -> Result<Vec<CommitSummary>, GitError> {
        let stdout = self.git(self.log_args(&BRANCH_LOG, branch, &[])).await?;
        let records = parse_log(&stdout, &BRANCH_LOG, &self.format)?;
        debug!(branch = %branch, commits = records.len(), "Parsed branch log");

        records
            .iter()
            .map(|record| CommitSummary::try_from(record).map_err(GitError::from))
            .collect()
    }

    /// Details of a single commit, including its changed files
    ///
    /// Returns `Ok(None)` when git prints no record for the reference.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git fails or its output can't be parsed.
    pub async fn commit_detail(&self, commit: &GitRef) -> Result<Option<CommitDetail>, GitError> {
        let args = self.log_args(&COMMIT_DETAIL, commit, &["--name-only", "-1"]);
        let stdout = self.git(args).await?;
        let records = parse_log(&stdout, &COMMIT_DETAIL, &self.format)?;

        records
            .first()
            .map(CommitDetail::try_from)
            .transpose()
            .map_err(GitError::from)
    }

    /// Diff of what `from` adds on top of its merge base with `to`
    ///
    /// Runs `git diff <to>...<from>`.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if `git diff` fails.
    pub async fn compare(&self, from: &GitRef, to: &GitRef) -> Result<CompareResult, GitError> {
        let range = format!("{to}...{from}");
        let stdout = self
            .git(vec!["diff".to_string(), range, "--".to_string()])
            .await?;
        Ok(CompareResult::from_raw(stdout))
    }

    /// URL of the `origin` remote, if configured
    ///
    /// # Errors
    ///
    /// Returns `GitError` for failures other than a missing key.
    pub async fn remote_origin_url(&self) -> Result<Option<String>, GitError> {
        let args = ["config", "--get", "remote.origin.url"].map(str::to_string);
        match self.runner.run(&args).await {
            Ok(output) => {
                let url = output.stdout.trim();
                Ok((!url.is_empty()).then(|| url.to_string()))
            }
            // `git config --get` exits with 1 when the key is not set
            Err(GitError::CommandFailed { exit_code: 1, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Name of the project, from the origin remote URL
    ///
    /// Falls back to the name of the repository's top-level directory when no
    /// origin remote is configured.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git fails.
    pub async fn project_name(&self) -> Result<String, GitError> {
        if let Some(url) = self.remote_origin_url().await? {
            if let Some(name) = project_name_from_remote(&url) {
                return Ok(name.to_string());
            }
            warn!(url = %url, "Could not derive a project name from the origin URL");
        }

        let toplevel = self
            .git(["rev-parse", "--show-toplevel"].map(str::to_string).to_vec())
            .await?;
        Ok(Path::new(toplevel.trim())
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(UNKNOWN_PROJECT)
            .to_string())
    }
}

/// Repository name from a remote URL: the last path segment without `.git`
///
/// Handles `https://host/owner/repo.git`, `git@host:owner/repo.git`, and
/// trailing slashes.
#[must_use]
pub fn project_name_from_remote(url: &str) -> Option<&str> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    (!name.is_empty()).then_some(name)
}
