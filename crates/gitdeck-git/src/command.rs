// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! git command execution
//!
//! Commands are always spawned with an argument vector, never through a
//! shell, and are bounded by a timeout.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Name of the git executable
pub const GIT_COMMAND: &str = "git";

/// Timeout applied when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Captured output of a successful command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output, lossily decoded as UTF-8
    pub stdout: String,
    /// Standard error, lossily decoded as UTF-8
    pub stderr: String,
}

/// Runs git with a list of arguments
///
/// [`GitCli`] is the real implementation; tests substitute canned output.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// Run git with `args` and capture its output
    ///
    /// # Errors
    ///
    /// Returns `GitError` if git is missing, fails, or times out.
    async fn run(&self, args: &[String]) -> Result<CommandOutput, GitError>;
}

/// Runs the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    /// Repository to run in (None = current directory)
    repo_path: Option<PathBuf>,
    /// Executable to run
    program: String,
    timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitCli {
    /// Create a runner for the current directory
    #[must_use]
    pub fn new() -> Self {
        Self {
            repo_path: None,
            program: GIT_COMMAND.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Run git inside `path` (passed as `git -C <path>`)
    #[must_use]
    pub fn with_repo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.repo_path = Some(path.into());
        self
    }

    /// Set the per-command timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a different executable (for tests, or a non-PATH git)
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// The configured repository path
    #[must_use]
    pub fn repo_path(&self) -> Option<&Path> {
        self.repo_path.as_deref()
    }

    /// The configured timeout
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("--no-pager");
        if let Some(ref path) = self.repo_path {
            cmd.arg("-C").arg(path);
        }
        cmd.args(args)
            // Keep output stable regardless of user config
            .env("GIT_PAGER", "cat")
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl GitRunner for GitCli {
    async fn run(&self, args: &[String]) -> Result<CommandOutput, GitError> {
        let joined = args.join(" ");
        let started = Instant::now();

        let child = self.command(args).spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                GitError::GitNotFound
            } else {
                GitError::Io(e)
            }
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| GitError::Timeout {
                args: joined.clone(),
                timeout: self.timeout,
            })??;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        debug!(
            args = %joined,
            status = ?output.status.code(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_bytes = stdout.len(),
            "git finished"
        );

        if output.status.success() {
            return Ok(CommandOutput { stdout, stderr });
        }

        if stderr.contains("not a git repository") {
            return Err(GitError::NotARepository {
                path: self
                    .repo_path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| ".".to_string()),
            });
        }

        Err(GitError::CommandFailed {
            args: joined,
            exit_code: output.status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        })
    }
}
