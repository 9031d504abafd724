// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Branch tokens and validated git references
//!
//! References arrive from URL paths and query strings, so they are checked
//! against an allowed character set before they reach a git argument list.

use std::fmt;

use crate::error::GitError;

/// Longest reference accepted, in bytes
pub const MAX_REFERENCE_LEN: usize = 255;

/// Markers `git branch` prints in front of a branch name
const BRANCH_MARKERS: [char; 2] = ['*', '+'];

/// Strip a leading branch marker (`* ` current, `+ ` other worktree)
#[must_use]
pub fn strip_branch_marker(token: &str) -> &str {
    let token = token.trim();
    match token.strip_prefix(BRANCH_MARKERS) {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => token,
    }
}

/// A branch as listed by `git branch`, marker included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchName {
    token: String,
}

impl BranchName {
    /// Wrap a raw `git branch` token, trimming surrounding whitespace
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        Self {
            token: token.trim().to_string(),
        }
    }

    /// The token exactly as listed, including any marker
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The branch name with the marker stripped
    #[must_use]
    pub fn name(&self) -> &str {
        strip_branch_marker(&self.token)
    }

    /// Whether this is the checked-out branch
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.token.starts_with("* ")
    }

    /// Whether the token is git's placeholder for a detached HEAD or an
    /// in-progress rebase, e.g. `* (HEAD detached at 1945ab9)`
    #[must_use]
    pub fn is_detached(&self) -> bool {
        self.name().starts_with('(')
    }
}

/// A reference that passed validation and is safe to pass to git
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GitRef(String);

impl GitRef {
    /// Validate user input as a git reference
    ///
    /// A leading branch marker is stripped first, so tokens from `git branch`
    /// are accepted as-is.
    ///
    /// # Errors
    ///
    /// Returns `GitError::InvalidReference` if the input is empty, too long,
    /// starts with `-`, contains `..`, or has characters outside
    /// `[A-Za-z0-9/._\-~^@]`.
    pub fn parse(input: &str) -> Result<Self, GitError> {
        let name = strip_branch_marker(input);

        let valid = !name.is_empty()
            && name.len() <= MAX_REFERENCE_LEN
            && !name.starts_with('-')
            && !name.contains("..")
            && name.chars().all(is_reference_char);

        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(GitError::InvalidReference {
                reference: input.to_string(),
            })
        }
    }

    /// The validated reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_reference_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '~' | '^' | '@')
}

impl fmt::Display for GitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for GitRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
