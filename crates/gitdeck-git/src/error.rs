// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Error types for gitdeck-git

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while parsing delimiter-encoded log output
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A record did not split into the number of fields the schema expects
    #[error("Record {record} has {found} fields, expected {expected}")]
    FieldCount {
        /// Zero-based index of the offending record
        record: usize,
        /// Number of fields the schema declares
        expected: usize,
        /// Number of fields found in the record
        found: usize,
    },

    /// A typed conversion needed a field the record does not carry
    #[error("Record is missing the '{field}' field")]
    MissingField {
        /// JSON key of the missing field
        field: &'static str,
    },
}

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    /// The git executable could not be found on PATH
    #[error("git executable not found")]
    GitNotFound,

    /// The working directory is not inside a git repository
    #[error("Not a git repository: {path}")]
    NotARepository {
        /// The path git was run in
        path: String,
    },

    /// git exited with a non-zero status
    #[error("git {args} failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        /// Space-joined argument list, for diagnostics
        args: String,
        /// Process exit code (-1 when killed by a signal)
        exit_code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// git did not finish within the configured timeout
    #[error("git {args} timed out after {timeout:?}")]
    Timeout {
        /// Space-joined argument list, for diagnostics
        args: String,
        /// The timeout that elapsed
        timeout: Duration,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that was rejected
        reference: String,
    },

    /// Log output could not be parsed
    #[error("Failed to parse git output: {0}")]
    Parse(#[from] ParseError),

    /// I/O error while spawning or talking to the child process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
