// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! gitdeck-git: git CLI access and log parsing for gitdeck
//!
//! This library crate runs the `git` executable, parses its delimiter-encoded
//! log output into typed commit records, and validates the references that
//! are passed to it.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use gitdeck_git::{GitRef, GitRepo};
//!
//! # async fn run() -> Result<(), gitdeck_git::GitError> {
//! let repo = GitRepo::open(".");
//! let main = GitRef::parse("* main")?;
//!
//! for c in repo.branch_log(&main).await? {
//!     println!("{} - {}", c.hash, c.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod command;
pub mod commit;
pub mod diff;
pub mod error;
pub mod parser;
pub mod reference;
pub mod repo;

pub use command::{CommandOutput, GitCli, GitRunner};
pub use commit::{CommitDetail, CommitSummary};
pub use diff::{CompareResult, DiffLine, DiffLineKind};
pub use error::{GitError, ParseError};
pub use parser::{LogFormat, LogRecord, LogSchema, parse_log};
pub use reference::{BranchName, GitRef};
pub use repo::GitRepo;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::commit::{CommitDetail, CommitSummary};
    pub use crate::diff::CompareResult;
    pub use crate::error::GitError;
    pub use crate::reference::GitRef;
    pub use crate::repo::GitRepo;
}
