//! Branch comparison results
//!
//! The unified diff is kept as raw text. Lines are only classified by their
//! leading characters so a front-end can color them.

use serde::{Deserialize, Serialize};

/// Display class of a unified diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLineKind {
    /// `diff --git a/... b/...` file header
    File,
    /// Line starting with `+`
    Added,
    /// Line starting with `-`
    Removed,
    /// Anything else (hunk headers, index lines, unchanged lines)
    Context,
}

impl DiffLineKind {
    /// Classify one line of unified diff output
    #[must_use]
    pub fn classify(line: &str) -> Self {
        if line.starts_with("diff --git ") {
            Self::File
        } else if line.starts_with('+') {
            Self::Added
        } else if line.starts_with('-') {
            Self::Removed
        } else {
            Self::Context
        }
    }
}

/// A classified diff line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLine {
    /// Display class
    pub kind: DiffLineKind,
    /// Line text without the trailing newline
    pub text: String,
}

/// Output of comparing two refs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    /// Raw unified diff text
    pub raw: String,
    /// `raw`, split into classified lines
    pub lines: Vec<DiffLine>,
}

impl CompareResult {
    /// Wrap raw `git diff` output
    #[must_use]
    pub fn from_raw(raw: String) -> Self {
        let lines = raw
            .lines()
            .map(|line| DiffLine {
                kind: DiffLineKind::classify(line),
                text: line.to_string(),
            })
            .collect();
        Self { raw, lines }
    }

    /// True when the two refs have no differences
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Number of files touched, counted from `diff --git` headers
    #[must_use]
    pub fn files_changed(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.kind == DiffLineKind::File)
            .count()
    }
}
