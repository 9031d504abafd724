//! Commit record types built from parsed log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::parser::{LogField, LogRecord};

/// One row of a branch log
///
/// Field order is the JSON key order, which the browser uses as table
/// column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    /// Abbreviated commit hash
    #[serde(rename = "commit hash")]
    pub hash: String,
    /// Subject line
    #[serde(rename = "commit message")]
    pub message: String,
    /// Author date, ISO-like
    #[serde(rename = "date")]
    pub date: String,
    /// Author name
    #[serde(rename = "author name")]
    pub author: String,
}

impl TryFrom<&LogRecord> for CommitSummary {
    type Error = ParseError;

    fn try_from(record: &LogRecord) -> Result<Self, Self::Error> {
        let hash = record
            .get(LogField::AbbreviatedHash)
            .or_else(|| record.get(LogField::Hash))
            .ok_or(ParseError::MissingField {
                field: LogField::Hash.name(),
            })?;

        Ok(Self {
            hash: hash.to_string(),
            message: record.require(LogField::Subject)?.to_string(),
            date: record.require(LogField::AuthorDate)?.to_string(),
            author: record.require(LogField::AuthorName)?.to_string(),
        })
    }
}

/// Full details of a single commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Full commit hash
    #[serde(rename = "commit hash")]
    pub hash: String,
    /// Subject line
    #[serde(rename = "commit message")]
    pub message: String,
    /// Author date, seconds since epoch
    #[serde(rename = "author timestamp")]
    pub author_timestamp: String,
    /// Author date, ISO-like
    #[serde(rename = "author date")]
    pub author_date: String,
    /// Committer date, seconds since epoch
    #[serde(rename = "committer timestamp")]
    pub committer_timestamp: String,
    /// Committer date, ISO-like
    #[serde(rename = "committer date")]
    pub committer_date: String,
    /// Author name
    #[serde(rename = "author name")]
    pub author_name: String,
    /// Author email
    #[serde(rename = "author email")]
    pub author_email: String,
    /// Changed paths, one per line
    #[serde(rename = "files changed")]
    pub files_changed: String,
    /// Count of non-empty lines in `files_changed`
    #[serde(rename = "number of files changed")]
    pub file_count: usize,
}

impl CommitDetail {
    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash
            .char_indices()
            .nth(7)
            .map_or(&self.hash[..], |(end, _)| &self.hash[..end])
    }

    /// Changed paths as a list
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files_changed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
    }

    /// Author time, if the textual timestamp is a valid epoch value
    #[must_use]
    pub fn author_time(&self) -> Option<DateTime<Utc>> {
        parse_epoch(&self.author_timestamp)
    }

    /// Committer time, if the textual timestamp is a valid epoch value
    #[must_use]
    pub fn committer_time(&self) -> Option<DateTime<Utc>> {
        parse_epoch(&self.committer_timestamp)
    }
}

fn parse_epoch(value: &str) -> Option<DateTime<Utc>> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
}

impl TryFrom<&LogRecord> for CommitDetail {
    type Error = ParseError;

    fn try_from(record: &LogRecord) -> Result<Self, Self::Error> {
        let files_changed = record.require(LogField::Files)?.to_string();
        let file_count = record
            .file_count()
            .unwrap_or_else(|| crate::parser::count_files(&files_changed));

        Ok(Self {
            hash: record.require(LogField::Hash)?.to_string(),
            message: record.require(LogField::Subject)?.to_string(),
            author_timestamp: record.require(LogField::AuthorTimestamp)?.to_string(),
            author_date: record.require(LogField::AuthorDate)?.to_string(),
            committer_timestamp: record.require(LogField::CommitterTimestamp)?.to_string(),
            committer_date: record.require(LogField::CommitterDate)?.to_string(),
            author_name: record.require(LogField::AuthorName)?.to_string(),
            author_email: record.require(LogField::AuthorEmail)?.to_string(),
            files_changed,
            file_count,
        })
    }
}
