// Copyright (c) 2026 - present gitdeck contributors
// SPDX-License-Identifier: MIT

//! Delimiter-encoded git log parsing
//!
//! `git log --pretty=tformat:...` is asked to frame every commit with a
//! record delimiter and to join the requested placeholders with a field
//! separator. This module owns both halves of that contract: a [`LogSchema`]
//! renders the `--pretty` argument for a [`LogFormat`], and [`parse_log`]
//! turns the resulting text back into [`LogRecord`]s.
//!
//! # Example
//!
//! ```
//! use gitdeck_git::parser::{parse_log, LogField, LogFormat, BRANCH_LOG};
//!
//! let text = "\u{1e}\nabc1234\u{1f}Fix bug\u{1f}2023-07-22 10:00:00 +0200\u{1f}Jane\n";
//! let records = parse_log(text, &BRANCH_LOG, &LogFormat::CONTROL).unwrap();
//!
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get(LogField::Subject), Some("Fix bug"));
//! ```

use crate::error::ParseError;

/// Record delimiter and field separator pair used to frame log output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFormat {
    /// Marker that starts every record in the output
    pub record_delimiter: &'static str,
    /// Marker that separates positional fields inside a record
    pub field_separator: &'static str,
    record_placeholder: &'static str,
    field_placeholder: &'static str,
}

impl LogFormat {
    /// Printable delimiters.
    ///
    /// A subject containing `||` splits into an extra field, which
    /// [`parse_log`] reports as [`ParseError::FieldCount`].
    pub const LEGACY: Self = Self {
        record_delimiter: ">>|commit-delimiter|<<",
        field_separator: "||",
        record_placeholder: ">>|commit-delimiter|<<",
        field_placeholder: "||",
    };

    /// ASCII record separator (0x1e) and unit separator (0x1f).
    ///
    /// Neither can appear in a commit subject, so this is what the server uses.
    pub const CONTROL: Self = Self {
        record_delimiter: "\u{1e}",
        field_separator: "\u{1f}",
        record_placeholder: "%x1e",
        field_placeholder: "%x1f",
    };
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::CONTROL
    }
}

/// A positional field that can be requested from `git log`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogField {
    /// Full commit hash (`%H`)
    Hash,
    /// Abbreviated commit hash (`%h`)
    AbbreviatedHash,
    /// Subject line (`%s`)
    Subject,
    /// Author date as seconds since epoch (`%at`)
    AuthorTimestamp,
    /// Author date, ISO-like (`%ai`)
    AuthorDate,
    /// Committer date as seconds since epoch (`%ct`)
    CommitterTimestamp,
    /// Committer date, ISO-like (`%ci`)
    CommitterDate,
    /// Author name, respecting .mailmap (`%aN`)
    AuthorName,
    /// Author email, respecting .mailmap (`%aE`)
    AuthorEmail,
    /// Trailing file list produced by `--name-only`
    Files,
}

impl LogField {
    /// The `--pretty` placeholder that produces this field.
    ///
    /// [`LogField::Files`] has none; it comes from `--name-only`.
    #[must_use]
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            Self::Hash => Some("%H"),
            Self::AbbreviatedHash => Some("%h"),
            Self::Subject => Some("%s"),
            Self::AuthorTimestamp => Some("%at"),
            Self::AuthorDate => Some("%ai"),
            Self::CommitterTimestamp => Some("%ct"),
            Self::CommitterDate => Some("%ci"),
            Self::AuthorName => Some("%aN"),
            Self::AuthorEmail => Some("%aE"),
            Self::Files => None,
        }
    }

    /// Human readable name, used in error messages
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Hash | Self::AbbreviatedHash => "commit hash",
            Self::Subject => "commit message",
            Self::AuthorTimestamp => "author timestamp",
            Self::AuthorDate => "author date",
            Self::CommitterTimestamp => "committer timestamp",
            Self::CommitterDate => "committer date",
            Self::AuthorName => "author name",
            Self::AuthorEmail => "author email",
            Self::Files => "files changed",
        }
    }
}

/// Which positional field maps to which property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogSchema {
    fields: &'static [LogField],
    with_files: bool,
}

/// Schema for branch logs: hash, message, date, author
pub const BRANCH_LOG: LogSchema = LogSchema::new(&[
    LogField::AbbreviatedHash,
    LogField::Subject,
    LogField::AuthorDate,
    LogField::AuthorName,
]);

/// Schema for a single commit, including its changed files
pub const COMMIT_DETAIL: LogSchema = LogSchema::new(&[
    LogField::Hash,
    LogField::Subject,
    LogField::AuthorTimestamp,
    LogField::AuthorDate,
    LogField::CommitterTimestamp,
    LogField::CommitterDate,
    LogField::AuthorName,
    LogField::AuthorEmail,
])
.with_files();

impl LogSchema {
    /// Create a schema from placeholder fields, in output order
    ///
    /// `fields` should not contain [`LogField::Files`]; use
    /// [`LogSchema::with_files`] to append the file list.
    #[must_use]
    pub const fn new(fields: &'static [LogField]) -> Self {
        Self {
            fields,
            with_files: false,
        }
    }

    /// Append a trailing `--name-only` file list field
    #[must_use]
    pub const fn with_files(mut self) -> Self {
        self.with_files = true;
        self
    }

    /// Whether the schema ends with a file list
    #[must_use]
    pub fn has_files(&self) -> bool {
        self.with_files
    }

    /// Number of fields each record must split into
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len() + usize::from(self.with_files)
    }

    /// Render the `--pretty=tformat:` argument for this schema
    ///
    /// With a file list the format ends in a field separator, so the file
    /// names git prints after the formatted line become the last field.
    #[must_use]
    pub fn pretty_format(&self, format: &LogFormat) -> String {
        let placeholders: Vec<&str> = self
            .fields
            .iter()
            .filter_map(|field| field.placeholder())
            .collect();

        let mut pretty = format!(
            "--pretty=tformat:{}%n{}",
            format.record_placeholder,
            placeholders.join(format.field_placeholder)
        );
        if self.with_files {
            pretty.push_str(format.field_placeholder);
        }
        pretty
    }
}

/// One parsed log record: field values in schema order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    fields: Vec<(LogField, String)>,
    file_count: Option<usize>,
}

impl LogRecord {
    /// Raw value of a field, if the schema requested it
    #[must_use]
    pub fn get(&self, field: LogField) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value.as_str())
    }

    /// Raw value of a field, or [`ParseError::MissingField`]
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingField` when the schema did not include `field`.
    pub fn require(&self, field: LogField) -> Result<&str, ParseError> {
        self.get(field).ok_or(ParseError::MissingField {
            field: field.name(),
        })
    }

    /// Number of non-empty lines in the file list (schemas with files only)
    #[must_use]
    pub fn file_count(&self) -> Option<usize> {
        self.file_count
    }

    /// Iterate over `(field, value)` pairs in schema order
    pub fn fields(&self) -> impl Iterator<Item = (LogField, &str)> {
        self.fields.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// Count the non-empty, trimmed lines of a `--name-only` file list
#[must_use]
pub fn count_files(list: &str) -> usize {
    list.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .count()
}

/// Parse delimiter-encoded `git log` output
///
/// Records come back in input order, which for `git log` is newest first.
/// Empty input (an empty repository, or a filter with no matches) yields an
/// empty vector.
///
/// # Errors
///
/// Returns `ParseError::FieldCount` for the first record whose field count
/// differs from the schema's.
pub fn parse_log(
    text: &str,
    schema: &LogSchema,
    format: &LogFormat,
) -> Result<Vec<LogRecord>, ParseError> {
    text.split(format.record_delimiter)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .enumerate()
        .map(|(index, segment)| parse_record(index, segment, schema, format))
        .collect()
}

fn parse_record(
    index: usize,
    segment: &str,
    schema: &LogSchema,
    format: &LogFormat,
) -> Result<LogRecord, ParseError> {
    let values: Vec<&str> = segment.split(format.field_separator).collect();

    if values.len() != schema.field_count() {
        return Err(ParseError::FieldCount {
            record: index,
            expected: schema.field_count(),
            found: values.len(),
        });
    }

    let mut fields: Vec<(LogField, String)> = schema
        .fields
        .iter()
        .zip(&values)
        .map(|(field, value)| (*field, (*value).to_string()))
        .collect();

    let mut file_count = None;
    if schema.with_files {
        let files = values[schema.fields.len()].trim();
        file_count = Some(count_files(files));
        fields.push((LogField::Files, files.to_string()));
    }

    Ok(LogRecord { fields, file_count })
}
