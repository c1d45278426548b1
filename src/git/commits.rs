//! Commit parsing from `git rev-list --pretty=format:'%h|%at|%ai|%aE'` output.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::error::GitDataError;

use super::authors::{Author, AuthorCollection};

/// Field separator in the rev-list pretty format.
const FIELD_SEPARATOR: char = '|';

/// Number of fields in a commit record.
const FIELD_COUNT: usize = 4;

/// Date layout produced by `%ai`.
const ISO_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// A single commit. The author is kept as its email key and resolved through
/// the [`AuthorCollection`] it was parsed against.
/// Only [`Commit::new`] builds one, so the email always belongs to that
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub hash: String,
    pub stamp: i64,
    pub date: DateTime<FixedOffset>,
    #[serde(rename = "author")]
    author_email: String,
}

impl Commit {
    /// Build a commit, checking that `author_email` is part of `authors`.
    pub fn new(
        hash: impl Into<String>,
        stamp: i64,
        date: DateTime<FixedOffset>,
        author_email: &str,
        authors: &AuthorCollection,
    ) -> Result<Self, GitDataError> {
        if !authors.contains(author_email) {
            return Err(GitDataError::UnknownAuthor {
                email: author_email.to_string(),
            });
        }

        Ok(Self {
            hash: hash.into(),
            stamp,
            date,
            author_email: author_email.to_string(),
        })
    }

    pub fn author_email(&self) -> &str {
        &self.author_email
    }

    /// Look up this commit's author.
    pub fn author<'a>(&self, authors: &'a AuthorCollection) -> Option<&'a Author> {
        authors.by_email(&self.author_email)
    }
}

/// Parse a `%ai` date, falling back to RFC 3339.
fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, ISO_DATE_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

/// Parse one `hash|stamp|date|email` record.
pub fn parse_commit_line(line: &str, authors: &AuthorCollection) -> Result<Commit, GitDataError> {
    let fields: Vec<&str> = line.trim().split(FIELD_SEPARATOR).collect();
    let [hash, stamp, date, email] = fields.as_slice() else {
        return Err(GitDataError::parse(
            line,
            format!("expected {} '|' separated fields, found {}", FIELD_COUNT, fields.len()),
        ));
    };

    let stamp = stamp
        .trim()
        .parse::<i64>()
        .map_err(|e| GitDataError::parse(line, format!("invalid timestamp '{}': {}", stamp, e)))?;

    let date = parse_date(date.trim())
        .ok_or_else(|| GitDataError::parse(line, format!("invalid date '{}'", date)))?;

    Commit::new(hash.trim(), stamp, date, email.trim(), authors)
}

/// Whether a line is a commit record rather than rev-list noise such as
/// `commit <sha>` headers.
fn is_record(line: &str) -> bool {
    line.contains(FIELD_SEPARATOR)
}

/// Whether rev-list output holds at least one commit record.
pub fn has_records(text: &str) -> bool {
    text.lines().any(is_record)
}

/// Parse rev-list output into commits sorted by ascending timestamp.
///
/// Lines without a `|` are discarded. Every author email must be present in
/// `authors`, which therefore has to come from the matching shortlog run.
pub fn parse_commits(text: &str, authors: &AuthorCollection) -> Result<Vec<Commit>, GitDataError> {
    let mut commits = text
        .lines()
        .filter(|line| is_record(line))
        .map(|line| parse_commit_line(line, authors))
        .collect::<Result<Vec<_>, _>>()?;

    // Stable, so equal timestamps keep rev-list order.
    commits.sort_by_key(|c| c.stamp);

    Ok(commits)
}
