//! Author parsing from `git shortlog -se` output.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitDataError;

/// `<count><whitespace>Name <email>`; the name runs up to the first `<`.
static SHORTLOG_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\d+\s+([^<]*)<(.*)>\s*$").expect("shortlog pattern is valid")
});

/// A commit author, identified by email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl std::fmt::Display for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Authors in first-seen order, looked up by exact email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthorCollection {
    authors: Vec<Author>,
    #[serde(skip)]
    by_email: HashMap<String, usize>,
}

impl AuthorCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an author. Returns `false` and keeps the existing entry when the
    /// email is already present.
    pub fn insert(&mut self, author: Author) -> bool {
        if self.by_email.contains_key(&author.email) {
            return false;
        }
        self.by_email.insert(author.email.clone(), self.authors.len());
        self.authors.push(author);
        true
    }

    pub fn by_email(&self, email: &str) -> Option<&Author> {
        self.by_email.get(email).map(|&i| &self.authors[i])
    }

    pub fn contains(&self, email: &str) -> bool {
        self.by_email.contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Author> {
        self.authors.iter()
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.authors.iter().map(|a| a.email.as_str())
    }

    pub fn as_slice(&self) -> &[Author] {
        &self.authors
    }
}

impl FromIterator<Author> for AuthorCollection {
    fn from_iter<I: IntoIterator<Item = Author>>(iter: I) -> Self {
        let mut collection = Self::new();
        for author in iter {
            collection.insert(author);
        }
        collection
    }
}

impl<'a> IntoIterator for &'a AuthorCollection {
    type Item = &'a Author;
    type IntoIter = std::slice::Iter<'a, Author>;

    fn into_iter(self) -> Self::IntoIter {
        self.authors.iter()
    }
}

impl IntoIterator for AuthorCollection {
    type Item = Author;
    type IntoIter = std::vec::IntoIter<Author>;

    fn into_iter(self) -> Self::IntoIter {
        self.authors.into_iter()
    }
}

/// Parse a single shortlog line into an author.
pub fn parse_author_line(line: &str) -> Result<Author, GitDataError> {
    let caps = SHORTLOG_LINE
        .captures(line)
        .ok_or_else(|| GitDataError::parse(line, "expected '<count> Name <email>'"))?;

    let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or("");
    let email = caps.get(2).map(|m| m.as_str()).unwrap_or("");

    if email.is_empty() {
        return Err(GitDataError::parse(line, "empty author email"));
    }

    Ok(Author::new(name, email))
}

/// Parse `git shortlog -se` output into an ordered author collection.
///
/// Blank lines are skipped. Shortlog groups by name and email, so the same
/// email can appear under two names; the first one wins.
pub fn parse_authors(text: &str) -> Result<AuthorCollection, GitDataError> {
    let mut authors = AuthorCollection::new();

    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let author = parse_author_line(line)?;
        if !authors.contains(&author.email) {
            authors.insert(author);
        } else {
            debug!(email = %author.email, "Duplicate author email in shortlog, keeping first name");
        }
    }

    Ok(authors)
}
