//! gitstats - Extracts authors, commits and the project version from git.
//!
//! # Overview
//!
//! A [`Repo`] resolves a commit range from optional first/last boundaries,
//! runs `git` through an injected [`CommandRunner`], and parses the textual
//! output into [`Author`] and [`Commit`] records. Observers registered with
//! [`Repo::add_command_observer`] see every command and its raw output.

pub mod error;
pub mod git;

// Re-export commonly used types
pub use error::{GitDataError, RunnerError};
pub use git::{
    Author, AuthorCollection, CommandObserver, CommandRunner, Commit, History, Repo, RepoConfig,
    ShellRunner, resolve_range,
};
