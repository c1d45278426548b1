//! Git access by shelling out and parsing textual output.

pub mod authors;
pub mod commits;
pub mod observer;
pub mod range;
pub mod repo;
pub mod runner;

pub use authors::{Author, AuthorCollection, parse_author_line, parse_authors};
pub use commits::{Commit, has_records, parse_commit_line, parse_commits};
pub use observer::CommandObserver;
pub use range::resolve_range;
pub use repo::{History, Repo, RepoConfig, authors_command, commits_command, version_command};
pub use runner::{CommandRunner, ShellRunner};
