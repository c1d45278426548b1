//! Repository handle: configuration, command execution and observers.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GitDataError, RunnerError};

use super::authors::{AuthorCollection, parse_authors};
use super::commits::{Commit, has_records, parse_commits};
use super::observer::CommandObserver;
use super::range::resolve_range;
use super::runner::{CommandRunner, ShellRunner};

/// Build the `git shortlog` command listing authors in `range`.
pub fn authors_command(range: &str) -> String {
    format!("git shortlog -se {}", range)
}

/// Build the `git rev-list` command listing commits in `range`.
///
/// `grep -v commit` removes the `commit <sha>` headers, but it also drops any
/// record whose author email contains "commit". Such authors still show up
/// in [`authors_command`] output. On an empty range grep exits with code 1.
pub fn commits_command(range: &str) -> String {
    format!(
        "git rev-list --pretty=format:'%h|%at|%ai|%aE' {} | grep -v commit",
        range
    )
}

/// Build the `git rev-parse` command naming the range's terminal state.
pub fn version_command(range: &str) -> String {
    format!("git rev-parse --short {}", range)
}

/// Where the repository lives and which commits to look at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepoConfig {
    pub path: PathBuf,
    pub first_commit_hash: Option<String>,
    pub last_commit_hash: Option<String>,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            first_commit_hash: None,
            last_commit_hash: None,
        }
    }
}

impl RepoConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn first_commit(mut self, hash: impl Into<String>) -> Self {
        self.first_commit_hash = Some(hash.into());
        self
    }

    pub fn last_commit(mut self, hash: impl Into<String>) -> Self {
        self.last_commit_hash = Some(hash.into());
        self
    }
}

/// Authors and commits parsed from the same range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct History {
    pub authors: AuthorCollection,
    pub commits: Vec<Commit>,
}

impl History {
    /// Commits written by the author with `email`, in timestamp order.
    pub fn commits_by<'a>(&'a self, email: &'a str) -> impl Iterator<Item = &'a Commit> + 'a {
        self.commits.iter().filter(move |c| c.author_email() == email)
    }
}

/// Handle on one repository. All git access goes through the injected runner.
pub struct Repo<R: CommandRunner = ShellRunner> {
    config: RepoConfig,
    runner: R,
    observers: Vec<Box<dyn CommandObserver>>,
}

impl Repo<ShellRunner> {
    /// Open a repository using the default [`ShellRunner`].
    pub fn open(config: RepoConfig) -> Self {
        Self::with_runner(config, ShellRunner::new())
    }
}

impl<R: CommandRunner> Repo<R> {
    pub fn with_runner(config: RepoConfig, runner: R) -> Self {
        Self {
            config,
            runner,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Register a listener called after every successful command, in
    /// registration order.
    pub fn add_command_observer<O>(&mut self, observer: O)
    where
        O: CommandObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// The range expression every command operates on.
    pub fn commit_range(&self) -> String {
        resolve_range(
            self.config.first_commit_hash.as_deref(),
            self.config.last_commit_hash.as_deref(),
        )
    }

    /// Run a command in the repository and notify observers with its output.
    pub fn run(&self, command: &str) -> Result<String, GitDataError> {
        debug!(command = %command, "Running git command");

        let output = self.runner.run(command, &self.config.path);
        self.finish(command, output)
    }

    /// Like [`run`](Self::run) for a pipeline ending in `grep`: exit code 1
    /// with nothing on stderr means grep selected no lines, not a failure.
    fn run_grep_pipeline(&self, command: &str) -> Result<String, GitDataError> {
        debug!(command = %command, "Running git pipeline");

        let output = match self.runner.run(command, &self.config.path) {
            Err(RunnerError::NonZeroExit { code: 1, stderr }) if stderr.trim().is_empty() => {
                debug!("grep selected no lines, treating as empty output");
                Ok(String::new())
            }
            other => other,
        };
        self.finish(command, output)
    }

    fn finish(
        &self,
        command: &str,
        output: Result<String, RunnerError>,
    ) -> Result<String, GitDataError> {
        let output = output.map_err(|source| GitDataError::CommandExecution {
            command: command.to_string(),
            source,
        })?;

        for observer in &self.observers {
            observer.on_command(command, &output);
        }

        Ok(output)
    }

    /// Authors who committed in the configured range, in shortlog order.
    pub fn authors(&self) -> Result<AuthorCollection, GitDataError> {
        let output = self.run(&authors_command(&self.commit_range()))?;
        parse_authors(&output)
    }

    /// Commits in the configured range, oldest first.
    ///
    /// Runs the rev-list command, then the shortlog command only when there
    /// are records to link to authors.
    pub fn commits(&self) -> Result<Vec<Commit>, GitDataError> {
        Ok(self.history()?.commits)
    }

    /// Authors and commits of the configured range, parsed together.
    ///
    /// An empty range yields an empty history without running shortlog.
    pub fn history(&self) -> Result<History, GitDataError> {
        let range = self.commit_range();
        let output = self.run_grep_pipeline(&commits_command(&range))?;

        if !has_records(&output) {
            debug!(range = %range, "No commits in range");
            return Ok(History {
                authors: AuthorCollection::new(),
                commits: Vec::new(),
            });
        }

        let authors = self.authors()?;
        let commits = parse_commits(&output, &authors)?;
        debug!(
            "Parsed {} commits from {} authors",
            commits.len(),
            authors.len()
        );
        Ok(History { authors, commits })
    }

    /// Abbreviated identifier of the range's terminal state.
    pub fn project_version(&self) -> Result<String, GitDataError> {
        let output = self.run(&version_command(&self.commit_range()))?;
        Ok(output.trim().to_string())
    }
}
