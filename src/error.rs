//! Error types for gitstats modules using thiserror.

use thiserror::Error;

/// Errors from a [`CommandRunner`](crate::git::CommandRunner) implementation.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Shell '{0}' not found in PATH. Set GITSTATS_SHELL to a valid shell.")]
    ShellNotFound(String),

    #[error("Failed to spawn command: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Command exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Command failed: {0}")]
    Failed(String),
}

/// Errors from running git and parsing its output.
#[derive(Error, Debug)]
pub enum GitDataError {
    #[error("Failed to execute '{command}': {source}")]
    CommandExecution {
        command: String,
        #[source]
        source: RunnerError,
    },

    #[error("Malformed git output line '{line}': {reason}")]
    Parse { line: String, reason: String },

    #[error("Commit references unknown author email '{email}'")]
    UnknownAuthor { email: String },
}

impl GitDataError {
    pub(crate) fn parse(line: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
