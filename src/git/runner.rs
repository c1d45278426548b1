//! Command execution through an injectable runner.
//!
//! Commands are passed as a single shell string because some of them are
//! pipelines (`git rev-list ... | grep -v commit`).

use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::RunnerError;

/// Default shell used to interpret command strings.
const DEFAULT_SHELL: &str = "sh";

/// Environment variable to override the shell.
const SHELL_ENV_VAR: &str = "GITSTATS_SHELL";

/// Trait for executing a command string inside a working directory.
///
/// This abstraction keeps process spawning out of [`Repo`](super::Repo) and
/// allows scripted runners in tests.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    /// Run `command` with `working_dir` as the current directory and return stdout.
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, RunnerError>;
}

/// Get the configured shell.
///
/// Reads from GITSTATS_SHELL if set, otherwise uses `sh`. An empty value
/// logs a warning and falls back to the default.
fn get_shell() -> String {
    match env::var(SHELL_ENV_VAR) {
        Ok(v) if !v.trim().is_empty() => v,
        Ok(_) => {
            warn!(
                "Empty {} value, using default '{}'",
                SHELL_ENV_VAR, DEFAULT_SHELL
            );
            DEFAULT_SHELL.to_string()
        }
        Err(_) => DEFAULT_SHELL.to_string(),
    }
}

/// Runner that hands the command string to `<shell> -c`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    /// Create a runner using the shell from GITSTATS_SHELL (default `sh`).
    pub fn new() -> Self {
        Self { shell: get_shell() }
    }

    /// Create a runner using an explicit shell.
    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &str {
        &self.shell
    }
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, RunnerError> {
        if which::which(&self.shell).is_err() {
            return Err(RunnerError::ShellNotFound(self.shell.clone()));
        }

        debug!(shell = %self.shell, dir = %working_dir.display(), "Spawning: {}", command);

        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .current_dir(working_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(RunnerError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(RunnerError::NonZeroExit { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
