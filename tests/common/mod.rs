//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature, Time};
use gitstats::{CommandRunner, RunnerError};

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a git output fixture.
pub fn git_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("git").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Runner that answers from a command -> output table and records every call.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, Result<String, String>>,
    calls: RefCell<Vec<(String, PathBuf)>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` with `output`.
    pub fn respond(mut self, command: &str, output: &str) -> Self {
        self.responses
            .insert(command.to_string(), Ok(output.to_string()));
        self
    }

    /// Fail `command` with `message`.
    pub fn fail(mut self, command: &str, message: &str) -> Self {
        self.responses
            .insert(command.to_string(), Err(message.to_string()));
        self
    }

    /// Commands received so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
    }

    /// Working directories received so far, in order.
    pub fn working_dirs(&self) -> Vec<PathBuf> {
        self.calls.borrow().iter().map(|(_, d)| d.clone()).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, RunnerError> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), working_dir.to_path_buf()));

        match self.responses.get(command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(RunnerError::Failed(message.clone())),
            None => Err(RunnerError::Failed(format!("unexpected command: {}", command))),
        }
    }
}

impl CommandRunner for &ScriptedRunner {
    fn run(&self, command: &str, working_dir: &Path) -> Result<String, RunnerError> {
        (**self).run(command, working_dir)
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit by the given author at `seconds` (UTC offset in minutes).
    /// Returns the commit OID.
    pub fn commit_as(&self, name: &str, email: &str, seconds: i64, offset_minutes: i32) -> Oid {
        let sig = Signature::new(name, email, &Time::new(seconds, offset_minutes))
            .expect("Failed to create signature");

        // Create or update a file to have something to commit
        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{} {}\n", email, seconds))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, "test commit", &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Abbreviated hash as git would print it with `%h`.
    pub fn short_id(&self, oid: Oid) -> String {
        let object = self.repo.find_object(oid, None).expect("Failed to find object");
        object
            .short_id()
            .expect("Failed to get short id")
            .as_str()
            .expect("Short id is not UTF-8")
            .to_string()
    }
}
