use std::path::{Path, PathBuf};
use std::sync::Mutex;

use changeset_core::Changeset;
use changeset_git::GitError;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{AffectedProjectsProvider, ChangesetWriter, GitProvider};

pub struct MockGitProvider {
    changed_files: Vec<PathBuf>,
    failing_ref: Option<String>,
    requested_bases: Mutex<Vec<String>>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            changed_files: Vec::new(),
            failing_ref: None,
            requested_bases: Mutex::new(Vec::new()),
        }
    }

    /// Fails every diff as if `refspec` could not be resolved.
    #[must_use]
    pub fn failing(refspec: &str) -> Self {
        Self {
            failing_ref: Some(refspec.to_string()),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_changed_files(mut self, files: &[&str]) -> Self {
        self.changed_files = files.iter().map(PathBuf::from).collect();
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn requested_bases(&self) -> Vec<String> {
        self.requested_bases.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn changed_files(&self, _project_root: &Path, base: &str) -> Result<Vec<PathBuf>> {
        self.requested_bases
            .lock()
            .expect("lock poisoned")
            .push(base.to_string());

        if let Some(refspec) = &self.failing_ref {
            return Err(GitError::RefNotFound {
                refspec: refspec.clone(),
            }
            .into());
        }
        Ok(self.changed_files.clone())
    }
}

pub struct MockGraphProvider {
    projects: Vec<String>,
    failure: Option<String>,
    calls: Mutex<Vec<(Vec<String>, Vec<PathBuf>)>>,
}

impl MockGraphProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            projects: Vec::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call as if the tool exited non-zero with `stderr`.
    #[must_use]
    pub fn failing(stderr: &str) -> Self {
        Self {
            failure: Some(stderr.to_string()),
            ..Self::new()
        }
    }

    #[must_use]
    pub fn with_projects(mut self, projects: &[&str]) -> Self {
        self.projects = projects.iter().map(|p| (*p).to_string()).collect();
        self
    }

    /// Changed-file lists passed to each call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<PathBuf>> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(_, files)| files.clone())
            .collect()
    }

    /// Graph commands passed to each call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commands(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .iter()
            .map(|(command, _)| command.clone())
            .collect()
    }
}

impl Default for MockGraphProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AffectedProjectsProvider for MockGraphProvider {
    fn affected_projects(
        &self,
        _project_root: &Path,
        graph_command: &[String],
        changed_files: &[PathBuf],
    ) -> Result<Vec<String>> {
        self.calls
            .lock()
            .expect("lock poisoned")
            .push((graph_command.to_vec(), changed_files.to_vec()));

        if let Some(stderr) = &self.failure {
            return Err(OperationError::GraphCommandFailed {
                command: graph_command.join(" "),
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }
        Ok(self.projects.clone())
    }
}

pub struct MockChangesetWriter {
    written: Mutex<Vec<(PathBuf, Changeset)>>,
    filename: String,
}

impl MockChangesetWriter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            filename: "mock-changeset.md".to_string(),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn written_changesets(&self) -> Vec<(PathBuf, Changeset)> {
        self.written.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockChangesetWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangesetWriter for MockChangesetWriter {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<PathBuf> {
        self.written
            .lock()
            .expect("lock poisoned")
            .push((changeset_dir.to_path_buf(), changeset.clone()));
        Ok(changeset_dir.join(&self.filename))
    }
}
