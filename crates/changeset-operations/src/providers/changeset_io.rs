use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use changeset_core::Changeset;
use changeset_format::{fragment_filename, serialize_changeset};
use chrono::Utc;
use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::ChangesetWriter;

const MAX_FILENAME_ATTEMPTS: i64 = 100;

pub struct FileSystemChangesetWriter {
    project_root: PathBuf,
    fixed_timestamp: Option<i64>,
}

impl FileSystemChangesetWriter {
    #[must_use]
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            fixed_timestamp: None,
        }
    }

    /// Uses `millis` instead of the current time when naming fragments.
    #[must_use]
    pub fn with_timestamp(mut self, millis: i64) -> Self {
        self.fixed_timestamp = Some(millis);
        self
    }

    fn resolve_dir(&self, changeset_dir: &Path) -> PathBuf {
        if changeset_dir.is_absolute() {
            changeset_dir.to_path_buf()
        } else {
            self.project_root.join(changeset_dir)
        }
    }

    fn timestamp(&self) -> i64 {
        self.fixed_timestamp
            .unwrap_or_else(|| Utc::now().timestamp_millis())
    }
}

/// Creates the first free `auto-<ms>.md` at or after `timestamp`.
///
/// Names are claimed with `create_new`, so an existing fragment is never
/// overwritten even when another process writes to `dir` concurrently.
fn create_unique_fragment(dir: &Path, timestamp: i64, content: &str) -> Result<PathBuf> {
    for offset in 0..MAX_FILENAME_ATTEMPTS {
        let file_path = dir.join(fragment_filename(timestamp + offset));
        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file_path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %file_path.display(), "fragment name taken");
                continue;
            }
            Err(source) => {
                return Err(OperationError::ChangesetFileWrite {
                    path: file_path,
                    source,
                });
            }
        };

        file.write_all(content.as_bytes())
            .map_err(|source| OperationError::ChangesetFileWrite {
                path: file_path.clone(),
                source,
            })?;
        return Ok(file_path);
    }

    Err(OperationError::NoFreeFilename {
        dir: dir.to_path_buf(),
    })
}

impl ChangesetWriter for FileSystemChangesetWriter {
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<PathBuf> {
        let content = serialize_changeset(changeset)?;

        let dir = self.resolve_dir(changeset_dir);
        fs::create_dir_all(&dir).map_err(|source| OperationError::ChangesetDirCreate {
            path: dir.clone(),
            source,
        })?;

        let file_path = create_unique_fragment(&dir, self.timestamp(), &content)?;
        debug!(path = %file_path.display(), "wrote changeset");

        Ok(file_path)
    }
}
