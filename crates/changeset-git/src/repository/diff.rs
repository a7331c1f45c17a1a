use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{GitError, Result};

use super::Repository;

impl Repository {
    /// Files under `dir` that differ between `base` and the working tree.
    ///
    /// Paths are relative to `dir`; changes outside it are not reported.
    /// Output is read NUL-separated with path quoting disabled, so non-ASCII
    /// names come back as written.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::RefNotFound`] if `base` cannot be resolved, or a
    /// command error if git cannot be launched or exits unsuccessfully.
    pub fn changed_files(&self, dir: &Path, base: &str) -> Result<Vec<PathBuf>> {
        self.resolve_tree(base)?;

        let command = format!("git diff --name-only --relative {base}");
        debug!(command = %command, dir = %dir.display(), "running diff");

        let output = Command::new("git")
            .args([
                "-c",
                "core.quotePath=false",
                "diff",
                "--name-only",
                "-z",
                "--relative",
                base,
                "--",
            ])
            .current_dir(dir)
            .output()
            .map_err(|source| GitError::CommandLaunch {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_name_only_output(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }

    fn resolve_tree(&self, refspec: &str) -> Result<git2::Tree<'_>> {
        let obj = self
            .inner
            .revparse_single(refspec)
            .map_err(|_| GitError::RefNotFound {
                refspec: refspec.to_string(),
            })?;

        obj.peel_to_tree().map_err(|_| GitError::RefNotFound {
            refspec: refspec.to_string(),
        })
    }
}

/// One path per NUL- or newline-terminated record; surrounding whitespace is
/// trimmed and blank records dropped.
#[must_use]
pub fn parse_name_only_output(stdout: &str) -> Vec<PathBuf> {
    stdout
        .split(['\0', '\n'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}
