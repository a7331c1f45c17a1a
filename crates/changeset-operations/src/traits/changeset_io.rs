use std::path::{Path, PathBuf};

use changeset_core::Changeset;

use crate::Result;

pub trait ChangesetWriter: Send + Sync {
    /// Writes `changeset` as a new fragment in `changeset_dir`, creating the
    /// directory if needed, and returns the path of the new file.
    ///
    /// # Errors
    ///
    /// Returns an error if the changeset cannot be serialized or written.
    fn write_changeset(&self, changeset_dir: &Path, changeset: &Changeset) -> Result<PathBuf>;
}
