use std::path::{Path, PathBuf};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Repository-relative paths changed since `base`.
    ///
    /// # Errors
    ///
    /// Returns an error if the diff cannot be computed.
    fn changed_files(&self, project_root: &Path, base: &str) -> Result<Vec<PathBuf>>;
}
