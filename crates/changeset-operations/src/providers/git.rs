use std::path::{Path, PathBuf};

use changeset_git::Repository;

use crate::Result;
use crate::traits::GitProvider;

pub struct GitCliProvider;

impl GitCliProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for GitCliProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for GitCliProvider {
    fn changed_files(&self, project_root: &Path, base: &str) -> Result<Vec<PathBuf>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.changed_files(project_root, base)?)
    }
}
