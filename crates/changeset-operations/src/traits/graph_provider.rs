use std::path::{Path, PathBuf};

use crate::Result;

pub trait AffectedProjectsProvider: Send + Sync {
    /// Ids of the build-graph projects affected by `changed_files`.
    ///
    /// # Errors
    ///
    /// Returns an error if the build-graph tool cannot be run or fails.
    fn affected_projects(
        &self,
        project_root: &Path,
        graph_command: &[String],
        changed_files: &[PathBuf],
    ) -> Result<Vec<String>>;
}
