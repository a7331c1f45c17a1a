use std::path::Path;

use changeset_core::PackageInfo;
use changeset_workspace::{ProjectMapping, Workspace};

use crate::Result;

pub trait WorkspaceProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the root manifest or build-tool configuration cannot be loaded.
    fn load_workspace(&self, project_root: &Path) -> Result<Workspace>;

    /// # Errors
    ///
    /// Returns an error if the workspace patterns cannot be expanded.
    fn enumerate_packages(&self, workspace: &Workspace) -> Result<Vec<PackageInfo>>;

    fn map_projects(
        &self,
        workspace: &Workspace,
        affected_projects: &[String],
        packages: &[PackageInfo],
    ) -> ProjectMapping;
}
