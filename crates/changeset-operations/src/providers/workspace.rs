use std::path::Path;

use changeset_core::PackageInfo;
use changeset_workspace::{
    FileSystem, ProjectMapping, RealFileSystem, Workspace, enumerate_packages, load_workspace,
    map_projects_to_packages,
};

use crate::Result;
use crate::traits::WorkspaceProvider;

pub struct FileSystemWorkspaceProvider<F = RealFileSystem> {
    fs: F,
}

impl FileSystemWorkspaceProvider {
    #[must_use]
    pub fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl Default for FileSystemWorkspaceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> FileSystemWorkspaceProvider<F> {
    #[must_use]
    pub fn with_file_system(fs: F) -> Self {
        Self { fs }
    }
}

impl<F: FileSystem> WorkspaceProvider for FileSystemWorkspaceProvider<F> {
    fn load_workspace(&self, project_root: &Path) -> Result<Workspace> {
        Ok(load_workspace(&self.fs, project_root)?)
    }

    fn enumerate_packages(&self, workspace: &Workspace) -> Result<Vec<PackageInfo>> {
        Ok(enumerate_packages(
            &self.fs,
            &workspace.root,
            &workspace.patterns,
        )?)
    }

    fn map_projects(
        &self,
        workspace: &Workspace,
        affected_projects: &[String],
        packages: &[PackageInfo],
    ) -> ProjectMapping {
        map_projects_to_packages(
            &self.fs,
            &workspace.root,
            affected_projects,
            &workspace.project_paths,
            packages,
        )
    }
}
