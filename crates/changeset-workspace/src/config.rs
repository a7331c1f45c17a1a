use std::path::{Path, PathBuf};

use crate::error::WorkspaceError;
use crate::manifest::AutoChangesetSettings;

pub const ROOT_MANIFEST: &str = "package.json";
pub const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";
pub const PACKAGE_MANIFEST: &str = "package.json";
pub const DEFAULT_PROJECT_CONFIG: &str = "workspace.json";
pub const DEFAULT_CHANGESET_DIR: &str = ".changeset";
pub const DEFAULT_BASE_REF: &str = "origin/main";
pub const DEFAULT_GRAPH_COMMAND: &[&str] = &["pnpm", "nx", "show", "projects", "--affected"];

/// Settings for one run, resolved from defaults and the `autoChangeset`
/// section of the root manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoConfig {
    base_ref: String,
    changeset_dir: PathBuf,
    project_config: PathBuf,
    graph_command: Vec<String>,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            base_ref: String::from(DEFAULT_BASE_REF),
            changeset_dir: PathBuf::from(DEFAULT_CHANGESET_DIR),
            project_config: PathBuf::from(DEFAULT_PROJECT_CONFIG),
            graph_command: DEFAULT_GRAPH_COMMAND
                .iter()
                .map(|arg| (*arg).to_string())
                .collect(),
        }
    }
}

impl AutoConfig {
    pub(crate) fn from_settings(
        settings: Option<AutoChangesetSettings>,
        manifest_path: &Path,
    ) -> Result<Self, WorkspaceError> {
        let defaults = Self::default();
        let Some(settings) = settings else {
            return Ok(defaults);
        };

        let graph_command = match settings.graph_command {
            Some(command) if command.first().is_none_or(|program| program.trim().is_empty()) => {
                return Err(WorkspaceError::EmptyGraphCommand {
                    path: manifest_path.to_path_buf(),
                });
            }
            Some(command) => command,
            None => defaults.graph_command,
        };

        Ok(Self {
            base_ref: settings.base_ref.unwrap_or(defaults.base_ref),
            changeset_dir: settings.changeset_dir.unwrap_or(defaults.changeset_dir),
            project_config: settings.project_config.unwrap_or(defaults.project_config),
            graph_command,
        })
    }

    #[must_use]
    pub fn base_ref(&self) -> &str {
        &self.base_ref
    }

    /// Fragments directory, relative to the repository root.
    #[must_use]
    pub fn changeset_dir(&self) -> &Path {
        &self.changeset_dir
    }

    /// Build-tool configuration file, relative to the repository root.
    #[must_use]
    pub fn project_config(&self) -> &Path {
        &self.project_config
    }

    /// Program and leading arguments of the build-graph tool.
    #[must_use]
    pub fn graph_command(&self) -> &[String] {
        &self.graph_command
    }

    #[must_use]
    pub fn with_base_ref(mut self, base_ref: impl Into<String>) -> Self {
        self.base_ref = base_ref.into();
        self
    }

    #[must_use]
    pub fn with_changeset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.changeset_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_graph_command(mut self, command: Vec<String>) -> Self {
        self.graph_command = command;
        self
    }
}
