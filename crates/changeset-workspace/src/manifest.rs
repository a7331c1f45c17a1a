use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::PACKAGE_MANIFEST;
use crate::error::WorkspaceError;
use crate::fs::FileSystem;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RootManifest {
    pub workspaces: Option<WorkspacesField>,
    pub auto_changeset: Option<AutoChangesetSettings>,
}

/// npm/pnpm use a plain array, yarn also accepts `{ "packages": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WorkspacesField {
    Patterns(Vec<String>),
    Detailed {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl WorkspacesField {
    pub fn into_patterns(self) -> Vec<String> {
        match self {
            Self::Patterns(patterns) | Self::Detailed { packages: patterns } => patterns,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AutoChangesetSettings {
    pub base_ref: Option<String>,
    pub changeset_dir: Option<PathBuf>,
    pub project_config: Option<PathBuf>,
    pub graph_command: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PnpmWorkspace {
    #[serde(default)]
    pub packages: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProjectConfig {
    #[serde(default)]
    pub projects: IndexMap<String, ProjectEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProjectEntry {
    Path(PathBuf),
    Detailed { root: PathBuf },
}

impl ProjectEntry {
    pub fn into_path(self) -> PathBuf {
        match self {
            Self::Path(path) | Self::Detailed { root: path } => path,
        }
    }
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
}

pub(crate) fn read_manifest<F, T>(fs: &F, path: &Path) -> Result<T, WorkspaceError>
where
    F: FileSystem + ?Sized,
    T: DeserializeOwned,
{
    let content = fs
        .read_to_string(path)
        .map_err(|source| WorkspaceError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| WorkspaceError::ManifestParse {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_pnpm_workspace<F>(fs: &F, path: &Path) -> Result<PnpmWorkspace, WorkspaceError>
where
    F: FileSystem + ?Sized,
{
    let content = fs
        .read_to_string(path)
        .map_err(|source| WorkspaceError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_yml::from_str(&content).map_err(|source| WorkspaceError::PnpmWorkspaceParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads the `name` of the package manifest in `package_dir`.
///
/// Returns `None` when the manifest is missing, unparseable or has no name.
#[must_use]
pub fn read_package_name<F>(fs: &F, package_dir: &Path) -> Option<String>
where
    F: FileSystem + ?Sized,
{
    let manifest_path = package_dir.join(PACKAGE_MANIFEST);
    if !fs.exists(&manifest_path) {
        return None;
    }

    match read_manifest::<_, PackageManifest>(fs, &manifest_path) {
        Ok(PackageManifest { name: Some(name) }) if !name.trim().is_empty() => Some(name),
        Ok(_) => {
            debug!(path = %manifest_path.display(), "skipping manifest without a name");
            None
        }
        Err(err) => {
            debug!(path = %manifest_path.display(), error = %err, "skipping unreadable manifest");
            None
        }
    }
}
