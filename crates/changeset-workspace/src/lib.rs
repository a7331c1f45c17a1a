mod config;
mod error;
mod fs;
mod manifest;
mod mapping;
mod workspace;

pub use config::{
    AutoConfig, DEFAULT_BASE_REF, DEFAULT_CHANGESET_DIR, DEFAULT_GRAPH_COMMAND,
    DEFAULT_PROJECT_CONFIG, PACKAGE_MANIFEST, PNPM_WORKSPACE_FILE, ROOT_MANIFEST,
};
pub use error::WorkspaceError;
#[cfg(any(test, feature = "testing"))]
pub use fs::MemoryFileSystem;
pub use fs::{FileSystem, RealFileSystem};
pub use manifest::read_package_name;
pub use mapping::{ProjectMapping, map_projects_to_packages};
pub use workspace::{Workspace, enumerate_packages, load_workspace};

pub type Result<T> = std::result::Result<T, WorkspaceError>;
