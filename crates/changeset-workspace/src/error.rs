use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("failed to read manifest at '{path}'")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest at '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse pnpm workspace file at '{path}'")]
    PnpmWorkspaceParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("'graphCommand' in '{path}' must name a program")]
    EmptyGraphCommand { path: PathBuf },

    #[error("invalid workspace pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}
