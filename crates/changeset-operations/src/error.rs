use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Workspace(#[from] changeset_workspace::WorkspaceError),

    #[error(transparent)]
    Git(#[from] changeset_git::GitError),

    #[error(transparent)]
    Format(#[from] changeset_format::FormatError),

    #[error("no build-graph command configured")]
    EmptyGraphCommand,

    #[error("failed to run '{command}'")]
    GraphCommandLaunch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}: {stderr}")]
    GraphCommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to create changeset directory '{path}'")]
    ChangesetDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write changeset file '{path}'")]
    ChangesetFileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find a free changeset file name in '{dir}'")]
    NoFreeFilename { dir: PathBuf },
}

pub type Result<T> = std::result::Result<T, OperationError>;
