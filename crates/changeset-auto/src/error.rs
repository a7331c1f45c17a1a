use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] changeset_operations::OperationError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
