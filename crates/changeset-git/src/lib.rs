mod error;
mod repository;

pub use error::GitError;
pub use repository::{Repository, parse_name_only_output};

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns [`GitError::NotARepository`] if the path is not inside a git working tree.
pub fn repository_root(path: &Path) -> Result<PathBuf> {
    Ok(Repository::open(path)?.root().to_path_buf())
}
