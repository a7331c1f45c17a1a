use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("changeset must contain at least one release")]
    NoReleases,

    #[error("package name {name:?} cannot be written to front matter")]
    InvalidPackageName { name: String },
}
