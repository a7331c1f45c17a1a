mod error;
mod serialize;

pub use error::FormatError;
pub use serialize::{
    FRAGMENT_EXTENSION, FRAGMENT_PREFIX, FRONT_MATTER_DELIMITER, fragment_filename,
    serialize_changeset, summary_for_changed_files,
};
