use std::path::PathBuf;

use changeset_core::Changeset;

use crate::error::FormatError;

pub const FRONT_MATTER_DELIMITER: &str = "---";
pub const FRAGMENT_PREFIX: &str = "auto-";
pub const FRAGMENT_EXTENSION: &str = "md";

/// Renders a changeset as front matter (`<name>: <bump>` per release) followed
/// by a blank line and the summary.
///
/// Names are written verbatim so scoped packages read `@scope/name: patch`.
#[must_use = "serialization result should be handled"]
pub fn serialize_changeset(changeset: &Changeset) -> Result<String, FormatError> {
    if changeset.releases.is_empty() {
        return Err(FormatError::NoReleases);
    }

    let mut output = String::new();
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    for release in &changeset.releases {
        validate_name(&release.name)?;
        output.push_str(&format!("{}: {}\n", release.name, release.bump_type));
    }
    output.push_str(FRONT_MATTER_DELIMITER);
    output.push('\n');
    output.push('\n');

    if !changeset.summary.is_empty() {
        output.push_str(&changeset.summary);
        output.push('\n');
    }

    Ok(output)
}

fn validate_name(name: &str) -> Result<(), FormatError> {
    let trimmed = name.trim();
    if trimmed.is_empty()
        || trimmed != name
        || name.contains(['\n', '\r'])
        || name.contains(": ")
        || name == FRONT_MATTER_DELIMITER
    {
        return Err(FormatError::InvalidPackageName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[must_use]
pub fn summary_for_changed_files(files: &[PathBuf]) -> String {
    let listed: Vec<_> = files.iter().map(|f| f.display().to_string()).collect();
    format!("Auto-bump for changes in: {}", listed.join(", "))
}

/// `auto-<millis>.md`
#[must_use]
pub fn fragment_filename(timestamp_millis: i64) -> String {
    format!("{FRAGMENT_PREFIX}{timestamp_millis}.{FRAGMENT_EXTENSION}")
}
