use std::fmt::Write as _;
use std::path::Path;

use changeset_operations::operations::GenerateOutcome;

/// Renders the user-facing summary of a generate run.
///
/// Created fragment paths are shown relative to `project_root` when possible.
pub(crate) fn format_outcome(project_root: &Path, outcome: &GenerateOutcome) -> String {
    match outcome {
        GenerateOutcome::NoChanges { base } => format!("No changed files since {base}\n"),
        GenerateOutcome::NoAffectedProjects { .. } => "No affected projects found\n".to_string(),
        GenerateOutcome::NoAffectedPackages { .. } => {
            "No affected packages found (utility packages are excluded)\n".to_string()
        }
        GenerateOutcome::Created {
            file_path,
            changeset,
            ..
        } => {
            let shown = file_path.strip_prefix(project_root).unwrap_or(file_path);
            let mut output = format!("Created changeset: {}\n", shown.display());
            for release in &changeset.releases {
                let _ = writeln!(output, "  - {}: {}", release.name, release.bump_type);
            }
            output
        }
    }
}
