use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::Result;
use crate::error::OperationError;
use crate::traits::AffectedProjectsProvider;

/// Runs the configured build-graph command with `--files=<changed files>`
/// appended and reads one project id per line from its stdout.
pub struct CommandGraphProvider;

impl CommandGraphProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for CommandGraphProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AffectedProjectsProvider for CommandGraphProvider {
    fn affected_projects(
        &self,
        project_root: &Path,
        graph_command: &[String],
        changed_files: &[PathBuf],
    ) -> Result<Vec<String>> {
        let (program, args) = graph_command
            .split_first()
            .ok_or(OperationError::EmptyGraphCommand)?;

        let files: Vec<_> = changed_files
            .iter()
            .map(|f| f.to_string_lossy().into_owned())
            .collect();
        let files_arg = format!("--files={}", files.join(" "));
        let command = format!("{} {files_arg}", graph_command.join(" "));
        debug!(command = %command, "resolving affected projects");

        let output = Command::new(program)
            .args(args)
            .arg(&files_arg)
            .current_dir(project_root)
            .output()
            .map_err(|source| OperationError::GraphCommandLaunch {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(OperationError::GraphCommandFailed {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_project_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// One project id per line; surrounding whitespace is trimmed and blank lines dropped.
#[must_use]
pub fn parse_project_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
