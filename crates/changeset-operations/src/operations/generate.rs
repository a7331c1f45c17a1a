use std::path::{Path, PathBuf};

use changeset_core::{Changeset, PackageRelease};
use changeset_format::summary_for_changed_files;
use changeset_workspace::ProjectMapping;
use tracing::{debug, info};

use crate::Result;
use crate::traits::{AffectedProjectsProvider, ChangesetWriter, GitProvider, WorkspaceProvider};

#[derive(Debug, Default)]
pub struct GenerateInput {
    /// Overrides the configured base reference.
    pub base: Option<String>,
    /// Changed files supplied by the caller; the diff is skipped when set.
    pub files: Option<Vec<PathBuf>>,
}

#[derive(Debug)]
pub enum GenerateOutcome {
    NoChanges {
        base: String,
    },
    NoAffectedProjects {
        changed_files: Vec<PathBuf>,
    },
    NoAffectedPackages {
        affected_projects: Vec<String>,
        mapping: ProjectMapping,
    },
    Created {
        file_path: PathBuf,
        changeset: Changeset,
        changed_files: Vec<PathBuf>,
    },
}

pub struct GenerateOperation<W, G, A, C> {
    workspace_provider: W,
    git_provider: G,
    graph_provider: A,
    changeset_writer: C,
}

impl<W, G, A, C> GenerateOperation<W, G, A, C>
where
    W: WorkspaceProvider,
    G: GitProvider,
    A: AffectedProjectsProvider,
    C: ChangesetWriter,
{
    pub fn new(
        workspace_provider: W,
        git_provider: G,
        graph_provider: A,
        changeset_writer: C,
    ) -> Self {
        Self {
            workspace_provider,
            git_provider,
            graph_provider,
            changeset_writer,
        }
    }

    /// Detects changed files, resolves the affected workspace packages and
    /// writes a patch changeset for them.
    ///
    /// # Errors
    ///
    /// Returns an error if the workspace manifests cannot be loaded, the diff or
    /// build-graph command fails, or the changeset cannot be written.
    pub fn execute(&self, project_root: &Path, input: GenerateInput) -> Result<GenerateOutcome> {
        let workspace = self.workspace_provider.load_workspace(project_root)?;
        let base = input
            .base
            .unwrap_or_else(|| workspace.config.base_ref().to_string());

        let changed_files: Vec<PathBuf> = match input.files {
            Some(files) => files
                .into_iter()
                .filter(|f| !f.as_os_str().is_empty())
                .collect(),
            None => self.git_provider.changed_files(project_root, &base)?,
        };
        if changed_files.is_empty() {
            return Ok(GenerateOutcome::NoChanges { base });
        }
        info!(count = changed_files.len(), base = %base, "changed files detected");

        let affected_projects = self.graph_provider.affected_projects(
            project_root,
            workspace.config.graph_command(),
            &changed_files,
        )?;
        if affected_projects.is_empty() {
            return Ok(GenerateOutcome::NoAffectedProjects { changed_files });
        }
        debug!(projects = ?affected_projects, "affected projects");

        let packages = self.workspace_provider.enumerate_packages(&workspace)?;
        let mapping =
            self.workspace_provider
                .map_projects(&workspace, &affected_projects, &packages);
        if mapping.is_empty() {
            return Ok(GenerateOutcome::NoAffectedPackages {
                affected_projects,
                mapping,
            });
        }

        let changeset = Changeset {
            summary: summary_for_changed_files(&changed_files),
            releases: mapping
                .packages
                .iter()
                .map(|name| PackageRelease::auto(name.as_str()))
                .collect(),
        };

        let file_path = self
            .changeset_writer
            .write_changeset(workspace.config.changeset_dir(), &changeset)?;
        info!(path = %file_path.display(), "created changeset");

        Ok(GenerateOutcome::Created {
            file_path,
            changeset,
            changed_files,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use changeset_core::BumpType;
    use changeset_workspace::MemoryFileSystem;

    use super::*;
    use crate::error::OperationError;
    use crate::mocks::{MockChangesetWriter, MockGitProvider, MockGraphProvider};
    use crate::providers::FileSystemWorkspaceProvider;

    const ROOT: &str = "/repo";

    fn monorepo() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file(
                "/repo/package.json",
                r#"{"private": true, "workspaces": ["packages/*"]}"#,
            )
            .with_file(
                "/repo/workspace.json",
                r#"{"projects": {"foo": "packages/foo", "bar": "packages/bar", "docs": "docs", "lint": "tools/lint"}}"#,
            )
            .with_file("/repo/packages/foo/package.json", r#"{"name": "@scope/foo"}"#)
            .with_file("/repo/packages/bar/package.json", r#"{"name": "@scope/bar"}"#)
            .with_file("/repo/tools/lint/package.json", r#"{"name": "@scope/lint"}"#)
            .with_dir("/repo/docs")
    }

    fn operation(
        fs: MemoryFileSystem,
        git: MockGitProvider,
        graph: MockGraphProvider,
    ) -> GenerateOperation<
        FileSystemWorkspaceProvider<MemoryFileSystem>,
        MockGitProvider,
        MockGraphProvider,
        MockChangesetWriter,
    > {
        GenerateOperation::new(
            FileSystemWorkspaceProvider::with_file_system(fs),
            git,
            graph,
            MockChangesetWriter::new(),
        )
    }

    #[test]
    fn creates_changeset_for_affected_package() {
        let op = operation(
            monorepo(),
            MockGitProvider::new().with_changed_files(&["packages/foo/index.ts"]),
            MockGraphProvider::new().with_projects(&["foo"]),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        let (file_path, changeset, changed_files) = match outcome {
            GenerateOutcome::Created {
                file_path,
                changeset,
                changed_files,
            } => (file_path, changeset, changed_files),
            other => panic!("expected Created, got {other:?}"),
        };
        assert_eq!(file_path, PathBuf::from(".changeset/mock-changeset.md"));
        assert_eq!(changeset.releases.len(), 1);
        assert_eq!(changeset.releases[0].name, "@scope/foo");
        assert_eq!(changeset.releases[0].bump_type, BumpType::Patch);
        assert_eq!(
            changeset.summary,
            "Auto-bump for changes in: packages/foo/index.ts"
        );
        assert_eq!(changed_files, vec![PathBuf::from("packages/foo/index.ts")]);
        assert_eq!(op.changeset_writer.written_changesets().len(), 1);
    }

    #[test]
    fn diff_uses_configured_base_ref() {
        let op = operation(
            monorepo(),
            MockGitProvider::new(),
            MockGraphProvider::new(),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        assert!(matches!(outcome, GenerateOutcome::NoChanges { base } if base == "origin/main"));
        assert_eq!(op.git_provider.requested_bases(), vec!["origin/main"]);
    }

    #[test]
    fn base_override_reaches_git_provider() {
        let op = operation(
            monorepo(),
            MockGitProvider::new(),
            MockGraphProvider::new(),
        );
        let input = GenerateInput {
            base: Some("main".to_string()),
            files: None,
        };

        op.execute(Path::new(ROOT), input).expect("should succeed");

        assert_eq!(op.git_provider.requested_bases(), vec!["main"]);
    }

    #[test]
    fn no_changes_short_circuits_before_graph() {
        let op = operation(
            monorepo(),
            MockGitProvider::new(),
            MockGraphProvider::new().with_projects(&["foo"]),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        assert!(matches!(outcome, GenerateOutcome::NoChanges { .. }));
        assert!(op.graph_provider.calls().is_empty());
        assert!(op.changeset_writer.written_changesets().is_empty());
    }

    #[test]
    fn explicit_files_skip_the_diff() {
        let op = operation(
            monorepo(),
            MockGitProvider::new().with_changed_files(&["ignored.ts"]),
            MockGraphProvider::new().with_projects(&["bar"]),
        );
        let input = GenerateInput {
            base: None,
            files: Some(vec![PathBuf::from("packages/bar/lib.ts"), PathBuf::new()]),
        };

        let outcome = op.execute(Path::new(ROOT), input).expect("should succeed");

        assert!(matches!(outcome, GenerateOutcome::Created { .. }));
        assert!(op.git_provider.requested_bases().is_empty());
        assert_eq!(
            op.graph_provider.calls(),
            vec![vec![PathBuf::from("packages/bar/lib.ts")]]
        );
    }

    #[test]
    fn no_affected_projects_writes_nothing() {
        let op = operation(
            monorepo(),
            MockGitProvider::new().with_changed_files(&["README.md"]),
            MockGraphProvider::new(),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        assert!(matches!(
            outcome,
            GenerateOutcome::NoAffectedProjects { changed_files } if changed_files == vec![PathBuf::from("README.md")]
        ));
        assert!(op.changeset_writer.written_changesets().is_empty());
    }

    #[test]
    fn project_without_manifest_yields_no_affected_packages() {
        let op = operation(
            monorepo(),
            MockGitProvider::new().with_changed_files(&["docs/intro.md"]),
            MockGraphProvider::new().with_projects(&["docs"]),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        let mapping = match outcome {
            GenerateOutcome::NoAffectedPackages { mapping, .. } => mapping,
            other => panic!("expected NoAffectedPackages, got {other:?}"),
        };
        assert_eq!(mapping.manifestless_projects, vec!["docs"]);
        assert!(op.changeset_writer.written_changesets().is_empty());
    }

    #[test]
    fn utility_packages_are_never_released() {
        let op = operation(
            monorepo(),
            MockGitProvider::new().with_changed_files(&["tools/lint/index.js"]),
            MockGraphProvider::new().with_projects(&["lint", "foo", "lint", "unknown"]),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        let changeset = match outcome {
            GenerateOutcome::Created { changeset, .. } => changeset,
            other => panic!("expected Created, got {other:?}"),
        };
        let names: Vec<_> = changeset.releases.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["@scope/foo"]);
    }

    #[test]
    fn one_release_per_distinct_package() {
        let op = operation(
            monorepo(),
            MockGitProvider::new()
                .with_changed_files(&["packages/foo/a.ts", "packages/bar/b.ts"]),
            MockGraphProvider::new().with_projects(&["bar", "foo", "bar"]),
        );

        let outcome = op
            .execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        let changeset = match outcome {
            GenerateOutcome::Created { changeset, .. } => changeset,
            other => panic!("expected Created, got {other:?}"),
        };
        let names: Vec<_> = changeset.releases.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["@scope/bar", "@scope/foo"]);
    }

    #[test]
    fn graph_failure_is_fatal_and_writes_nothing() {
        let op = operation(
            monorepo(),
            MockGitProvider::new().with_changed_files(&["packages/foo/index.ts"]),
            MockGraphProvider::failing("nx crashed"),
        );

        let result = op.execute(Path::new(ROOT), GenerateInput::default());

        assert!(matches!(
            result,
            Err(OperationError::GraphCommandFailed { stderr, .. }) if stderr == "nx crashed"
        ));
        assert!(op.changeset_writer.written_changesets().is_empty());
    }

    #[test]
    fn diff_failure_is_fatal() {
        let op = operation(
            monorepo(),
            MockGitProvider::failing("origin/main"),
            MockGraphProvider::new(),
        );

        let result = op.execute(Path::new(ROOT), GenerateInput::default());

        assert!(matches!(result, Err(OperationError::Git(_))));
        assert!(op.graph_provider.calls().is_empty());
    }

    #[test]
    fn missing_manifest_is_fatal() {
        let fs = MemoryFileSystem::new().with_file("/repo/workspace.json", "{}");
        let op = operation(
            fs,
            MockGitProvider::new().with_changed_files(&["a.ts"]),
            MockGraphProvider::new(),
        );

        let result = op.execute(Path::new(ROOT), GenerateInput::default());

        assert!(matches!(result, Err(OperationError::Workspace(_))));
        assert!(op.git_provider.requested_bases().is_empty());
    }

    #[test]
    fn configured_changeset_dir_and_command_are_used() {
        let fs = monorepo().with_file(
            "/repo/package.json",
            r#"{"workspaces": ["packages/*"], "autoChangeset": {"changesetDir": "changes", "graphCommand": ["nx", "show", "projects", "--affected"]}}"#,
        );
        let op = operation(
            fs,
            MockGitProvider::new().with_changed_files(&["packages/foo/index.ts"]),
            MockGraphProvider::new().with_projects(&["foo"]),
        );

        op.execute(Path::new(ROOT), GenerateInput::default())
            .expect("should succeed");

        let written = op.changeset_writer.written_changesets();
        assert_eq!(written[0].0, PathBuf::from("changes"));
        assert_eq!(
            op.graph_provider.commands(),
            vec![vec!["nx", "show", "projects", "--affected"]]
        );
    }
}
