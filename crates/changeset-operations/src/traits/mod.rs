mod changeset_io;
mod git_provider;
mod graph_provider;
mod workspace_provider;

pub use changeset_io::ChangesetWriter;
pub use git_provider::GitProvider;
pub use graph_provider::AffectedProjectsProvider;
pub use workspace_provider::WorkspaceProvider;
