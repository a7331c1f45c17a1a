mod changeset_io;
mod git;
mod graph;
mod workspace;

pub use changeset_io::FileSystemChangesetWriter;
pub use git::GitCliProvider;
pub use graph::{CommandGraphProvider, parse_project_list};
pub use workspace::FileSystemWorkspaceProvider;
