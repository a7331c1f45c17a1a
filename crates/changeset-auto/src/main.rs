mod error;
mod logging;
mod output;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use changeset_operations::operations::{GenerateInput, GenerateOperation};
use changeset_operations::providers::{
    CommandGraphProvider, FileSystemChangesetWriter, FileSystemWorkspaceProvider, GitCliProvider,
};
use clap::Parser;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Parser)]
#[command(name = "changeset-auto")]
#[command(version)]
#[command(about = "Write a patch changeset for every workspace package affected by a diff", long_about = None)]
struct Cli {
    /// Repository root (default: enclosing git repository, else current directory)
    #[arg(long = "path", short = 'C')]
    path: Option<PathBuf>,

    /// Git reference to diff against (overrides `autoChangeset.baseRef`)
    #[arg(long)]
    base: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Changed files to use instead of diffing against the base reference
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let project_root = resolve_project_root(cli.path)?;
    debug!(root = %project_root.display(), "resolved project root");

    let operation = GenerateOperation::new(
        FileSystemWorkspaceProvider::new(),
        GitCliProvider::new(),
        CommandGraphProvider::new(),
        FileSystemChangesetWriter::new(&project_root),
    );
    let input = GenerateInput {
        base: cli.base,
        files: (!cli.files.is_empty()).then_some(cli.files),
    };

    let outcome = operation.execute(&project_root, input)?;

    if !cli.quiet {
        print!("{}", output::format_outcome(&project_root, &outcome));
    }
    Ok(())
}

fn resolve_project_root(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }
    let cwd = std::env::current_dir().map_err(CliError::CurrentDir)?;
    Ok(discover_root(&cwd))
}

fn discover_root(start: &Path) -> PathBuf {
    match changeset_git::repository_root(start) {
        Ok(root) => root,
        Err(e) => {
            debug!(error = %e, "not inside a git repository, using current directory");
            start.to_path_buf()
        }
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
