use std::path::{Path, PathBuf};

use changeset_core::PackageInfo;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexMap;
use tracing::debug;

use crate::config::{AutoConfig, PNPM_WORKSPACE_FILE, ROOT_MANIFEST};
use crate::error::WorkspaceError;
use crate::fs::FileSystem;
use crate::manifest::{
    ProjectConfig, RootManifest, read_manifest, read_package_name, read_pnpm_workspace,
};

/// Everything read from the root manifest and the build-tool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub patterns: Vec<String>,
    /// Project id to directory, relative to `root`.
    pub project_paths: IndexMap<String, PathBuf>,
    pub config: AutoConfig,
}

/// # Errors
///
/// Returns `WorkspaceError` if the root manifest or the build-tool configuration
/// is missing or cannot be parsed.
pub fn load_workspace<F>(fs: &F, root: &Path) -> Result<Workspace, WorkspaceError>
where
    F: FileSystem + ?Sized,
{
    let manifest_path = root.join(ROOT_MANIFEST);
    let manifest: RootManifest = read_manifest(fs, &manifest_path)?;

    let config = AutoConfig::from_settings(manifest.auto_changeset, &manifest_path)?;

    let patterns = match manifest.workspaces {
        Some(workspaces) => workspaces.into_patterns(),
        None => read_pnpm_patterns(fs, root)?,
    };

    let project_config_path = root.join(config.project_config());
    let project_config: ProjectConfig = read_manifest(fs, &project_config_path)?;
    let project_paths = project_config
        .projects
        .into_iter()
        .map(|(id, entry)| (id, entry.into_path()))
        .collect();

    Ok(Workspace {
        root: root.to_path_buf(),
        patterns,
        project_paths,
        config,
    })
}

fn read_pnpm_patterns<F>(fs: &F, root: &Path) -> Result<Vec<String>, WorkspaceError>
where
    F: FileSystem + ?Sized,
{
    let path = root.join(PNPM_WORKSPACE_FILE);
    if !fs.exists(&path) {
        return Ok(Vec::new());
    }
    Ok(read_pnpm_workspace(fs, &path)?.packages)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberPattern<'a> {
    /// `packages/*`: every immediate subdirectory of the base.
    Children(&'a str),
    /// `tools/cli`: the directory itself.
    Single(&'a str),
}

fn parse_member_pattern(pattern: &str) -> Option<MemberPattern<'_>> {
    let trimmed = pattern.trim().trim_start_matches("./").trim_end_matches('/');
    let member = match trimmed
        .strip_suffix("/**")
        .or_else(|| trimmed.strip_suffix("/*"))
    {
        Some(base) => MemberPattern::Children(base),
        None if trimmed == "*" || trimmed == "**" => MemberPattern::Children(""),
        None => MemberPattern::Single(trimmed),
    };

    let base = match member {
        MemberPattern::Children(base) | MemberPattern::Single(base) => base,
    };
    if base.contains(['*', '?', '[', '{']) {
        return None;
    }
    Some(member)
}

/// Expands the workspace patterns into the publishable packages below `root`.
///
/// Missing or unlistable base directories and unreadable or nameless package
/// manifests are skipped. Patterns starting with `!` exclude matching
/// directories.
///
/// # Errors
///
/// Returns `WorkspaceError` if an exclusion pattern is not a valid glob.
pub fn enumerate_packages<F>(
    fs: &F,
    root: &Path,
    patterns: &[String],
) -> Result<Vec<PackageInfo>, WorkspaceError>
where
    F: FileSystem + ?Sized,
{
    let (excludes, includes): (Vec<&String>, Vec<&String>) =
        patterns.iter().partition(|p| p.starts_with('!'));
    let excludes = build_exclude_set(&excludes)?;

    let mut packages: Vec<PackageInfo> = Vec::new();

    for pattern in includes {
        let Some(member) = parse_member_pattern(pattern) else {
            debug!(pattern = %pattern, "unsupported workspace pattern, skipping");
            continue;
        };

        let candidates = match member {
            MemberPattern::Children(base) => {
                let base_dir = root.join(base);
                if !fs.exists(&base_dir) {
                    debug!(path = %base_dir.display(), "workspace directory does not exist");
                    continue;
                }
                match fs.list_dirs(&base_dir) {
                    Ok(dirs) => dirs,
                    Err(e) => {
                        debug!(
                            path = %base_dir.display(),
                            error = %e,
                            "cannot list workspace directory, skipping"
                        );
                        continue;
                    }
                }
            }
            MemberPattern::Single(dir) => vec![root.join(dir)],
        };

        for dir in candidates {
            let relative = dir.strip_prefix(root).unwrap_or(&dir);
            if excludes.is_match(relative) {
                debug!(path = %relative.display(), "package excluded by workspace pattern");
                continue;
            }
            if packages.iter().any(|p| p.path == dir) {
                continue;
            }
            if let Some(name) = read_package_name(fs, &dir) {
                packages.push(PackageInfo { name, path: dir });
            }
        }
    }

    Ok(packages)
}

fn build_exclude_set(patterns: &[&String]) -> Result<GlobSet, WorkspaceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob_text = pattern.trim_start_matches('!').trim_start_matches("./");
        let glob = Glob::new(glob_text).map_err(|source| WorkspaceError::GlobPattern {
            pattern: (*pattern).clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| WorkspaceError::GlobPattern {
        pattern: patterns
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        source,
    })
}
