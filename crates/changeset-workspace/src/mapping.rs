use std::collections::HashSet;
use std::path::{Path, PathBuf};

use changeset_core::PackageInfo;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::fs::FileSystem;
use crate::manifest::read_package_name;

/// Result of translating affected project ids into package names.
///
/// This is a data transfer object with intentionally public fields for direct access.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProjectMapping {
    /// Distinct publishable package names, in first-affected order.
    pub packages: Vec<String>,
    /// Project ids with no path in the build-tool configuration.
    pub unmapped_projects: Vec<String>,
    /// Project ids whose directory has no usable package manifest.
    pub manifestless_projects: Vec<String>,
    /// Package names that are not among the enumerated workspace packages.
    pub filtered_packages: Vec<String>,
}

impl ProjectMapping {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// Maps affected project ids to the publishable packages they correspond to.
///
/// Only names present in `known_packages` survive; everything else is recorded
/// in the corresponding skip list instead of failing.
#[must_use]
pub fn map_projects_to_packages<F>(
    fs: &F,
    root: &Path,
    affected_projects: &[String],
    project_paths: &IndexMap<String, PathBuf>,
    known_packages: &[PackageInfo],
) -> ProjectMapping
where
    F: FileSystem + ?Sized,
{
    let known: HashSet<&str> = known_packages.iter().map(|p| p.name.as_str()).collect();
    let projects: IndexSet<&String> = affected_projects.iter().collect();

    let mut packages = IndexSet::new();
    let mut mapping = ProjectMapping::default();

    for project in projects {
        let Some(relative) = project_paths.get(project) else {
            debug!(project = %project, "project has no configured path");
            mapping.unmapped_projects.push(project.clone());
            continue;
        };

        let Some(name) = read_package_name(fs, &root.join(relative)) else {
            debug!(project = %project, path = %relative.display(), "project has no package manifest");
            mapping.manifestless_projects.push(project.clone());
            continue;
        };

        if known.contains(name.as_str()) {
            packages.insert(name);
        } else {
            debug!(project = %project, package = %name, "package is not a workspace package");
            if !mapping.filtered_packages.contains(&name) {
                mapping.filtered_packages.push(name);
            }
        }
    }

    mapping.packages = packages.into_iter().collect();
    mapping
}
