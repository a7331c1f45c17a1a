use std::fmt;
use std::path::PathBuf;

/// Bump level every automatically generated release receives.
pub const AUTO_BUMP: BumpType = BumpType::Patch;

/// Front-matter bump marker. Generated fragments only ever request a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BumpType {
    Patch,
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patch => write!(f, "patch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRelease {
    pub name: String,
    pub bump_type: BumpType,
}

impl PackageRelease {
    #[must_use]
    pub fn auto(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bump_type: AUTO_BUMP,
        }
    }
}

/// A changeset fragment: one release line per package plus a free-text summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Changeset {
    pub summary: String,
    pub releases: Vec<PackageRelease>,
}

/// A publishable package found under one of the workspace patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub path: PathBuf,
}
