use std::path::{Path, PathBuf};

/// Read-only filesystem access used while discovering packages.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read as UTF-8.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Immediate subdirectories of `path`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be listed.
    fn list_dirs(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn list_dirs(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

#[cfg(any(test, feature = "testing"))]
mod memory {
    use std::collections::{BTreeMap, BTreeSet};
    use std::io::{Error, ErrorKind};
    use std::path::{Path, PathBuf};

    use super::FileSystem;

    /// In-memory filesystem fixture. Directories are implied by the files added.
    #[derive(Debug, Default, Clone)]
    pub struct MemoryFileSystem {
        files: BTreeMap<PathBuf, String>,
        dirs: BTreeSet<PathBuf>,
    }

    impl MemoryFileSystem {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        #[must_use]
        pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
            let path = path.into();
            if let Some(parent) = path.parent() {
                self.add_dir_chain(parent);
            }
            self.files.insert(path, content.into());
            self
        }

        #[must_use]
        pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            self.add_dir_chain(&path);
            self
        }

        fn add_dir_chain(&mut self, dir: &Path) {
            for ancestor in dir.ancestors() {
                if ancestor.as_os_str().is_empty() {
                    break;
                }
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    impl FileSystem for MemoryFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.files.contains_key(path) || self.dirs.contains(path)
        }

        fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| Error::new(ErrorKind::NotFound, path.display().to_string()))
        }

        fn list_dirs(&self, path: &Path) -> std::io::Result<Vec<PathBuf>> {
            if !self.dirs.contains(path) {
                return Err(Error::new(ErrorKind::NotFound, path.display().to_string()));
            }
            Ok(self
                .dirs
                .iter()
                .filter(|dir| dir.parent() == Some(path))
                .cloned()
                .collect())
        }
    }
}

#[cfg(any(test, feature = "testing"))]
pub use memory::MemoryFileSystem;
