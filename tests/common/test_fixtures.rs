//! Test fixtures for creating repository trees on disk

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary root directory populated with fake working copies
pub struct RootFixture {
    dir: TempDir,
}

impl RootFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp root"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a `/`-separated location below the root
    pub fn join(&self, rel: &str) -> PathBuf {
        rel.split('/').fold(self.path().to_path_buf(), |p, s| p.join(s))
    }

    /// Create a working copy at `rel` marked with `marker` (`.git`, `.hg`, ...)
    pub fn add_repo(&self, rel: &str, marker: &str) -> PathBuf {
        let dir = self.join(rel);
        fs::create_dir_all(dir.join(marker)).expect("Failed to create marker");
        fs::write(dir.join("README.md"), "# Test Repository\n").expect("Failed to write file");
        dir
    }

    /// Create a plain directory at `rel`
    pub fn add_dir(&self, rel: &str) -> PathBuf {
        let dir = self.join(rel);
        fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Create a symbolic link at `rel` pointing to `target`
    #[cfg(unix)]
    pub fn add_symlink(&self, rel: &str, target: &Path) -> PathBuf {
        let link = self.join(rel);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent).expect("Failed to create link parent");
        }
        std::os::unix::fs::symlink(target, &link).expect("Failed to create symlink");
        link
    }
}
