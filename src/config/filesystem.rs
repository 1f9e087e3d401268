//! File access used by the config loader and the query directory provider.
//!
//! Both only read text files and probe for their presence, so tests can swap
//! in an in-memory map of paths.

use std::path::{Path, PathBuf};

/// Read-only view of the files `antipattern-guard` looks at.
pub trait FileSystem {
    /// Contents of a config file or SQL resource.
    ///
    /// # Errors
    /// Returns the underlying I/O error, e.g. `NotFound`.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;

    /// Directory searched for `.antipattern-guard.toml`.
    ///
    /// # Errors
    /// Returns an error if the working directory is gone or inaccessible.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Per-user directory holding `config.toml`, `None` when the platform has no
    /// home directory (`~/.config/antipattern-guard` on Linux).
    fn config_dir(&self) -> Option<PathBuf>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "antipattern-guard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
