use std::path::{Path, PathBuf};

use crate::config::{FileSystem, RealFileSystem};
use crate::error::{AntipatternGuardError, Result};

use super::{NamedQuery, QueryProvider, parse_resource};

/// Reads SQL resources from `<dir>/<resource>.sql`.
#[derive(Debug, Clone)]
pub struct DirectoryQueries<F: FileSystem = RealFileSystem> {
    dir: PathBuf,
    fs: F,
}

impl DirectoryQueries<RealFileSystem> {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, RealFileSystem)
    }
}

impl<F: FileSystem> DirectoryQueries<F> {
    #[must_use]
    pub fn with_fs(dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn resource_path(&self, resource: &str) -> PathBuf {
        self.dir.join(format!("{resource}.sql"))
    }
}

impl<F: FileSystem> QueryProvider for DirectoryQueries<F> {
    fn queries(&self, resource: &str) -> Result<Vec<NamedQuery>> {
        let path = self.resource_path(resource);
        if !self.fs.exists(&path) {
            return Err(AntipatternGuardError::UnknownQueryResource(format!(
                "{resource} (looked for {})",
                path.display()
            )));
        }
        let content =
            self.fs
                .read_to_string(&path)
                .map_err(|source| AntipatternGuardError::FileAccess {
                    path: path.clone(),
                    source,
                })?;
        tracing::debug!(resource, path = %path.display(), "loaded query resource");
        parse_resource(resource, &content)
    }
}
