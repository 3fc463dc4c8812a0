//! Migration file storage

use crate::error::{CoreError, CoreResult};
use crate::version::{file_name, parse_file_name, Version};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Access to the numbered migration files
pub trait MigrationFiles: Send + Sync {
    /// Whether a file exists for `version`
    fn file_exists(&self, version: Version) -> bool;

    /// Every version that has a file
    fn known_versions(&self) -> CoreResult<BTreeSet<Version>>;

    /// Lines of the file for `version`
    fn read_file(&self, version: Version) -> CoreResult<Vec<String>>;

    /// Create or overwrite the file for `version`
    fn write_file(&self, version: Version, content: &str) -> CoreResult<()>;

    /// Location of the file for `version`, for messages
    fn path_for(&self, version: Version) -> PathBuf;
}

/// Migration files stored as `<version>.sql` in one directory
#[derive(Debug, Clone)]
pub struct FsMigrationFiles {
    dir: PathBuf,
}

impl FsMigrationFiles {
    /// Files under `dir`. The directory is not required to exist yet.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if needed
    pub fn ensure_dir(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CoreError::IoWithPath {
            path: self.dir.display().to_string(),
            source: e,
        })
    }
}

impl MigrationFiles for FsMigrationFiles {
    fn file_exists(&self, version: Version) -> bool {
        self.path_for(version).is_file()
    }

    fn known_versions(&self) -> CoreResult<BTreeSet<Version>> {
        if !self.dir.is_dir() {
            return Err(CoreError::MigrationsDirNotFound {
                path: self.dir.display().to_string(),
            });
        }
        let entries = std::fs::read_dir(&self.dir).map_err(|e| CoreError::IoWithPath {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut versions = BTreeSet::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(parse_file_name) {
                Some(version) => {
                    versions.insert(version);
                }
                None => log::debug!(
                    "Ignoring non-migration file {}",
                    entry.path().display()
                ),
            }
        }
        Ok(versions)
    }

    fn read_file(&self, version: Version) -> CoreResult<Vec<String>> {
        let path = self.path_for(version);
        if !path.is_file() {
            return Err(CoreError::MissingMigrationFile { version });
        }
        let content = std::fs::read_to_string(&path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(content
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(String::from)
            .collect())
    }

    fn write_file(&self, version: Version, content: &str) -> CoreResult<()> {
        self.ensure_dir()?;
        let path = self.path_for(version);
        std::fs::write(&path, content).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn path_for(&self, version: Version) -> PathBuf {
        self.dir.join(file_name(version))
    }
}

#[cfg(test)]
#[path = "files_test.rs"]
mod tests;
