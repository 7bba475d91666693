//! File-backed, ordered collection of configurations.
//!
//! The file is a JSON array of `{ "name", "locations", "rules" }` objects.
//! Loading never fails: a missing or unreadable document yields an empty
//! collection. Saving always rewrites the whole collection through a
//! temporary file that is renamed over the target.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::model::CodeExplorerConfiguration;

/// Errors from saving configurations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Creating the directory or writing the temporary file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// Path being written.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// Encoding the configurations failed (e.g. a non UTF-8 location).
    #[error("failed to encode configurations: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Renaming the temporary file over the target failed.
    #[error("failed to replace {path}: {source}")]
    Persist {
        /// Path being replaced.
        path: PathBuf,
        /// IO error from the rename.
        source: std::io::Error,
    },
}

/// Ordered configurations bound to a backing file.
///
/// Readers get cheap immutable snapshots from [`configurations`](Self::configurations);
/// mutations copy the sequence if a snapshot is still alive.
#[derive(Debug, Clone)]
pub struct CodeExplorerConfigurations {
    path: PathBuf,
    configurations: Arc<Vec<CodeExplorerConfiguration>>,
}

impl CodeExplorerConfigurations {
    /// Creates a collection bound to `path` without touching the file system.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, configurations: Vec<CodeExplorerConfiguration>) -> Self {
        Self {
            path: path.into(),
            configurations: Arc::new(configurations),
        }
    }

    /// Loads configurations from `path`.
    ///
    /// A missing, unreadable or malformed file yields an empty collection.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let configurations = read_configurations(&path).unwrap_or_default();
        tracing::debug!(
            path = %path.display(),
            count = configurations.len(),
            "loaded configurations"
        );
        Self::new(path, configurations)
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Immutable snapshot of the current sequence.
    #[must_use]
    pub fn configurations(&self) -> Arc<Vec<CodeExplorerConfiguration>> {
        Arc::clone(&self.configurations)
    }

    /// Configuration at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CodeExplorerConfiguration> {
        self.configurations.get(index)
    }

    /// Index of the first configuration with the given name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.configurations.iter().position(|c| c.name() == name)
    }

    /// Number of configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    /// True if there are no configurations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    /// Appends a configuration.
    pub fn add(&mut self, configuration: CodeExplorerConfiguration) {
        Arc::make_mut(&mut self.configurations).push(configuration);
    }

    /// Removes and returns the configuration at `index`.
    pub fn remove(&mut self, index: usize) -> Option<CodeExplorerConfiguration> {
        if index >= self.configurations.len() {
            return None;
        }
        Some(Arc::make_mut(&mut self.configurations).remove(index))
    }

    /// Replaces the configuration at `index`, returning the previous one.
    pub fn replace(
        &mut self,
        index: usize,
        configuration: CodeExplorerConfiguration,
    ) -> Option<CodeExplorerConfiguration> {
        if index >= self.configurations.len() {
            return None;
        }
        let slot = &mut Arc::make_mut(&mut self.configurations)[index];
        Some(std::mem::replace(slot, configuration))
    }

    /// Writes the whole collection to the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails. The previous file
    /// content is left untouched in that case.
    pub fn save(&self) -> Result<(), StoreError> {
        self.save_to(&self.path)
    }

    /// Writes the whole collection to `path` instead of the backing file.
    ///
    /// # Errors
    ///
    /// See [`save`](Self::save).
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        let content = serde_json::to_vec_pretty(self.configurations.as_slice())?;

        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let io_err = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        std::fs::create_dir_all(&dir).map_err(io_err)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(io_err)?;
        tmp.write_all(&content).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(path).map_err(|e| StoreError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::debug!(
            path = %path.display(),
            count = self.configurations.len(),
            "saved configurations"
        );
        Ok(())
    }
}

fn read_configurations(path: &Path) -> Option<Vec<CodeExplorerConfiguration>> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read configurations");
            return None;
        }
    };
    match serde_json::from_slice(&content) {
        Ok(configurations) => Some(configurations),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring malformed configurations");
            None
        }
    }
}
