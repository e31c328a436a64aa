//! The workspace an installer run operates on

use std::path::{Path, PathBuf};

/// Locations inside the application workspace.
///
/// Passed explicitly to every component that touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceContext {
    /// Workspace root; commands run here
    pub base_path: PathBuf,
    /// Application config directory
    pub config_path: PathBuf,
    /// Application database directory
    pub database_path: PathBuf,
}

impl WorkspaceContext {
    /// Context with the conventional `config/` and `database/` layout
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        let base_path = base_path.into();
        Self {
            config_path: base_path.join("config"),
            database_path: base_path.join("database"),
            base_path,
        }
    }

    /// Override the config directory (relative paths resolve against the base)
    pub fn with_config_path(mut self, path: impl AsRef<Path>) -> Self {
        self.config_path = self.base(path);
        self
    }

    /// Override the database directory (relative paths resolve against the base)
    pub fn with_database_path(mut self, path: impl AsRef<Path>) -> Self {
        self.database_path = self.base(path);
        self
    }

    /// Path relative to the workspace root
    pub fn base(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.base_path.join(rel)
    }

    /// Path relative to the config directory
    pub fn config(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.config_path.join(rel)
    }

    /// Path relative to the database directory
    pub fn database(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.database_path.join(rel)
    }
}
