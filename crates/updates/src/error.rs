//! Error types for the updates crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating or running database updates
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Updates directory given explicitly does not exist
    #[error("updates directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// An update script failed; it was not recorded and the run stopped
    #[error("update {name} failed: {source}")]
    UpdateFailed {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Free-text update name normalises to nothing usable
    #[error("invalid update name: {0:?}")]
    InvalidName(String),
}

/// Result type for update operations
pub type Result<T> = std::result::Result<T, Error>;
