//! Discovery of update scripts on disk

use crate::error::Result;
use crate::name::{EXTENSION, is_update_name};
use std::fs;
use std::path::{Path, PathBuf};

/// An update script found in the updates directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UpdateDescriptor {
    /// File stem, `YYYY_MM_DD_HHMMSS_<slug>`; sorting by name is chronological
    pub name: String,
    /// Full path to the script
    pub path: PathBuf,
}

impl UpdateDescriptor {
    /// Read the script body
    pub fn read(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Scan `dir` for update scripts, sorted by name ascending.
///
/// A missing directory yields an empty list. Subdirectories, files with a
/// different extension and files without a timestamp prefix are ignored.
pub fn discover(dir: &Path) -> Result<Vec<UpdateDescriptor>> {
    if !dir.is_dir() {
        log::debug!("Updates directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut found = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if !entry.file_type()?.is_file() {
            continue;
        }

        if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if !is_update_name(stem) {
            log::debug!("Ignoring {} (no timestamp prefix)", path.display());
            continue;
        }

        found.push(UpdateDescriptor {
            name: stem.to_string(),
            path,
        });
    }

    found.sort();
    Ok(found)
}
