//! Creation of new update scripts

use crate::error::Result;
use crate::name::{EXTENSION, slug, timestamped};
use chrono::NaiveDateTime;
use std::fs;
use std::path::{Path, PathBuf};

/// A freshly written update script
#[derive(Debug, Clone)]
pub struct GeneratedUpdate {
    /// File name including extension, e.g. `2025_03_01_100000_add_users_table.sql`
    pub file_name: String,
    /// Full path of the written file
    pub path: PathBuf,
}

/// Write a new update script named after `name` into `dir`.
///
/// The directory is created if missing. Two calls within the same second with
/// the same name target the same file; callers create updates one at a time.
pub fn generate(
    dir: &Path,
    name: &str,
    template: &str,
    at: NaiveDateTime,
) -> Result<GeneratedUpdate> {
    let file_name = format!("{}.{EXTENSION}", timestamped(at, &slug(name)?));

    fs::create_dir_all(dir)?;
    let path = dir.join(&file_name);
    fs::write(&path, template)?;

    log::debug!("Wrote update template to {}", path.display());
    Ok(GeneratedUpdate { file_name, path })
}
