//! Workspace path resolution
//!
//! # Base Path Resolution Priority
//!
//! 1. `--path <DIR>` global flag
//! 2. `STARTER_KIT_BASE_PATH` environment variable
//! 3. The current directory
//!
//! Flag and variable values have `~` and environment variables expanded.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for the workspace base path
pub const ENV_BASE_PATH: &str = "STARTER_KIT_BASE_PATH";

/// Name of the optional workspace config file, looked up in the base path
pub const CONFIG_FILE: &str = "starter-kit.toml";

/// Resolve the workspace base path
pub fn base_path(flag: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        let path = expand(dir);
        log::debug!("Using base path from --path: {}", path.display());
        return absolute(path);
    }

    if let Ok(dir) = std::env::var(ENV_BASE_PATH) {
        let path = expand(&dir);
        log::debug!("Using base path from {ENV_BASE_PATH}: {}", path.display());
        return absolute(path);
    }

    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    log::debug!("Using current directory as base path: {}", cwd.display());
    Ok(cwd)
}

/// Expand ~ and environment variables in a path string.
///
/// Unknown variables are left as-is.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

/// Join a relative path onto `base`; absolute paths are returned unchanged
pub fn resolve(base: &Path, path: &str) -> PathBuf {
    base.join(expand(path))
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    Ok(cwd.join(path))
}
