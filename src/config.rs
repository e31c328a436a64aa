//! Workspace settings (`starter-kit.toml`)

use crate::paths::{self, CONFIG_FILE};
use anyhow::{Context, Result};
use installer::WorkspaceContext;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional per-workspace settings; every field has a default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub paths: PathSettings,
    pub git: GitSettings,
}

/// Locations, relative to the base path unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathSettings {
    pub config: String,
    pub database: String,
    pub updates: String,
    /// SQLite database holding the ledger; updates run against it
    pub ledger: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            config: "config".to_string(),
            database: "database".to_string(),
            updates: "database/updates".to_string(),
            ledger: "database/database.sqlite".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitSettings {
    /// Commit a checkpoint after each installed step
    pub commit: bool,
}

impl Default for GitSettings {
    fn default() -> Self {
        Self { commit: true }
    }
}

impl Settings {
    /// Parse settings from TOML
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid starter-kit.toml format")
    }

    /// Load `starter-kit.toml` from `base`, or defaults if it does not exist
    pub fn load(base: &Path) -> Result<(Self, Option<PathBuf>)> {
        let path = base.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults", base.display());
            return Ok((Self::default(), None));
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        let settings =
            Self::from_toml(&content).with_context(|| format!("In {}", path.display()))?;
        log::debug!("Loaded settings from {}", path.display());
        Ok((settings, Some(path)))
    }
}

/// A resolved workspace: its locations plus the settings they came from
#[derive(Debug, Clone)]
pub struct Workspace {
    pub ctx: WorkspaceContext,
    pub settings: Settings,
    /// The settings file, if one was found
    pub settings_file: Option<PathBuf>,
}

impl Workspace {
    /// Resolve the base path (flag, env, cwd) and load its settings
    pub fn resolve(flag: Option<&str>) -> Result<Self> {
        Self::at(paths::base_path(flag)?)
    }

    /// Workspace rooted at `base`
    pub fn at(base: PathBuf) -> Result<Self> {
        let (settings, settings_file) = Settings::load(&base)?;
        let ctx = WorkspaceContext::new(&base)
            .with_config_path(paths::expand(&settings.paths.config))
            .with_database_path(paths::expand(&settings.paths.database));

        Ok(Self {
            ctx,
            settings,
            settings_file,
        })
    }

    /// Default directory scanned for update scripts
    pub fn updates_dir(&self) -> PathBuf {
        paths::resolve(&self.ctx.base_path, &self.settings.paths.updates)
    }

    /// The ledger database
    pub fn ledger_path(&self) -> PathBuf {
        paths::resolve(&self.ctx.base_path, &self.settings.paths.ledger)
    }
}
