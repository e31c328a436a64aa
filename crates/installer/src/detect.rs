//! Feature detection against the live workspace
//!
//! Whether a feature is installed is never stored anywhere: each feature has a
//! marker (a file, a directory, a file name pattern) that is checked fresh on
//! every call.

use crate::workspace::WorkspaceContext;
use std::path::PathBuf;
use walkdir::WalkDir;

/// A side-effect-free installed check
pub type Detector = Box<dyn Fn(&WorkspaceContext) -> bool + Send + Sync>;

/// Registry mapping feature ids to detectors
pub struct FeatureDetector {
    ctx: WorkspaceContext,
    detectors: Vec<(String, Detector)>,
}

impl FeatureDetector {
    /// Empty registry for a workspace
    pub fn new(ctx: WorkspaceContext) -> Self {
        Self {
            ctx,
            detectors: Vec::new(),
        }
    }

    /// Register (or replace) the detector for a feature
    pub fn register(&mut self, id: impl Into<String>, detector: Detector) -> &mut Self {
        let id = id.into();
        self.detectors.retain(|(existing, _)| *existing != id);
        self.detectors.push((id, detector));
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, id: impl Into<String>, detector: Detector) -> Self {
        self.register(id, detector);
        self
    }

    /// Whether the feature's marker is present right now.
    ///
    /// Unknown features report `false` so they get installed rather than
    /// silently skipped.
    pub fn is_installed(&self, id: &str) -> bool {
        match self.detectors.iter().find(|(existing, _)| existing == id) {
            Some((_, detector)) => detector(&self.ctx),
            None => {
                log::debug!("No detector registered for feature '{id}'");
                false
            }
        }
    }

    /// Registered feature ids, in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.detectors.iter().map(|(id, _)| id.as_str())
    }
}

/// Marker: a file or directory exists
pub fn path_exists<F>(resolve: F) -> Detector
where
    F: Fn(&WorkspaceContext) -> PathBuf + Send + Sync + 'static,
{
    Box::new(move |ctx| resolve(ctx).exists())
}

/// Marker: some file below a directory (recursively) has `needle` in its name
pub fn file_name_contains<F>(dir: F, needle: &'static str) -> Detector
where
    F: Fn(&WorkspaceContext) -> PathBuf + Send + Sync + 'static,
{
    Box::new(move |ctx| {
        let dir = dir(ctx);
        if !dir.is_dir() {
            return false;
        }

        WalkDir::new(&dir)
            .into_iter()
            .filter_map(|e| match e {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::debug!("Skipping unreadable entry under {}: {err}", dir.display());
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .any(|e| e.file_name().to_string_lossy().contains(needle))
    })
}
