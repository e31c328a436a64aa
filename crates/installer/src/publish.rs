//! Publishing template files into the workspace

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// A template file shipped with the installer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Template name, for messages
    pub name: &'static str,
    /// File contents, copied verbatim
    pub contents: &'static str,
}

/// Where a template lands in the workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubMapping {
    pub template: Template,
    pub destination: PathBuf,
    /// Only publish when the step's selection equals this key
    pub when: Option<&'static str>,
}

impl StubMapping {
    /// Mapping published unconditionally
    pub fn new(template: Template, destination: impl Into<PathBuf>) -> Self {
        Self {
            template,
            destination: destination.into(),
            when: None,
        }
    }

    /// Restrict this mapping to one selection key
    pub fn when(mut self, choice: &'static str) -> Self {
        self.when = Some(choice);
        self
    }

    /// Whether this mapping applies to the given selection
    pub fn applies_to(&self, choice: Option<&str>) -> bool {
        match self.when {
            None => true,
            Some(key) => choice == Some(key),
        }
    }
}

/// Copy each template to its destination.
///
/// Parent directories are created as needed; existing files are overwritten.
/// Returns the written paths.
pub fn publish_stubs<'a>(stubs: impl IntoIterator<Item = &'a StubMapping>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for stub in stubs {
        if let Some(parent) = stub.destination.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&stub.destination, stub.template.contents).with_context(|| {
            format!(
                "Failed to publish {} to {}",
                stub.template.name,
                stub.destination.display()
            )
        })?;

        log::debug!(
            "Published {} to {}",
            stub.template.name,
            stub.destination.display()
        );
        written.push(stub.destination.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PINT: Template = Template {
        name: "pint.stub",
        contents: "{\"preset\": \"laravel\"}\n",
    };

    #[test]
    fn test_publish_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join(".github").join("workflows").join("ci.yml");

        let written = publish_stubs(&[StubMapping::new(PINT, &dest)]).unwrap();

        assert_eq!(written, vec![dest.clone()]);
        assert_eq!(fs::read_to_string(&dest).unwrap(), PINT.contents);
    }

    #[test]
    fn test_publish_overwrites() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("pint.json");
        fs::write(&dest, "old").unwrap();

        publish_stubs(&[StubMapping::new(PINT, &dest)]).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), PINT.contents);
    }

    #[test]
    fn test_publish_failure_is_reported() {
        let tmp = TempDir::new().unwrap();
        // A file where a directory is needed
        fs::write(tmp.path().join("tests"), "").unwrap();
        let dest = tmp.path().join("tests").join("Pest.php");

        assert!(publish_stubs(&[StubMapping::new(PINT, dest)]).is_err());
    }

    #[test]
    fn test_applies_to() {
        let any = StubMapping::new(PINT, "a");
        let checks = StubMapping::new(PINT, "a").when("checks");

        assert!(any.applies_to(None));
        assert!(any.applies_to(Some("deployer")));
        assert!(checks.applies_to(Some("checks")));
        assert!(!checks.applies_to(Some("deployer")));
        assert!(!checks.applies_to(None));
    }
}
