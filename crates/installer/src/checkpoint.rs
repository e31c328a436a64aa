//! Version-control checkpoints after completed steps

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Records a checkpoint of the workspace.
///
/// Checkpoints are a convenience, not a correctness requirement:
/// implementations swallow their own failures.
pub trait Committer {
    /// Stage everything and commit with `message`
    fn commit(&self, message: &str);
}

/// Commits with the `git` binary: `git add .` then `git commit -q -m <message>`
#[derive(Debug, Clone)]
pub struct GitCommitter {
    cwd: PathBuf,
}

impl GitCommitter {
    /// Committer for the repository containing `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    fn git(&self, args: &[&str]) -> bool {
        match Command::new("git")
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
        {
            Ok(output) if output.status.success() => true,
            Ok(output) => {
                log::debug!(
                    "git {} failed: {}",
                    args.join(" "),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                log::debug!("Failed to execute git: {e}");
                false
            }
        }
    }
}

impl Committer for GitCommitter {
    fn commit(&self, message: &str) {
        if self.git(&["add", "."]) && self.git(&["commit", "-q", "-m", message]) {
            log::info!("Committed checkpoint: {message}");
        } else {
            log::warn!("Could not commit checkpoint \"{message}\" (no repository or nothing to commit)");
        }
    }
}

/// Committer that does nothing
pub struct NoCommit;

impl Committer for NoCommit {
    fn commit(&self, message: &str) {
        log::debug!("Checkpoints disabled, not committing \"{message}\"");
    }
}
