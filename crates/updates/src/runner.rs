//! Applying pending updates in order

use crate::descriptor::{UpdateDescriptor, discover};
use crate::error::{Error, Result};
use crate::ledger::Ledger;
use crate::types::{ProgressCallback, RunSummary};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Runs the updates found in one directory against a ledger.
///
/// Not safe to run twice concurrently against the same ledger; callers
/// serialise invocations.
pub struct Runner<'a> {
    ledger: &'a mut Ledger,
    dir: PathBuf,
}

impl<'a> Runner<'a> {
    /// Create a runner scanning `dir`
    pub fn new(ledger: &'a mut Ledger, dir: &Path) -> Self {
        Self {
            ledger,
            dir: dir.to_path_buf(),
        }
    }

    /// Create a runner for a directory that must exist.
    ///
    /// Used when the directory was named explicitly, so a typo is reported
    /// instead of silently finding nothing to run.
    pub fn with_required_dir(ledger: &'a mut Ledger, dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::DirectoryNotFound(dir.to_path_buf()));
        }
        Ok(Self::new(ledger, dir))
    }

    /// Updates on disk that the ledger has not recorded, oldest first
    pub fn pending(&self) -> Result<Vec<UpdateDescriptor>> {
        let applied = self.ledger.applied()?;

        Ok(discover(&self.dir)?
            .into_iter()
            .filter(|d| !applied.contains(&d.name))
            .collect())
    }

    /// Apply every pending update, one at a time, oldest first.
    ///
    /// Each update is recorded immediately after it succeeds. The first
    /// failure stops the run; the failing update stays unrecorded and later
    /// updates are not attempted, so re-running resumes from it.
    pub fn run<P: ProgressCallback>(&mut self, progress: &mut P) -> Result<RunSummary> {
        let pending = self.pending()?;
        progress.on_start(pending.len());

        let mut summary = RunSummary::default();

        for update in pending {
            progress.on_update(&update.name);
            let started = Instant::now();

            if let Err(e) = self.apply(&update) {
                progress.on_update_failed(&update.name);
                return Err(Error::UpdateFailed {
                    name: update.name,
                    source: Box::new(e),
                });
            }

            log::info!("Applied update {}", update.name);
            progress.on_update_complete(&update.name, started.elapsed());
            summary.applied.push(update.name);
        }

        Ok(summary)
    }

    /// Report pending updates without executing or recording them
    pub fn pretend<P: ProgressCallback>(&self, progress: &mut P) -> Result<RunSummary> {
        let pending = self.pending()?;
        progress.on_start(pending.len());

        let mut summary = RunSummary::default();
        for update in pending {
            progress.on_pretend(&update.name);
            summary.pretended.push(update.name);
        }
        Ok(summary)
    }

    fn apply(&mut self, update: &UpdateDescriptor) -> Result<()> {
        let sql = update.read()?;
        self.ledger.apply(&update.name, &sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoProgress;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Records callback order
    #[derive(Default)]
    struct Recorder {
        started: Vec<String>,
        completed: Vec<String>,
        failed: Vec<String>,
    }

    impl ProgressCallback for Recorder {
        fn on_start(&mut self, _pending: usize) {}
        fn on_update(&mut self, name: &str) {
            self.started.push(name.to_string());
        }
        fn on_update_complete(&mut self, name: &str, _elapsed: Duration) {
            self.completed.push(name.to_string());
        }
        fn on_update_failed(&mut self, name: &str) {
            self.failed.push(name.to_string());
        }
    }

    /// Each update appends its letter to a `log` table so execution order is observable
    fn write_update(dir: &Path, name: &str) {
        let letter = name.rsplit('_').next().unwrap();
        fs::write(
            dir.join(format!("{name}.sql")),
            format!("INSERT INTO log (letter) VALUES ('{letter}');"),
        )
        .unwrap();
    }

    fn setup() -> (TempDir, PathBuf, Ledger) {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("updates");
        fs::create_dir(&dir).unwrap();

        let ledger = Ledger::open(&tmp.path().join("database.sqlite")).unwrap();
        ledger
            .connection()
            .execute_batch("CREATE TABLE log (id INTEGER PRIMARY KEY, letter TEXT NOT NULL);")
            .unwrap();

        (tmp, dir, ledger)
    }

    fn executed(ledger: &Ledger) -> Vec<String> {
        let mut stmt = ledger
            .connection()
            .prepare("SELECT letter FROM log ORDER BY id")
            .unwrap();
        let letters = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect();
        letters
    }

    #[test]
    fn test_run_applies_only_unrecorded_in_order() {
        let (_tmp, dir, mut ledger) = setup();
        write_update(&dir, "2024_01_01_000003_c");
        write_update(&dir, "2024_01_01_000001_a");
        write_update(&dir, "2024_01_01_000002_b");
        ledger.apply("2024_01_01_000001_a", "").unwrap();

        let mut recorder = Recorder::default();
        let summary = Runner::new(&mut ledger, &dir).run(&mut recorder).unwrap();

        assert_eq!(
            summary.applied,
            vec!["2024_01_01_000002_b", "2024_01_01_000003_c"]
        );
        assert_eq!(recorder.started, summary.applied);
        assert_eq!(executed(&ledger), vec!["b", "c"]);
    }

    #[test]
    fn test_run_twice_never_reapplies() {
        let (_tmp, dir, mut ledger) = setup();
        write_update(&dir, "2024_01_01_000001_a");
        write_update(&dir, "2024_01_01_000002_b");

        let first = Runner::new(&mut ledger, &dir).run(&mut NoProgress).unwrap();
        let second = Runner::new(&mut ledger, &dir).run(&mut NoProgress).unwrap();
        let third = Runner::new(&mut ledger, &dir).run(&mut NoProgress).unwrap();

        assert_eq!(first.applied.len(), 2);
        assert!(second.is_empty());
        assert!(third.is_empty());
        assert_eq!(executed(&ledger), vec!["a", "b"]);
    }

    #[test]
    fn test_failure_stops_run_and_resumes() {
        let (_tmp, dir, mut ledger) = setup();
        write_update(&dir, "2024_01_01_000001_a");
        fs::write(
            dir.join("2024_01_01_000002_b.sql"),
            "INSERT INTO missing_table VALUES (1);",
        )
        .unwrap();
        write_update(&dir, "2024_01_01_000003_c");

        let mut recorder = Recorder::default();
        let err = Runner::new(&mut ledger, &dir)
            .run(&mut recorder)
            .unwrap_err();

        match err {
            Error::UpdateFailed { name, .. } => assert_eq!(name, "2024_01_01_000002_b"),
            other => panic!("Expected UpdateFailed, got: {other:?}"),
        }
        assert_eq!(recorder.completed, vec!["2024_01_01_000001_a"]);
        assert_eq!(recorder.failed, vec!["2024_01_01_000002_b"]);
        assert_eq!(
            ledger.applied().unwrap().into_iter().collect::<Vec<_>>(),
            vec!["2024_01_01_000001_a"]
        );
        assert_eq!(executed(&ledger), vec!["a"]);

        // Fix the broken update and resume
        write_update(&dir, "2024_01_01_000002_b");
        let summary = Runner::new(&mut ledger, &dir).run(&mut NoProgress).unwrap();

        assert_eq!(
            summary.applied,
            vec!["2024_01_01_000002_b", "2024_01_01_000003_c"]
        );
        assert_eq!(executed(&ledger), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pretend_executes_nothing() {
        let (_tmp, dir, mut ledger) = setup();
        write_update(&dir, "2024_01_01_000001_a");

        let summary = Runner::new(&mut ledger, &dir).pretend(&mut NoProgress).unwrap();

        assert_eq!(summary.pretended, vec!["2024_01_01_000001_a"]);
        assert!(summary.applied.is_empty());
        assert!(ledger.applied().unwrap().is_empty());
        assert!(executed(&ledger).is_empty());
    }

    #[test]
    fn test_missing_directory_is_empty_run() {
        let (tmp, _dir, mut ledger) = setup();

        let summary = Runner::new(&mut ledger, &tmp.path().join("absent"))
            .run(&mut NoProgress)
            .unwrap();

        assert!(summary.is_empty());
    }

    #[test]
    fn test_required_directory_must_exist() {
        let (tmp, dir, mut ledger) = setup();

        let absent = tmp.path().join("absent");
        match Runner::with_required_dir(&mut ledger, &absent) {
            Err(Error::DirectoryNotFound(path)) => assert_eq!(path, absent),
            Err(other) => panic!("Expected DirectoryNotFound, got: {other:?}"),
            Ok(_) => panic!("Expected DirectoryNotFound"),
        }

        assert!(Runner::with_required_dir(&mut ledger, &dir).is_ok());
    }
}
