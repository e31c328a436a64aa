//! Data types for the updates crate

use std::time::Duration;

/// One row of the ledger table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Update name, matching an [`UpdateDescriptor`](crate::UpdateDescriptor) name
    pub update: String,
    /// RFC 3339 timestamp of application
    pub applied_at: String,
}

/// Result of a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Updates applied by this run, in order
    pub applied: Vec<String>,
    /// Updates that were pending but not executed (pretend mode)
    pub pretended: Vec<String>,
}

impl RunSummary {
    /// Whether the run had nothing to do
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty() && self.pretended.is_empty()
    }
}

/// Progress callback for update runs
pub trait ProgressCallback {
    /// Called once with the number of pending updates (may be zero)
    fn on_start(&mut self, pending: usize);

    /// Called before an update executes
    fn on_update(&mut self, name: &str);

    /// Called after an update executed and was recorded
    fn on_update_complete(&mut self, name: &str, elapsed: Duration);

    /// Called when an update failed; the run stops after this
    fn on_update_failed(&mut self, name: &str);

    /// Called for each pending update in pretend mode instead of executing it
    fn on_pretend(&mut self, _name: &str) {}
}

/// No-op progress callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_start(&mut self, _pending: usize) {}
    fn on_update(&mut self, _name: &str) {}
    fn on_update_complete(&mut self, _name: &str, _elapsed: Duration) {}
    fn on_update_failed(&mut self, _name: &str) {}
}
