//! # Progress sink for operator-facing progress display.
//!
//! Optional collaborator. During `start_all`/`stop_all` the manager calls
//! `reset` with the total resource count, then `step` once per resource
//! processed, regardless of that resource's outcome. Fire-and-forget.

/// Receives bulk-operation progress notifications.
pub trait ProgressSink: Send + Sync + 'static {
    /// A bulk operation is starting with `total` steps.
    fn reset(&self, total: usize);

    /// One step finished; `label` names the resource and outcome.
    fn step(&self, label: &str);
}
