//! # Lifecycle events emitted by the resource manager.
//!
//! The [`EventKind`] enum classifies events across two categories:
//! - **System events**: bulk lifecycle outcomes (started, shutdown, health changed)
//! - **Registry events**: per-resource bookkeeping (registered, unregistered)
//!
//! The [`Event`] struct carries additional metadata: timestamps, the resource
//! name, started/failed/stopped counts, the failed-resource detail, and
//! aggregate health. Events are immutable once constructed.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore order when events are observed out of
//! order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

use crate::manager::HealthSummary;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of manager events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A resource was registered with the manager.
    ///
    /// Sets: `resource`, `at`, `seq`.
    ResourceRegistered,

    /// A resource was unregistered (after any teardown-on-removal).
    ///
    /// Sets: `resource`, `at`, `seq`.
    ResourceUnregistered,

    /// Bulk startup finished (possibly degraded).
    ///
    /// Sets: `started`, `failed`, `failed_resources`, `at`, `seq`.
    SystemStarted,

    /// Bulk shutdown finished.
    ///
    /// Sets: `reason`, `stopped`, `at`, `seq`.
    SystemShutdown,

    /// The health monitor completed an aggregate check.
    ///
    /// Sets: `reason` (`"healthy"` / `"unhealthy"`), `health`, `at`, `seq`.
    ComponentHealthChanged,
}

/// One resource that failed during bulk startup, with its error message.
#[derive(Debug, Clone)]
pub struct FailedResource {
    /// Name of the resource that failed.
    pub name: String,
    /// Rendered error from the failing hook.
    pub error: String,
}

/// Manager event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Name of the resource, if applicable.
    pub resource: Option<Arc<str>>,
    /// Human-readable reason or status.
    pub reason: Option<Arc<str>>,
    /// Number of resources that started successfully.
    pub started: Option<usize>,
    /// Number of resources that failed to start.
    pub failed: Option<usize>,
    /// Number of resources covered by a bulk shutdown.
    pub stopped: Option<usize>,
    /// Per-resource failure detail for `SystemStarted`.
    pub failed_resources: Option<Arc<[FailedResource]>>,
    /// Aggregate health snapshot for `ComponentHealthChanged`.
    pub health: Option<Arc<HealthSummary>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            resource: None,
            reason: None,
            started: None,
            failed: None,
            stopped: None,
            failed_resources: None,
            health: None,
        }
    }

    /// Attaches a resource name.
    #[inline]
    pub fn with_resource(mut self, name: impl Into<Arc<str>>) -> Self {
        self.resource = Some(name.into());
        self
    }

    /// Attaches a human-readable reason or status.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches started/failed counts.
    #[inline]
    pub fn with_counts(mut self, started: usize, failed: usize) -> Self {
        self.started = Some(started);
        self.failed = Some(failed);
        self
    }

    /// Attaches the count of resources covered by a bulk shutdown.
    #[inline]
    pub fn with_stopped(mut self, stopped: usize) -> Self {
        self.stopped = Some(stopped);
        self
    }

    /// Attaches the failed-resource detail.
    #[inline]
    pub fn with_failed_resources(mut self, failed: Vec<FailedResource>) -> Self {
        self.failed_resources = Some(failed.into());
        self
    }

    /// Attaches an aggregate health snapshot.
    #[inline]
    pub fn with_health(mut self, health: HealthSummary) -> Self {
        self.health = Some(Arc::new(health));
        self
    }
}
