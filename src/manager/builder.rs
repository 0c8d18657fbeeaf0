//! Builder wiring for [`ResourceManager`].

use std::sync::Arc;

use crate::bridges::{DiBridge, EventSink, ProgressSink};
use crate::config::ManagerConfig;

use super::ResourceManager;

/// Configures and constructs a [`ResourceManager`].
///
/// All collaborators are optional; a bare `builder().build()` yields a
/// manager that orchestrates lifecycles and logs, nothing more.
///
/// ```
/// use resvisor::{Bus, ResourceManager};
///
/// let bus = Bus::new(64);
/// let manager = ResourceManager::builder().with_events(bus).build();
/// assert!(!manager.is_started());
/// ```
#[derive(Default)]
pub struct ManagerBuilder {
    cfg: ManagerConfig,
    events: Option<Arc<dyn EventSink>>,
    di: Option<Arc<dyn DiBridge>>,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl ManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the default timeouts and monitor cadence.
    pub fn with_config(mut self, cfg: ManagerConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the event sink lifecycle events are published to.
    pub fn with_events(mut self, events: impl EventSink) -> Self {
        self.events = Some(Arc::new(events));
        self
    }

    /// Sets the DI bridge registrations are mirrored into.
    pub fn with_di(mut self, di: impl DiBridge) -> Self {
        self.di = Some(Arc::new(di));
        self
    }

    /// Sets the progress sink for bulk-operation steps.
    pub fn with_progress(mut self, progress: impl ProgressSink) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    pub fn build(self) -> Arc<ResourceManager> {
        ResourceManager::new_internal(self.cfg, self.events, self.di, self.progress)
    }
}
