//! # ResourceManager: registry plus lifecycle orchestration.
//!
//! The [`ResourceManager`] owns the registry, drives bulk startup and
//! shutdown, and runs the background health monitor. It reports through two
//! side channels, an [`EventSink`] and a [`ProgressSink`], and mirrors
//! registrations into an optional [`DiBridge`].
//!
//! ## Architecture
//! ```text
//! register()/unregister() ──► Registry (RwLock: by_name + by_type + order)
//!                                │
//! start_all() ───────────────────┼──► initialize each, registration order
//!                                │    └─► spawn HealthMonitor (CancellationToken)
//! stop_all() ────────────────────┼──► cancel monitor, then reverse order:
//!                                │    stop_management → disconnect → cleanup,
//!                                │    per-resource timeout
//! health_check_all() ────────────┴──► read-only aggregate view
//!
//! every flow ──► EventSink (events) + ProgressSink (steps) + DiBridge (register)
//! ```
//!
//! ## Rules
//! - One failing resource never prevents others from starting or stopping;
//!   failures are logged, recorded in the published event, and iteration
//!   continues.
//! - Startup visits resources in registration order, shutdown in exact
//!   reverse order.
//! - `start_all` marks the manager started even with failures: a degraded
//!   start is a legitimate, observable state. Callers inspect the
//!   `SystemStarted` event's failed list to decide whether to abort.
//! - Shutdown applies the timeout **per resource**; a stuck resource is
//!   abandoned in its last-observed state and teardown continues.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::bridges::{DiBridge, EventSink, ProgressSink};
use crate::config::ManagerConfig;
use crate::error::ResourceError;
use crate::events::{Event, EventKind, FailedResource};
use crate::resource::{Resource, ResourceStats};

use super::builder::ManagerBuilder;
use super::health::{HealthSummary, ResourceHealthDetail};
use super::monitor::HealthMonitor;
use super::registry::Registry;

/// Handle to the running health monitor.
struct MonitorHandle {
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

/// Central registry and lifecycle orchestrator for [`Resource`]s.
///
/// Construct through [`ResourceManager::builder`]; the builder returns an
/// `Arc` because `start_all` hands a clone to the spawned health monitor.
pub struct ResourceManager {
    cfg: ManagerConfig,
    registry: RwLock<Registry>,
    events: Option<Arc<dyn EventSink>>,
    di: Option<Arc<dyn DiBridge>>,
    progress: Option<Arc<dyn ProgressSink>>,

    is_started: AtomicBool,
    is_shutting_down: AtomicBool,
    /// Serializes start_all/stop_all and owns the monitor handle between them.
    orchestration: Mutex<Option<MonitorHandle>>,
}

impl ResourceManager {
    /// Returns a builder for configuring collaborators and timeouts.
    pub fn builder() -> ManagerBuilder {
        ManagerBuilder::new()
    }

    pub(crate) fn new_internal(
        cfg: ManagerConfig,
        events: Option<Arc<dyn EventSink>>,
        di: Option<Arc<dyn DiBridge>>,
        progress: Option<Arc<dyn ProgressSink>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            cfg,
            registry: RwLock::new(Registry::new()),
            events,
            di,
            progress,
            is_started: AtomicBool::new(false),
            is_shutting_down: AtomicBool::new(false),
            orchestration: Mutex::new(None),
        })
    }

    /// True between a completed `start_all` and a completed `stop_all`.
    pub fn is_started(&self) -> bool {
        self.is_started.load(Ordering::SeqCst)
    }

    /// True while `stop_all` is tearing resources down.
    pub fn is_shutting_down(&self) -> bool {
        self.is_shutting_down.load(Ordering::SeqCst)
    }

    // ---------------------------
    // Registry operations
    // ---------------------------

    /// Registers a resource. Pure bookkeeping: no I/O is started.
    ///
    /// On a name collision the existing resource is displaced and **returned**
    /// so the caller can tear it down; silently dropping a live resource
    /// would leak its connections. Registration is also forwarded to the DI
    /// bridge, keyed by name.
    pub async fn register(&self, resource: Resource) -> Option<Arc<Resource>> {
        let resource = Arc::new(resource);
        let name = resource.name().to_string();

        if self.is_started() {
            warn!(
                resource = %name,
                "registering resource after manager started, it will not be initialized by start_all"
            );
        }

        let displaced = {
            let mut registry = self.registry.write().await;
            if registry.contains(&name) {
                warn!(resource = %name, "resource already registered, replacing");
            }
            registry.insert(Arc::clone(&resource))
        };

        info!(
            resource = %name,
            resource_type = %resource.resource_type(),
            "registered resource"
        );

        if let Some(di) = &self.di {
            if let Err(e) = di.register(&name, Arc::clone(&resource)) {
                error!(resource = %name, error = %e, "DI bridge registration failed");
            }
        }

        self.publish(Event::new(EventKind::ResourceRegistered).with_resource(name))
            .await;

        displaced
    }

    /// Unregisters a resource, tearing it down first when it is ready.
    ///
    /// The teardown is awaited here rather than detached, so failures stay
    /// visible (they are logged, never returned) and removal cannot race a
    /// concurrent bulk operation on a half-dead resource. Returns `false`
    /// for an unknown name; the DI bridge is still told to unregister in
    /// that case, keeping both sides consistent.
    pub async fn unregister(&self, name: &str) -> bool {
        let removed = { self.registry.write().await.remove(name) };

        let Some(resource) = removed else {
            warn!(resource = %name, "attempted to unregister unknown resource");
            self.di_unregister(name);
            return false;
        };

        if resource.is_ready() {
            self.shutdown_resource(&resource).await;
        }

        self.di_unregister(name);
        info!(resource = %name, "unregistered resource");
        self.publish(Event::new(EventKind::ResourceUnregistered).with_resource(name))
            .await;
        true
    }

    /// Looks a resource up by name.
    pub async fn get(&self, name: &str) -> Result<Arc<Resource>, ResourceError> {
        self.registry
            .read()
            .await
            .get(name)
            .ok_or_else(|| ResourceError::NotFound {
                name: name.to_string(),
            })
    }

    /// All resources of one type, in registration order (defensive copy).
    pub async fn list_by_type(&self, resource_type: &str) -> Vec<Arc<Resource>> {
        self.registry.read().await.by_type(resource_type)
    }

    /// All registered resources, keyed by name (defensive copy).
    pub async fn all(&self) -> HashMap<String, Arc<Resource>> {
        self.registry.read().await.all()
    }

    /// Number of registered resources.
    pub async fn len(&self) -> usize {
        self.registry.read().await.len()
    }

    /// True when no resources are registered.
    pub async fn is_empty(&self) -> bool {
        self.registry.read().await.is_empty()
    }

    /// Membership test by name.
    pub async fn contains(&self, name: &str) -> bool {
        self.registry.read().await.contains(name)
    }

    /// Number of resources of one type.
    pub async fn count_by_type(&self, resource_type: &str) -> usize {
        self.registry.read().await.count_by_type(resource_type)
    }

    /// All registered type tags.
    pub async fn resource_types(&self) -> Vec<String> {
        self.registry.read().await.types()
    }

    /// Unregisters every resource, or every resource of one type.
    ///
    /// Delegates to [`unregister`](Self::unregister) per entry so
    /// teardown-on-removal stays in one place. Returns the count removed.
    pub async fn clear(&self, resource_type: Option<&str>) -> usize {
        let names: Vec<String> = {
            let registry = self.registry.read().await;
            match resource_type {
                None => registry.names_in_order(),
                Some(ty) => registry
                    .by_type(ty)
                    .iter()
                    .map(|r| r.name().to_string())
                    .collect(),
            }
        };

        let mut removed = 0;
        for name in names {
            if self.unregister(&name).await {
                removed += 1;
            }
        }
        removed
    }

    // ---------------------------
    // Lifecycle orchestration
    // ---------------------------

    /// Starts every registered resource, in registration order.
    ///
    /// Each resource is initialized and, when it exposes the management
    /// capability, connected and its management started. A failure is
    /// logged and recorded; the loop continues to the next resource. One
    /// progress step is reported per resource regardless of outcome.
    ///
    /// Publishes `SystemStarted` with started/failed counts and the failure
    /// detail, marks the manager started even when some resources failed,
    /// and spawns the health monitor.
    pub async fn start_all(self: &Arc<Self>) {
        let mut monitor_slot = self.orchestration.lock().await;
        if self.is_started() {
            warn!("resource manager already started");
            return;
        }
        info!("starting all resources");

        let resources = { self.registry.read().await.in_order() };
        self.progress_reset(resources.len());

        let mut started: Vec<String> = Vec::new();
        let mut failed: Vec<FailedResource> = Vec::new();

        for resource in &resources {
            let name = resource.name().to_string();
            debug!(resource = %name, "starting resource");

            match Self::start_resource(resource).await {
                Ok(()) => {
                    info!(resource = %name, "started resource");
                    self.progress_step(&format!("started {name}"));
                    started.push(name);
                }
                Err(e) => {
                    error!(resource = %name, error = %e, "failed to start resource");
                    self.progress_step(&format!("failed {name}"));
                    failed.push(FailedResource {
                        name,
                        error: e.to_string(),
                    });
                }
            }
        }

        self.publish(
            Event::new(EventKind::SystemStarted)
                .with_counts(started.len(), failed.len())
                .with_failed_resources(failed.clone()),
        )
        .await;

        // Degraded start is a valid state: started even with failures.
        self.is_started.store(true, Ordering::SeqCst);

        let cancel = CancellationToken::new();
        let monitor = HealthMonitor::new(
            Arc::clone(self),
            self.cfg.monitor_tick,
            self.cfg.health_interval,
        );
        let join = tokio::spawn(monitor.run(cancel.clone()));
        *monitor_slot = Some(MonitorHandle { cancel, join });

        if !failed.is_empty() {
            warn!(failed = ?failed.iter().map(|f| &f.name).collect::<Vec<_>>(),
                "some resources failed to start");
        }
    }

    /// Stops every ready resource, in reverse registration order.
    ///
    /// Cancels the health monitor first and awaits its exit. Each resource
    /// gets `stop_management` (when managed), `disconnect`, then `cleanup`
    /// under the per-resource shutdown timeout; a timeout or error is logged
    /// and the loop proceeds. Calling `stop_all` on a stopped manager is a
    /// warned no-op, so back-to-back calls tear down once.
    pub async fn stop_all(&self) {
        let mut monitor_slot = self.orchestration.lock().await;
        if !self.is_started() {
            warn!("resource manager not started");
            return;
        }
        if self.is_shutting_down() {
            warn!("resource manager already shutting down");
            return;
        }
        self.is_shutting_down.store(true, Ordering::SeqCst);
        info!("stopping all resources");

        if let Some(handle) = monitor_slot.take() {
            handle.cancel.cancel();
            // join error here is the monitor task aborting; nothing to do
            let _ = handle.join.await;
        }

        let resources = { self.registry.read().await.in_order() };
        self.progress_reset(resources.len());

        for resource in resources.iter().rev() {
            let name = resource.name();
            if resource.is_ready() {
                debug!(resource = %name, "shutting down resource");
                let deadline = self.cfg.shutdown_timeout;
                if time::timeout(deadline, self.shutdown_resource(resource))
                    .await
                    .is_err()
                {
                    error!(
                        resource = %name,
                        timeout = ?deadline,
                        state = %resource.state(),
                        "resource shutdown timed out, abandoning"
                    );
                }
            }
            self.progress_step(&format!("stopped {name}"));
        }

        self.publish(
            Event::new(EventKind::SystemShutdown)
                .with_reason("all resources stopped")
                .with_stopped(resources.len()),
        )
        .await;

        self.is_started.store(false, Ordering::SeqCst);
        self.is_shutting_down.store(false, Ordering::SeqCst);
        info!("all resources stopped");
    }

    /// Initialize one resource and, for managed resources, connect and start
    /// its management. Direct calls propagate errors; `start_all` recovers
    /// them.
    async fn start_resource(resource: &Resource) -> Result<(), ResourceError> {
        resource.initialize().await?;
        if resource.is_managed() {
            resource.start_management().await?;
        }
        Ok(())
    }

    /// Best-effort teardown of one resource: every step is attempted and
    /// failures are logged, never raised.
    async fn shutdown_resource(&self, resource: &Resource) {
        let name = resource.name();
        if resource.is_managed() {
            if let Err(e) = resource.stop_management().await {
                warn!(resource = %name, error = %e, "stop_management failed");
            }
        }
        if resource.is_connected() {
            if let Err(e) = resource.disconnect().await {
                error!(resource = %name, error = %e, "disconnect failed during shutdown");
            }
        }
        if let Err(e) = resource.cleanup().await {
            error!(resource = %name, error = %e, "cleanup failed during shutdown");
        }
    }

    // ---------------------------
    // Aggregation views
    // ---------------------------

    /// Checks every resource's health and returns the aggregate.
    ///
    /// Read-only with respect to the registry; used by the health monitor
    /// and by operational callers.
    pub async fn health_check_all(&self) -> HealthSummary {
        let resources = { self.registry.read().await.in_order() };
        let mut summary = HealthSummary::new(resources.len());

        for resource in resources {
            let health = resource.health_check().await;
            summary.resources.insert(
                resource.name().to_string(),
                ResourceHealthDetail {
                    health,
                    state: resource.state(),
                    is_connected: resource.is_connected(),
                    last_check: resource.last_health_check(),
                },
            );
            match health {
                crate::resource::ResourceHealth::Healthy => summary.healthy += 1,
                crate::resource::ResourceHealth::Unhealthy => summary.unhealthy += 1,
                _ => summary.unknown += 1,
            }
        }
        summary
    }

    /// Observability snapshot of every resource, keyed by name.
    pub async fn resource_stats(&self) -> HashMap<String, ResourceStats> {
        let resources = { self.registry.read().await.in_order() };
        resources
            .iter()
            .map(|r| (r.name().to_string(), r.stats()))
            .collect()
    }

    // ---------------------------
    // Collaborators
    // ---------------------------

    /// Publishes an event; a sink failure is logged and swallowed.
    pub(crate) async fn publish(&self, event: Event) {
        if let Some(sink) = &self.events {
            let kind = event.kind;
            if let Err(e) = sink.publish(event).await {
                error!(kind = ?kind, error = %e, "failed to publish event");
            }
        }
    }

    fn di_unregister(&self, name: &str) {
        if let Some(di) = &self.di {
            if let Err(e) = di.unregister(name) {
                error!(resource = %name, error = %e, "DI bridge unregistration failed");
            }
        }
    }

    fn progress_reset(&self, total: usize) {
        if let Some(progress) = &self.progress {
            progress.reset(total);
        }
    }

    fn progress_step(&self, label: &str) {
        if let Some(progress) = &self.progress {
            progress.step(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use crate::error::{BridgeError, HookError};
    use crate::events::Bus;
    use crate::resource::{Lifecycle, Managed, ResourceHealth, ResourceState};

    use super::*;

    type Log = Arc<StdMutex<Vec<String>>>;

    struct Probe {
        name: String,
        resource_type: String,
        log: Log,
        fail_initialize: bool,
        slow_disconnect: Option<Duration>,
        managed: bool,
    }

    impl Probe {
        fn new(name: &str, resource_type: &str, log: &Log) -> Self {
            Self {
                name: name.to_string(),
                resource_type: resource_type.to_string(),
                log: Arc::clone(log),
                fail_initialize: false,
                slow_disconnect: None,
                managed: false,
            }
        }

        fn failing_initialize(mut self) -> Self {
            self.fail_initialize = true;
            self
        }

        fn slow_disconnect(mut self, delay: Duration) -> Self {
            self.slow_disconnect = Some(delay);
            self
        }

        fn managed(mut self) -> Self {
            self.managed = true;
            self
        }

        fn record(&self, step: &str) {
            self.log.lock().unwrap().push(format!("{step}:{}", self.name));
        }
    }

    #[async_trait]
    impl Lifecycle for Probe {
        fn name(&self) -> &str {
            &self.name
        }
        fn resource_type(&self) -> &str {
            &self.resource_type
        }
        async fn initialize(&self) -> Result<(), HookError> {
            if self.fail_initialize {
                return Err("init boom".into());
            }
            self.record("init");
            Ok(())
        }
        async fn connect(&self) -> Result<(), HookError> {
            self.record("connect");
            Ok(())
        }
        async fn disconnect(&self) -> Result<(), HookError> {
            if let Some(delay) = self.slow_disconnect {
                tokio::time::sleep(delay).await;
            }
            self.record("disconnect");
            Ok(())
        }
        async fn health_check(&self) -> Result<ResourceHealth, HookError> {
            Ok(ResourceHealth::Healthy)
        }
        async fn cleanup(&self) -> Result<(), HookError> {
            self.record("cleanup");
            Ok(())
        }
        fn as_managed(&self) -> Option<&dyn Managed> {
            if self.managed {
                Some(self)
            } else {
                None
            }
        }
    }

    #[async_trait]
    impl Managed for Probe {
        async fn start_management(&self) -> Result<(), HookError> {
            self.record("manage");
            Ok(())
        }
        async fn stop_management(&self) -> Result<(), HookError> {
            self.record("unmanage");
            Ok(())
        }
    }

    struct RecordingDi {
        log: StdMutex<Vec<String>>,
    }

    impl RecordingDi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                log: StdMutex::new(Vec::new()),
            })
        }
    }

    impl DiBridge for Arc<RecordingDi> {
        fn register(&self, name: &str, _resource: Arc<Resource>) -> Result<(), BridgeError> {
            self.log.lock().unwrap().push(format!("register:{name}"));
            Ok(())
        }
        fn unregister(&self, name: &str) -> Result<(), BridgeError> {
            self.log.lock().unwrap().push(format!("unregister:{name}"));
            Ok(())
        }
    }

    struct RecordingProgress {
        resets: StdMutex<Vec<usize>>,
        steps: StdMutex<Vec<String>>,
    }

    impl RecordingProgress {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                resets: StdMutex::new(Vec::new()),
                steps: StdMutex::new(Vec::new()),
            })
        }
    }

    impl ProgressSink for Arc<RecordingProgress> {
        fn reset(&self, total: usize) {
            self.resets.lock().unwrap().push(total);
        }
        fn step(&self, label: &str) {
            self.steps.lock().unwrap().push(label.to_string());
        }
    }

    fn new_log() -> Log {
        init_tracing();
        Arc::new(StdMutex::new(Vec::new()))
    }

    /// Log output for failing tests; `RUST_LOG=debug cargo test` to see it.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<Event> {
        let mut events = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            events.push(ev);
        }
        events
    }

    #[tokio::test]
    async fn start_all_visits_registration_order_and_stop_all_reverses_it() {
        let log = new_log();
        let manager = ResourceManager::builder().build();
        for name in ["first", "second", "third"] {
            manager
                .register(Resource::new(Probe::new(name, "t", &log)))
                .await;
        }

        manager.start_all().await;
        assert_eq!(
            entries(&log),
            ["init:first", "init:second", "init:third"]
        );

        log.lock().unwrap().clear();
        manager.stop_all().await;
        assert_eq!(
            entries(&log),
            ["cleanup:third", "cleanup:second", "cleanup:first"]
        );
    }

    #[tokio::test]
    async fn partial_failure_starts_the_rest_and_reports_counts() {
        let log = new_log();
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let manager = ResourceManager::builder()
            .with_events(bus.clone())
            .build();

        manager
            .register(Resource::new(Probe::new("one", "t", &log)))
            .await;
        manager
            .register(Resource::new(
                Probe::new("two", "t", &log).failing_initialize(),
            ))
            .await;
        manager
            .register(Resource::new(Probe::new("three", "t", &log)))
            .await;

        manager.start_all().await;

        // the failure of "two" must not stop "three"
        assert_eq!(entries(&log), ["init:one", "init:three"]);
        assert!(manager.is_started());

        let events = drain(&mut rx);
        let started = events
            .iter()
            .find(|e| e.kind == EventKind::SystemStarted)
            .expect("SystemStarted event");
        assert_eq!(started.started, Some(2));
        assert_eq!(started.failed, Some(1));
        let detail = started.failed_resources.as_ref().unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].name, "two");
        assert!(detail[0].error.contains("init boom"));

        manager.stop_all().await;
    }

    #[tokio::test]
    async fn stop_all_twice_tears_down_once() {
        let log = new_log();
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let manager = ResourceManager::builder()
            .with_events(bus.clone())
            .build();
        manager
            .register(Resource::new(Probe::new("only", "t", &log)))
            .await;

        manager.start_all().await;
        manager.stop_all().await;
        manager.stop_all().await;

        let cleanups = entries(&log)
            .iter()
            .filter(|e| e.starts_with("cleanup:"))
            .count();
        assert_eq!(cleanups, 1);

        let events = drain(&mut rx);
        let shutdowns: Vec<_> = events
            .iter()
            .filter(|e| e.kind == EventKind::SystemShutdown)
            .collect();
        assert_eq!(shutdowns.len(), 1);
        assert_eq!(shutdowns[0].stopped, Some(1));
        assert!(!manager.is_started());
    }

    #[tokio::test]
    async fn slow_resource_does_not_block_the_rest_of_shutdown() {
        let log = new_log();
        let manager = ResourceManager::builder()
            .with_config(ManagerConfig {
                shutdown_timeout: Duration::from_millis(100),
                ..ManagerConfig::default()
            })
            .build();

        // "stuck" is registered last, so reverse-order shutdown visits it
        // first; "fine" must still be torn down afterwards
        manager
            .register(Resource::new(
                Probe::new("fine", "t", &log).managed(),
            ))
            .await;
        manager
            .register(Resource::new(
                Probe::new("stuck", "t", &log)
                    .managed()
                    .slow_disconnect(Duration::from_secs(30)),
            ))
            .await;

        manager.start_all().await;
        let stuck = manager.get("stuck").await.unwrap();
        let fine = manager.get("fine").await.unwrap();
        assert_eq!(stuck.state(), ResourceState::Connected);

        manager.stop_all().await;

        // the stuck resource was abandoned mid-disconnect; the other one
        // was still fully torn down
        assert_eq!(stuck.state(), ResourceState::Disconnecting);
        assert_eq!(fine.state(), ResourceState::CleanedUp);
    }

    #[tokio::test]
    async fn managed_resources_connect_during_start_and_reach_cleaned_up() {
        let log = new_log();
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let manager = ResourceManager::builder()
            .with_events(bus.clone())
            .build();

        manager
            .register(Resource::new(Probe::new("db", "database", &log).managed()))
            .await;
        manager
            .register(Resource::new(Probe::new("cache", "cache", &log).managed()))
            .await;

        manager.start_all().await;
        assert_eq!(
            manager.get("db").await.unwrap().state(),
            ResourceState::Connected
        );
        assert_eq!(
            manager.get("cache").await.unwrap().state(),
            ResourceState::Connected
        );

        let events = drain(&mut rx);
        let started = events
            .iter()
            .find(|e| e.kind == EventKind::SystemStarted)
            .unwrap();
        assert_eq!(started.started, Some(2));
        assert_eq!(started.failed, Some(0));

        let db = manager.get("db").await.unwrap();
        let cache = manager.get("cache").await.unwrap();
        manager.stop_all().await;

        assert_eq!(db.state(), ResourceState::CleanedUp);
        assert_eq!(cache.state(), ResourceState::CleanedUp);

        let events = drain(&mut rx);
        let shutdown = events
            .iter()
            .find(|e| e.kind == EventKind::SystemShutdown)
            .expect("SystemShutdown event");
        assert_eq!(shutdown.stopped, Some(2));
        assert_eq!(shutdown.reason.as_deref(), Some("all resources stopped"));

        // reverse teardown: cache disconnects before db
        let log = entries(&log);
        let pos = |needle: &str| log.iter().position(|e| e == needle).unwrap();
        assert!(pos("disconnect:cache") < pos("disconnect:db"));
    }

    #[tokio::test]
    async fn unregister_awaits_teardown_and_mirrors_the_di_bridge() {
        let log = new_log();
        let di = RecordingDi::new();
        let manager = ResourceManager::builder()
            .with_di(Arc::clone(&di))
            .build();

        manager
            .register(Resource::new(Probe::new("db", "database", &log).managed()))
            .await;
        manager.start_all().await;

        let db = manager.get("db").await.unwrap();
        assert!(manager.unregister("db").await);
        assert_eq!(db.state(), ResourceState::CleanedUp);
        assert!(!manager.contains("db").await);

        // unknown name: warned, returns false, DI still told
        assert!(!manager.unregister("ghost").await);
        assert_eq!(
            *di.log.lock().unwrap(),
            ["register:db", "unregister:db", "unregister:ghost"]
        );

        manager.stop_all().await;
    }

    #[tokio::test]
    async fn register_returns_the_displaced_resource() {
        let log = new_log();
        let manager = ResourceManager::builder().build();

        manager
            .register(Resource::new(Probe::new("store", "database", &log)))
            .await;
        let first = manager.get("store").await.unwrap();

        let displaced = manager
            .register(Resource::new(Probe::new("store", "cache", &log)))
            .await
            .expect("displaced resource");
        assert!(Arc::ptr_eq(&displaced, &first));

        assert_eq!(manager.count_by_type("database").await, 0);
        assert_eq!(manager.count_by_type("cache").await, 1);
        assert_eq!(manager.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_name_is_a_lookup_error() {
        let manager = ResourceManager::builder().build();
        let err = manager.get("nope").await.unwrap_err();
        assert!(matches!(err, ResourceError::NotFound { .. }));
        assert_eq!(err.as_label(), "resource_not_found");
    }

    #[tokio::test]
    async fn clear_removes_by_type_or_everything() {
        let log = new_log();
        let manager = ResourceManager::builder().build();
        manager
            .register(Resource::new(Probe::new("db1", "database", &log)))
            .await;
        manager
            .register(Resource::new(Probe::new("db2", "database", &log)))
            .await;
        manager
            .register(Resource::new(Probe::new("cache", "cache", &log)))
            .await;

        assert_eq!(manager.clear(Some("database")).await, 2);
        assert_eq!(manager.len().await, 1);

        assert_eq!(manager.clear(None).await, 1);
        assert!(manager.is_empty().await);
    }

    #[tokio::test]
    async fn progress_is_reported_once_per_resource() {
        let log = new_log();
        let progress = RecordingProgress::new();
        let manager = ResourceManager::builder()
            .with_progress(Arc::clone(&progress))
            .build();

        manager
            .register(Resource::new(Probe::new("ok", "t", &log)))
            .await;
        manager
            .register(Resource::new(
                Probe::new("bad", "t", &log).failing_initialize(),
            ))
            .await;

        manager.start_all().await;
        assert_eq!(*progress.resets.lock().unwrap(), [2]);
        assert_eq!(
            *progress.steps.lock().unwrap(),
            ["started ok", "failed bad"]
        );

        manager.stop_all().await;
        assert_eq!(*progress.resets.lock().unwrap(), [2, 2]);
        assert_eq!(progress.steps.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn health_check_all_tallies_and_never_touches_lifecycle() {
        let log = new_log();
        let manager = ResourceManager::builder().build();
        manager
            .register(Resource::new(Probe::new("up", "t", &log).managed()))
            .await;
        manager
            .register(Resource::new(Probe::new("idle", "t", &log)))
            .await;

        manager.start_all().await;
        let summary = manager.health_check_all().await;

        assert_eq!(summary.total, 2);
        assert_eq!(summary.healthy, 1);
        assert_eq!(summary.unhealthy, 0);
        assert_eq!(summary.unknown, 1);
        assert!(summary.is_healthy());
        assert_eq!(summary.non_healthy_names(), ["idle(unknown)"]);

        assert_eq!(
            summary.resources.get("up").unwrap().state,
            ResourceState::Connected
        );
        assert_eq!(
            summary.resources.get("idle").unwrap().state,
            ResourceState::Initialized
        );

        manager.stop_all().await;
    }

    #[tokio::test]
    async fn resource_stats_snapshots_every_resource() {
        let log = new_log();
        let manager = ResourceManager::builder().build();
        manager
            .register(Resource::new(Probe::new("db", "database", &log)))
            .await;

        let stats = manager.resource_stats().await;
        assert_eq!(stats.len(), 1);
        let db = stats.get("db").unwrap();
        assert_eq!(db.resource_type, "database");
        assert_eq!(db.state, ResourceState::Uninitialized);
    }

    #[tokio::test]
    async fn start_all_twice_is_a_warned_noop() {
        let log = new_log();
        let manager = ResourceManager::builder().build();
        manager
            .register(Resource::new(Probe::new("one", "t", &log)))
            .await;

        manager.start_all().await;
        manager.start_all().await;

        let inits = entries(&log)
            .iter()
            .filter(|e| e.starts_with("init:"))
            .count();
        assert_eq!(inits, 1);

        manager.stop_all().await;
    }
}
