//! # Resource: the lifecycle state machine over one managed dependency.
//!
//! [`Resource`] wraps a [`Lifecycle`] implementation and drives it through
//! a fixed state machine:
//!
//! ```text
//! Uninitialized ──initialize──► Initialized ──connect──► Connected
//!        │                          │                        │
//!        │                          │                   disconnect
//!        │                          │                        ▼
//!        │                          │                   Disconnected ──connect──► (Connected)
//!        │                          └──────────┬─────────────┘
//!        │                                  cleanup
//!        │                                     ▼
//!        └───────────(hook error: Failed)─► CleanedUp (terminal)
//! ```
//!
//! ## Rules
//! - Hooks are invoked in state-machine order, never reordered or skipped.
//! - A hook failure moves the resource to `Failed` and the error propagates;
//!   cleanup is still allowed from `Failed`.
//! - `health_check` is orthogonal: it caches an observation without ever
//!   changing the lifecycle state.
//! - State transitions are serialized by the caller (the orchestrator or
//!   application code drives them one at a time); concurrent read-only calls
//!   (`state`, `health`, `stats`) are always safe.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{Duration, SystemTime};

use tokio::time;
use tracing::{debug, error, info, warn};

use crate::error::{Phase, ResourceError};

use super::lifecycle::{Lifecycle, Managed};
use super::state::{ResourceHealth, ResourceState};

/// Default deadline for the `connect` hook.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default deadline for the `health_check` hook.
const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Mutable observation snapshot, guarded by a short-lived lock.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    state: ResourceState,
    health: ResourceHealth,
    last_health_check: Option<SystemTime>,
}

/// One managed dependency with a uniform lifecycle.
///
/// Owns the [`Lifecycle`] implementation and the cached state/health
/// snapshot. The snapshot lock is never held across an await: hooks run
/// between two short lock windows.
pub struct Resource {
    inner: Box<dyn Lifecycle>,
    snap: RwLock<Snapshot>,
    created_at: SystemTime,
    connect_timeout: Duration,
    health_timeout: Duration,
}

impl Resource {
    /// Wraps a [`Lifecycle`] implementation in a fresh state machine.
    pub fn new(inner: impl Lifecycle) -> Self {
        Self {
            inner: Box::new(inner),
            snap: RwLock::new(Snapshot {
                state: ResourceState::Uninitialized,
                health: ResourceHealth::Unknown,
                last_health_check: None,
            }),
            created_at: SystemTime::now(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    /// Sets the deadline for the `connect` hook.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the deadline for the `health_check` hook.
    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Stable name, unique within one manager.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Type tag used for secondary indexing.
    pub fn resource_type(&self) -> &str {
        self.inner.resource_type()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ResourceState {
        self.read().state
    }

    /// Last observed health.
    pub fn health(&self) -> ResourceHealth {
        self.read().health
    }

    /// Timestamp of the last real health check, if any.
    pub fn last_health_check(&self) -> Option<SystemTime> {
        self.read().last_health_check
    }

    /// True once initialized and not yet torn down.
    pub fn is_ready(&self) -> bool {
        matches!(
            self.read().state,
            ResourceState::Initialized | ResourceState::Connected
        )
    }

    /// True while connected.
    pub fn is_connected(&self) -> bool {
        self.read().state == ResourceState::Connected
    }

    /// Returns the optional management capability.
    pub fn managed(&self) -> Option<&dyn Managed> {
        self.inner.as_managed()
    }

    /// True if the implementation exposes the management capability.
    pub fn is_managed(&self) -> bool {
        self.inner.as_managed().is_some()
    }

    /// Initializes the resource.
    ///
    /// Precondition: `Uninitialized`. Calling this twice is a caller error
    /// and fails with [`ResourceError::InvalidState`] rather than silently
    /// no-opping.
    pub async fn initialize(&self) -> Result<(), ResourceError> {
        {
            let mut snap = self.write();
            if snap.state != ResourceState::Uninitialized {
                return Err(self.invalid_state("initialize", snap.state));
            }
            snap.state = ResourceState::Initializing;
        }
        debug!(resource = %self.name(), "initializing resource");

        match self.inner.initialize().await {
            Ok(()) => {
                self.write().state = ResourceState::Initialized;
                info!(resource = %self.name(), "resource initialized");
                Ok(())
            }
            Err(source) => Err(self.fail(Phase::Initialize, source)),
        }
    }

    /// Establishes connections, under the connect deadline.
    ///
    /// Precondition: `Initialized` or `Disconnected` (reconnect).
    pub async fn connect(&self) -> Result<(), ResourceError> {
        {
            let mut snap = self.write();
            if !matches!(
                snap.state,
                ResourceState::Initialized | ResourceState::Disconnected
            ) {
                return Err(self.invalid_state("connect", snap.state));
            }
            snap.state = ResourceState::Connecting;
        }
        debug!(resource = %self.name(), "connecting resource");

        match time::timeout(self.connect_timeout, self.inner.connect()).await {
            Ok(Ok(())) => {
                let mut snap = self.write();
                snap.state = ResourceState::Connected;
                snap.health = ResourceHealth::Healthy;
                drop(snap);
                info!(resource = %self.name(), "resource connected");
                Ok(())
            }
            Ok(Err(source)) => Err(self.fail(Phase::Connect, source)),
            Err(_elapsed) => {
                let mut snap = self.write();
                snap.state = ResourceState::Failed;
                snap.health = ResourceHealth::Unhealthy;
                drop(snap);
                error!(
                    resource = %self.name(),
                    timeout = ?self.connect_timeout,
                    "connect timed out"
                );
                Err(ResourceError::Timeout {
                    name: self.name().to_string(),
                    phase: Phase::Connect,
                    timeout: self.connect_timeout,
                })
            }
        }
    }

    /// Observes the resource's health.
    ///
    /// Allowed in any state. When not connected, returns
    /// [`ResourceHealth::Unknown`] without invoking the hook. Otherwise the
    /// hook runs under the health deadline; its result (or `Unhealthy` on
    /// error/timeout) is cached with a timestamp and returned. The lifecycle
    /// state is never changed.
    pub async fn health_check(&self) -> ResourceHealth {
        if !self.is_connected() {
            return ResourceHealth::Unknown;
        }

        let health = match time::timeout(self.health_timeout, self.inner.health_check()).await {
            Ok(Ok(health)) => health,
            Ok(Err(e)) => {
                warn!(resource = %self.name(), error = %e, "health check failed");
                ResourceHealth::Unhealthy
            }
            Err(_elapsed) => {
                warn!(
                    resource = %self.name(),
                    timeout = ?self.health_timeout,
                    "health check timed out"
                );
                ResourceHealth::Unhealthy
            }
        };

        let mut snap = self.write();
        snap.health = health;
        snap.last_health_check = Some(SystemTime::now());
        health
    }

    /// Closes connections.
    ///
    /// Idempotent: a resource that is not connected is left untouched and
    /// `Ok(())` is returned immediately.
    pub async fn disconnect(&self) -> Result<(), ResourceError> {
        {
            let mut snap = self.write();
            if snap.state != ResourceState::Connected {
                debug!(resource = %self.name(), "not connected, skipping disconnect");
                return Ok(());
            }
            snap.state = ResourceState::Disconnecting;
        }
        debug!(resource = %self.name(), "disconnecting resource");

        match self.inner.disconnect().await {
            Ok(()) => {
                let mut snap = self.write();
                snap.state = ResourceState::Disconnected;
                snap.health = ResourceHealth::Unknown;
                drop(snap);
                info!(resource = %self.name(), "resource disconnected");
                Ok(())
            }
            Err(source) => Err(self.fail(Phase::Disconnect, source)),
        }
    }

    /// Releases the resource. Terminal.
    ///
    /// Allowed from any non-terminal state, including `Failed`. After a
    /// successful cleanup the resource must not be reused.
    pub async fn cleanup(&self) -> Result<(), ResourceError> {
        {
            let mut snap = self.write();
            if snap.state.is_terminal() {
                return Err(self.invalid_state("cleanup", snap.state));
            }
            snap.state = ResourceState::CleaningUp;
        }
        debug!(resource = %self.name(), "cleaning up resource");

        match self.inner.cleanup().await {
            Ok(()) => {
                self.write().state = ResourceState::CleanedUp;
                info!(resource = %self.name(), "resource cleaned up");
                Ok(())
            }
            Err(source) => Err(self.fail(Phase::Cleanup, source)),
        }
    }

    /// Connects and starts background management, when the capability exists.
    ///
    /// No-op for plain resources. Called by the orchestrator during
    /// `start_all` after a successful `initialize`.
    pub async fn start_management(&self) -> Result<(), ResourceError> {
        let Some(managed) = self.inner.as_managed() else {
            return Ok(());
        };
        self.connect().await?;
        managed
            .start_management()
            .await
            .map_err(|source| ResourceError::Hook {
                name: self.name().to_string(),
                phase: Phase::Management,
                source,
            })
    }

    /// Stops background management, when the capability exists.
    ///
    /// No-op for plain resources. Does not disconnect or clean up; that is
    /// the orchestrator's job.
    pub async fn stop_management(&self) -> Result<(), ResourceError> {
        let Some(managed) = self.inner.as_managed() else {
            return Ok(());
        };
        managed
            .stop_management()
            .await
            .map_err(|source| ResourceError::Hook {
                name: self.name().to_string(),
                phase: Phase::Management,
                source,
            })
    }

    /// Side-effect-free snapshot for observability. Never fails.
    pub fn stats(&self) -> ResourceStats {
        let snap = self.read();
        ResourceStats {
            name: self.name().to_string(),
            resource_type: self.resource_type().to_string(),
            state: snap.state,
            health: snap.health,
            created_at: self.created_at,
            last_health_check: snap.last_health_check,
            uptime: self.created_at.elapsed().unwrap_or_default(),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Snapshot> {
        self.snap.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Snapshot> {
        self.snap.write().unwrap_or_else(|e| e.into_inner())
    }

    fn invalid_state(&self, operation: &'static str, state: ResourceState) -> ResourceError {
        ResourceError::InvalidState {
            name: self.name().to_string(),
            operation,
            state,
        }
    }

    /// Records a hook failure: `Failed` state, `Unhealthy` health, error log.
    fn fail(&self, phase: Phase, source: crate::error::HookError) -> ResourceError {
        {
            let mut snap = self.write();
            snap.state = ResourceState::Failed;
            snap.health = ResourceHealth::Unhealthy;
        }
        error!(
            resource = %self.name(),
            phase = %phase,
            error = %source,
            "lifecycle hook failed"
        );
        ResourceError::Hook {
            name: self.name().to_string(),
            phase,
            source,
        }
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snap = self.read();
        f.debug_struct("Resource")
            .field("name", &self.name())
            .field("resource_type", &self.resource_type())
            .field("state", &snap.state)
            .field("health", &snap.health)
            .finish()
    }
}

/// Observability snapshot of one resource.
#[derive(Debug, Clone)]
pub struct ResourceStats {
    /// Resource name.
    pub name: String,
    /// Resource type tag.
    pub resource_type: String,
    /// Lifecycle state at snapshot time.
    pub state: ResourceState,
    /// Cached health at snapshot time.
    pub health: ResourceHealth,
    /// When the resource object was created.
    pub created_at: SystemTime,
    /// When the last real health check ran, if any.
    pub last_health_check: Option<SystemTime>,
    /// Time since creation.
    pub uptime: Duration,
}
