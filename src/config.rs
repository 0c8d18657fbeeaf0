//! # Global manager configuration.
//!
//! Provides [`ManagerConfig`], centralized settings for the resource manager:
//! shutdown deadlines and health monitor cadence.
//!
//! Per-resource hook deadlines (connect, health check) live on
//! [`Resource`](crate::Resource) itself, since they vary by backing dependency.

use std::time::Duration;

/// Configuration for a [`ResourceManager`](crate::ResourceManager).
///
/// ## Field semantics
/// - `shutdown_timeout`: deadline applied **per resource** during `stop_all`.
///   A resource exceeding it is abandoned in its last-observed state and the
///   loop proceeds to the next one; teardown is never aborted as a batch.
/// - `monitor_tick`: how often the health monitor wakes to check for
///   cancellation. Bounds how quickly a shutdown request is observed.
/// - `health_interval`: how often the monitor performs a real aggregate
///   health check across all resources. Decoupled from `monitor_tick` so
///   shutdown responsiveness does not depend on polling cost.
#[derive(Clone, Debug)]
pub struct ManagerConfig {
    /// Per-resource deadline for disconnect-then-cleanup during `stop_all`.
    pub shutdown_timeout: Duration,

    /// Health monitor wake-up cadence (cancellation check).
    pub monitor_tick: Duration,

    /// Cadence of real aggregate health checks.
    pub health_interval: Duration,
}

impl Default for ManagerConfig {
    /// Default configuration:
    ///
    /// - `shutdown_timeout = 30s`
    /// - `monitor_tick = 1s`
    /// - `health_interval = 60s`
    fn default() -> Self {
        Self {
            shutdown_timeout: Duration::from_secs(30),
            monitor_tick: Duration::from_secs(1),
            health_interval: Duration::from_secs(60),
        }
    }
}
