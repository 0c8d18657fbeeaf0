//! Aggregate health views produced by `health_check_all` and consumed by the
//! health monitor, the event stream, and operational tooling.

use std::collections::HashMap;
use std::time::SystemTime;

use crate::resource::{ResourceHealth, ResourceState};

/// Per-resource entry inside a [`HealthSummary`].
#[derive(Debug, Clone)]
pub struct ResourceHealthDetail {
    /// Health returned by the check.
    pub health: ResourceHealth,
    /// Lifecycle state at check time.
    pub state: ResourceState,
    /// Whether the resource was connected at check time.
    pub is_connected: bool,
    /// Timestamp of the last real health check, if any.
    pub last_check: Option<SystemTime>,
}

/// Aggregate health across all registered resources.
///
/// `Degraded` resources are tallied under `unknown`: they are neither
/// trusted as healthy nor alarming enough to flip the aggregate status.
#[derive(Debug, Clone)]
pub struct HealthSummary {
    /// Total number of resources checked.
    pub total: usize,
    /// Resources reporting `Healthy`.
    pub healthy: usize,
    /// Resources reporting `Unhealthy`.
    pub unhealthy: usize,
    /// Resources reporting `Unknown` or `Degraded`.
    pub unknown: usize,
    /// Per-resource detail, keyed by name.
    pub resources: HashMap<String, ResourceHealthDetail>,
}

impl HealthSummary {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            healthy: 0,
            unhealthy: 0,
            unknown: 0,
            resources: HashMap::with_capacity(total),
        }
    }

    /// True when no resource reported `Unhealthy`.
    pub fn is_healthy(&self) -> bool {
        self.unhealthy == 0
    }

    /// Sorted names of resources that did not report `Healthy`.
    pub fn non_healthy_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .resources
            .iter()
            .filter(|(_, detail)| detail.health != ResourceHealth::Healthy)
            .map(|(name, detail)| format!("{name}({})", detail.health))
            .collect();
        names.sort_unstable();
        names
    }
}
