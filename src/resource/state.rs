//! Lifecycle states and health values for managed resources.

use std::fmt;

/// Lifecycle state of a [`Resource`](crate::Resource).
///
/// Transitions move strictly forward through the happy path:
///
/// ```text
/// Uninitialized → Initializing → Initialized → Connecting → Connected
///               → Disconnecting → Disconnected → CleaningUp → CleanedUp
/// ```
///
/// Any transition whose backing hook fails lands in [`Failed`](Self::Failed).
/// [`CleanedUp`](Self::CleanedUp) is terminal: a cleaned-up resource must not
/// be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    Uninitialized,
    Initializing,
    Initialized,
    Connecting,
    Connected,
    Disconnecting,
    Disconnected,
    CleaningUp,
    CleanedUp,
    /// Absorbing state entered when a lifecycle hook fails.
    Failed,
}

impl ResourceState {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceState::Uninitialized => "uninitialized",
            ResourceState::Initializing => "initializing",
            ResourceState::Initialized => "initialized",
            ResourceState::Connecting => "connecting",
            ResourceState::Connected => "connected",
            ResourceState::Disconnecting => "disconnecting",
            ResourceState::Disconnected => "disconnected",
            ResourceState::CleaningUp => "cleaning_up",
            ResourceState::CleanedUp => "cleaned_up",
            ResourceState::Failed => "failed",
        }
    }

    /// True for the terminal state ([`CleanedUp`](Self::CleanedUp)).
    pub fn is_terminal(&self) -> bool {
        matches!(self, ResourceState::CleanedUp)
    }
}

impl fmt::Display for ResourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health of a resource, orthogonal to its lifecycle state.
///
/// Health is a cached observation produced by the `health_check` hook; it is
/// never derived from the lifecycle state and checking it never changes the
/// lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceHealth {
    Healthy,
    /// Operational but impaired (e.g. a pool running below its minimum).
    Degraded,
    Unhealthy,
    /// Not observed yet, or not observable in the current state.
    Unknown,
}

impl ResourceHealth {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceHealth::Healthy => "healthy",
            ResourceHealth::Degraded => "degraded",
            ResourceHealth::Unhealthy => "unhealthy",
            ResourceHealth::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResourceHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
