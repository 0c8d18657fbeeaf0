//! Error types used by the resource manager and resources.
//!
//! This module defines:
//!
//! - [`ResourceError`]: errors raised by resource lookups and lifecycle transitions.
//! - [`Phase`]: which lifecycle hook an error came from.
//! - [`HookError`] / [`BridgeError`]: boxed error types crossing the crate boundary;
//!   `HookError` comes out of resource implementations, `BridgeError` out of
//!   external collaborators (event sink, DI bridge).
//!
//! Lookup errors and single-resource lifecycle errors propagate to the caller.
//! During bulk orchestration (`start_all`/`stop_all`) the same errors are
//! recovered locally: logged, recorded in the published event, and iteration
//! continues.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::resource::ResourceState;

/// Error returned by a resource implementation's lifecycle hook.
///
/// Hooks perform arbitrary I/O, so the concrete error type is theirs;
/// the state machine only needs to carry it.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error returned by an external collaborator (event sink, DI bridge).
///
/// These are always recovered locally and never abort lifecycle work.
pub type BridgeError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Lifecycle phase a hook error or timeout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The `initialize` hook.
    Initialize,
    /// The `connect` hook.
    Connect,
    /// The `disconnect` hook.
    Disconnect,
    /// The `health_check` hook.
    HealthCheck,
    /// The `cleanup` hook.
    Cleanup,
    /// The `start_management` / `stop_management` hooks.
    Management,
}

impl Phase {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Initialize => "initialize",
            Phase::Connect => "connect",
            Phase::Disconnect => "disconnect",
            Phase::HealthCheck => "health_check",
            Phase::Cleanup => "cleanup",
            Phase::Management => "management",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Errors produced by resource management.
///
/// Lookup failures are signaled distinctly from lifecycle failures so callers
/// can tell "no such resource" apart from "the resource misbehaved".
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ResourceError {
    /// No resource with this name is registered.
    #[error("resource not found: {name}")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The resource is in a state that does not permit the requested operation.
    ///
    /// Raised for caller errors such as initializing twice or connecting a
    /// resource that was never initialized. Never raised for idempotent
    /// no-ops like disconnecting an already-disconnected resource.
    #[error("resource {name} is in state {state}, cannot {operation}")]
    InvalidState {
        /// Name of the resource.
        name: String,
        /// The operation that was attempted.
        operation: &'static str,
        /// The state the resource was actually in.
        state: ResourceState,
    },

    /// A lifecycle hook supplied by the resource implementation failed.
    #[error("{phase} failed for resource {name}: {source}")]
    Hook {
        /// Name of the resource.
        name: String,
        /// Which hook failed.
        phase: Phase,
        /// The underlying error from the implementation.
        #[source]
        source: HookError,
    },

    /// A lifecycle hook exceeded its deadline.
    #[error("{phase} for resource {name} timed out after {timeout:?}")]
    Timeout {
        /// Name of the resource.
        name: String,
        /// Which hook timed out.
        phase: Phase,
        /// The deadline that was exceeded.
        timeout: Duration,
    },
}

impl ResourceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ResourceError::NotFound { .. } => "resource_not_found",
            ResourceError::InvalidState { .. } => "resource_invalid_state",
            ResourceError::Hook { .. } => "resource_hook_failed",
            ResourceError::Timeout { .. } => "resource_timeout",
        }
    }
}
