//! # Resource contract: the hooks a managed dependency must implement.
//!
//! [`Lifecycle`] is the extension point for plugging concrete dependencies
//! (database drivers, caches, external clients) into the manager. The
//! [`Resource`](crate::Resource) state machine sequences these hooks and makes
//! their failures observable; the hooks themselves may perform arbitrary I/O.
//!
//! [`Managed`] is an **optional capability**: resources that additionally run
//! background management work (connection keep-alive, auto-reconnect loops)
//! implement it and return themselves from [`Lifecycle::as_managed`]. The
//! orchestrator detects the capability through that method, never through
//! runtime type probing.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use resvisor::{HookError, Lifecycle, ResourceHealth};
//!
//! struct Postgres {
//!     url: String,
//! }
//!
//! #[async_trait]
//! impl Lifecycle for Postgres {
//!     fn name(&self) -> &str { "primary-db" }
//!     fn resource_type(&self) -> &str { "database" }
//!
//!     async fn initialize(&self) -> Result<(), HookError> {
//!         // validate config, allocate client state...
//!         Ok(())
//!     }
//!     async fn connect(&self) -> Result<(), HookError> {
//!         // open the connection pool...
//!         Ok(())
//!     }
//!     async fn disconnect(&self) -> Result<(), HookError> { Ok(()) }
//!     async fn health_check(&self) -> Result<ResourceHealth, HookError> {
//!         Ok(ResourceHealth::Healthy)
//!     }
//!     async fn cleanup(&self) -> Result<(), HookError> { Ok(()) }
//! }
//! # let _ = Postgres { url: String::new() };
//! ```

use async_trait::async_trait;

use crate::error::HookError;

use super::state::ResourceHealth;

/// Contract implemented by each managed dependency.
///
/// The manager never calls these hooks directly; they are sequenced by the
/// [`Resource`](crate::Resource) state machine, which guarantees they are
/// invoked in lifecycle order and never reordered or skipped.
#[async_trait]
pub trait Lifecycle: Send + Sync + 'static {
    /// Stable name, unique within one manager. The registry key.
    fn name(&self) -> &str;

    /// Type tag used for secondary indexing and bulk operations.
    fn resource_type(&self) -> &str;

    /// Prepare the dependency for use (validate config, allocate state).
    async fn initialize(&self) -> Result<(), HookError>;

    /// Establish connections to the backing dependency.
    async fn connect(&self) -> Result<(), HookError>;

    /// Close connections. Called only while connected.
    async fn disconnect(&self) -> Result<(), HookError>;

    /// Observe the dependency's health. Called only while connected.
    async fn health_check(&self) -> Result<ResourceHealth, HookError>;

    /// Release everything. Called once; the resource is terminal afterward.
    async fn cleanup(&self) -> Result<(), HookError>;

    /// Returns the optional management capability, if this resource has one.
    ///
    /// Implementations with background management work override this to
    /// `Some(self)`.
    fn as_managed(&self) -> Option<&dyn Managed> {
        None
    }
}

/// Optional capability for resources with background management work.
///
/// During `start_all` the orchestrator connects a managed resource and then
/// calls [`start_management`](Managed::start_management); during shutdown it
/// calls [`stop_management`](Managed::stop_management) before disconnecting.
/// Teardown itself (disconnect, cleanup) stays with the orchestrator; these
/// hooks only start and stop the auxiliary work.
#[async_trait]
pub trait Managed: Send + Sync {
    /// Begin background management (keep-alive, reconnect loops).
    ///
    /// Runs after the resource has connected successfully.
    async fn start_management(&self) -> Result<(), HookError>;

    /// Stop background management. Runs before the resource disconnects.
    async fn stop_management(&self) -> Result<(), HookError> {
        Ok(())
    }
}
