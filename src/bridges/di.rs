//! # Dependency-injection bridge.
//!
//! Optional collaborator mirroring the registry into a name-keyed DI
//! container. The manager forwards every register/unregister; absence of the
//! bridge is a valid configuration. Failures are logged and never abort
//! registry work.

use std::sync::Arc;

use crate::error::BridgeError;
use crate::resource::Resource;

/// Name-keyed registration mirror.
pub trait DiBridge: Send + Sync + 'static {
    /// Registers a resource under its name.
    fn register(&self, name: &str, resource: Arc<Resource>) -> Result<(), BridgeError>;

    /// Removes the registration for a name.
    ///
    /// Called even when the manager did not know the name, so both sides
    /// stay consistent.
    fn unregister(&self, name: &str) -> Result<(), BridgeError>;
}
