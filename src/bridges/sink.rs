//! # Event sink: where lifecycle events go.
//!
//! The manager publishes [`Event`]s through this seam. The in-process
//! implementation is [`Bus`](crate::Bus); applications with an external
//! message transport implement the trait themselves.
//!
//! ## Rules
//! - The manager never blocks indefinitely on a sink.
//! - A publish failure is caught and logged at the call site; it never
//!   aborts lifecycle work.

use async_trait::async_trait;

use crate::error::BridgeError;
use crate::events::Event;

/// Destination for lifecycle events.
#[async_trait]
pub trait EventSink: Send + Sync + 'static {
    /// Delivers one event. Implementations should return quickly; slow
    /// transports should queue internally.
    async fn publish(&self, event: Event) -> Result<(), BridgeError>;
}
