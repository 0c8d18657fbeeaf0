//! Event system: the [`Bus`] broadcast transport and the [`Event`] values
//! published by the manager and the health monitor.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, FailedResource};
