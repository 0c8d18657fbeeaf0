//! Resource abstraction: the [`Lifecycle`] contract, the optional [`Managed`]
//! capability, and the [`Resource`] state machine that sequences them.

mod lifecycle;
#[allow(clippy::module_inception)]
mod resource;
mod state;

pub use lifecycle::{Lifecycle, Managed};
pub use resource::{Resource, ResourceStats};
pub use state::{ResourceHealth, ResourceState};
