//! # Manager: registry, orchestration, and health monitoring.
//!
//! - [`ResourceManager`] owns the registry and drives bulk lifecycle work.
//! - [`ManagerBuilder`] wires in the optional collaborators.
//! - [`HealthSummary`] / [`ResourceHealthDetail`] are the aggregate health
//!   views produced by `health_check_all` and the background monitor.

mod builder;
mod health;
#[allow(clippy::module_inception)]
mod manager;
mod monitor;
mod registry;

pub use builder::ManagerBuilder;
pub use health::{HealthSummary, ResourceHealthDetail};
pub use manager::ResourceManager;
