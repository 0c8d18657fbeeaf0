//! # resvisor
//!
//! **Resvisor** is a resource lifecycle orchestration library for Rust.
//!
//! It provides primitives to define, register, and supervise long-lived
//! external resources (databases, caches, message brokers) behind a uniform
//! async lifecycle. The crate is designed as a building block for application
//! frameworks and service runtimes.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │  Lifecycle   │   │  Lifecycle   │   │  Lifecycle   │
//!     │ (user res #1)│   │ (user res #2)│   │ (user res #3)│
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Resource   │   │   Resource   │   │   Resource   │
//!     │(state machine│   │(state machine│   │(state machine│
//!     │  + health)   │   │  + health)   │   │  + health)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  ResourceManager (registry + orchestrator)                        │
//! │  - Registry (by name, by type, registration order)                │
//! │  - start_all / stop_all (ordered, failure-tolerant)               │
//! │  - HealthMonitor (periodic aggregate checks, cancellable)         │
//! └──────┬──────────────────────┬──────────────────────┬──────────────┘
//!        ▼                      ▼                      ▼
//!   EventSink (Bus)        DiBridge (container)   ProgressSink (display)
//! ```
//!
//! ### Lifecycle
//! ```text
//! Uninitialized ──initialize()──► Initialized ──connect()──► Connected
//!                                     ▲                          │
//!                                     │ (reconnect allowed)      │
//!                                 Disconnected ◄──disconnect()───┘
//!                                     │
//!                                 cleanup() ──► CleanedUp (terminal)
//!
//! any hook error ──► Failed (cleanup still allowed)
//!
//! start_all():  registration order, initialize (+ connect for managed
//!               resources), one failure never stops the rest
//! stop_all():   reverse order, stop_management → disconnect → cleanup,
//!               per-resource timeout, stragglers are abandoned
//! ```
//!
//! ## Features
//! | Area            | Description                                                      | Key types / traits                      |
//! |-----------------|------------------------------------------------------------------|------------------------------------------|
//! | **Resources**   | Implement the async lifecycle for a backing dependency.          | [`Lifecycle`], [`Managed`], [`Resource`] |
//! | **Management**  | Register, look up, and bulk start/stop resources.                | [`ResourceManager`], [`ManagerBuilder`]  |
//! | **Health**      | On-demand and periodic aggregate health checks.                  | [`HealthSummary`], [`ResourceHealthDetail`] |
//! | **Events**      | Observe lifecycle events over a broadcast bus.                   | [`Bus`], [`Event`], [`EventKind`]        |
//! | **Bridges**     | Plug in DI containers, progress displays, custom event sinks.    | [`DiBridge`], [`ProgressSink`], [`EventSink`] |
//! | **Errors**      | Typed errors for lookups and lifecycle transitions.              | [`ResourceError`], [`Phase`]             |
//! | **Configuration** | Centralize shutdown deadlines and monitor cadence.             | [`ManagerConfig`]                        |
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use resvisor::{Bus, HookError, Lifecycle, Resource, ResourceHealth, ResourceManager};
//!
//! struct Cache;
//!
//! #[async_trait]
//! impl Lifecycle for Cache {
//!     fn name(&self) -> &str { "cache" }
//!     fn resource_type(&self) -> &str { "cache" }
//!     async fn initialize(&self) -> Result<(), HookError> { Ok(()) }
//!     async fn connect(&self) -> Result<(), HookError> { Ok(()) }
//!     async fn disconnect(&self) -> Result<(), HookError> { Ok(()) }
//!     async fn health_check(&self) -> Result<ResourceHealth, HookError> {
//!         Ok(ResourceHealth::Healthy)
//!     }
//!     async fn cleanup(&self) -> Result<(), HookError> { Ok(()) }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let bus = Bus::new(64);
//!     let mut events = bus.subscribe();
//!
//!     let manager = ResourceManager::builder()
//!         .with_events(bus.clone())
//!         .build();
//!
//!     manager.register(Resource::new(Cache)).await;
//!
//!     manager.start_all().await;
//!     assert!(manager.is_started());
//!
//!     manager.stop_all().await;
//!     assert!(!manager.is_started());
//!
//!     // registration, startup, and shutdown were all published
//!     assert!(events.try_recv().is_ok());
//! }
//! ```

mod bridges;
mod config;
mod error;
mod events;
mod manager;
mod resource;

// ---- Public re-exports ----

pub use bridges::{DiBridge, EventSink, ProgressSink};
pub use config::ManagerConfig;
pub use error::{BridgeError, HookError, Phase, ResourceError};
pub use events::{Bus, Event, EventKind, FailedResource};
pub use manager::{HealthSummary, ManagerBuilder, ResourceHealthDetail, ResourceManager};
pub use resource::{Lifecycle, Managed, Resource, ResourceHealth, ResourceState, ResourceStats};
