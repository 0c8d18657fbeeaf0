//! # Health monitor: periodic aggregate health checks.
//!
//! Spawned by `start_all`, cancelled by `stop_all` through a
//! [`CancellationToken`]. The loop wakes on a short tick and runs a full
//! [`health_check_all`](super::ResourceManager::health_check_all) when the
//! configured interval has elapsed, so cancellation is observed within one
//! tick instead of one interval.
//!
//! ```text
//! loop:
//!   select! { cancelled => break, sleep(tick) => {} }
//!   interval elapsed?  ── no ──► continue
//!          │ yes
//!          ▼
//!   health_check_all() ──► publish ComponentHealthChanged
//! ```
//!
//! ## Rules
//! - Cancellation only races the tick sleep; an in-flight check always runs
//!   to completion before the loop can exit.
//! - A check failure for one resource is already absorbed by
//!   `health_check_all`; the monitor itself never errors.

use std::sync::Arc;

use tokio::time::{sleep, Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};

use super::ResourceManager;

/// Background loop driving periodic health checks.
pub(crate) struct HealthMonitor {
    manager: Arc<ResourceManager>,
    tick: Duration,
    interval: Duration,
}

impl HealthMonitor {
    pub(crate) fn new(manager: Arc<ResourceManager>, tick: Duration, interval: Duration) -> Self {
        Self {
            manager,
            tick,
            interval,
        }
    }

    /// Runs until `token` is cancelled.
    ///
    /// The first aggregate check runs one full interval after startup, not
    /// on the first tick; resources were just started and checked.
    pub(crate) async fn run(self, token: CancellationToken) {
        info!(tick = ?self.tick, interval = ?self.interval, "health monitor started");
        let mut last_check = Instant::now();

        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    info!("health monitor stopped");
                    return;
                }
                _ = sleep(self.tick) => {}
            }

            if last_check.elapsed() < self.interval {
                continue;
            }
            last_check = Instant::now();

            let summary = self.manager.health_check_all().await;
            debug!(
                total = summary.total,
                healthy = summary.healthy,
                unhealthy = summary.unhealthy,
                unknown = summary.unknown,
                "health check completed"
            );

            let status = if summary.is_healthy() {
                "healthy"
            } else {
                "unhealthy"
            };
            let non_healthy = summary.non_healthy_names();
            if !non_healthy.is_empty() {
                warn!(resources = ?non_healthy, "resources not healthy");
            }

            self.manager
                .publish(
                    Event::new(EventKind::ComponentHealthChanged)
                        .with_reason(status)
                        .with_health(summary),
                )
                .await;
        }
    }
}
