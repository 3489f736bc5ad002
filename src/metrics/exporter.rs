//! Periodic gauge export to the monitoring sink
//!
//! A background task wakes on a fixed cadence, reads a counter snapshot and
//! fresh system gauges, and pushes each tracked metric through the sink as an
//! independent fire-and-forget request. The task is owned by the service
//! lifecycle: started at init, stopped via [`ExporterHandle::shutdown`].
//! A batch in flight at shutdown may be dropped.

use crate::constants::{method_tag, metric};
use crate::metrics::{SystemSampler, Telemetry};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Handle to the running export task
pub struct ExporterHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl ExporterHandle {
    /// Spawn the export task, ticking at the given interval
    #[must_use]
    pub fn start(telemetry: Telemetry, interval: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut sampler = SystemSampler::new();
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // interval fires immediately; consume that so the first export
            // happens one full interval after startup
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => export_tick(&telemetry, &mut sampler),
                    _ = shutdown_rx.changed() => {
                        debug!("metrics exporter stopping");
                        break;
                    }
                }
            }
        });

        Self { shutdown, task }
    }

    /// Signal the export task to stop and wait for it to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

/// Run one export tick
///
/// Every push is independent; a failure in one neither blocks nor cancels
/// the others, and pushes are not awaited before the next is issued.
fn export_tick(telemetry: &Telemetry, sampler: &mut SystemSampler) {
    let sink = telemetry.sink();

    match sampler.cpu_usage_percent() {
        Ok(cpu) => sink.push(metric::SYSTEM, method_tag::ALL, metric::CPU, cpu),
        Err(e) => warn!("skipping cpu gauge this tick: {}", e),
    }
    match sampler.memory_usage_percent() {
        Ok(memory) => sink.push(metric::SYSTEM, method_tag::ALL, metric::MEMORY, memory),
        Err(e) => warn!("skipping memory gauge this tick: {}", e),
    }

    let snapshot = telemetry.metrics().snapshot();

    sink.push(
        metric::REQUEST,
        method_tag::ALL,
        metric::TOTAL,
        snapshot.total_requests as f64,
    );
    sink.push(
        metric::REQUEST,
        method_tag::GET,
        metric::TOTAL,
        snapshot.get_requests as f64,
    );
    sink.push(
        metric::REQUEST,
        method_tag::POST,
        metric::TOTAL,
        snapshot.post_requests as f64,
    );
    sink.push(
        metric::REQUEST,
        method_tag::DELETE,
        metric::TOTAL,
        snapshot.delete_requests as f64,
    );

    sink.push(
        metric::ACTIVE_USERS,
        method_tag::ALL,
        metric::TOTAL,
        snapshot.active_sessions as f64,
    );

    sink.push(
        metric::AUTHENTICATION,
        method_tag::ALL,
        metric::SUCCESSFUL,
        snapshot.auth_successes as f64,
    );
    sink.push(
        metric::AUTHENTICATION,
        method_tag::ALL,
        metric::FAILED,
        snapshot.auth_failures as f64,
    );

    sink.push(
        metric::PIZZAS_SOLD,
        method_tag::ALL,
        metric::TOTAL,
        snapshot.pizzas_sold as f64,
    );
    sink.push(
        metric::PIZZA_FAILURE,
        method_tag::ALL,
        metric::TOTAL,
        snapshot.pizza_failures as f64,
    );

    sink.push(metric::REVENUE, method_tag::ALL, metric::TOTAL, snapshot.revenue);
}
