//! In-process telemetry for the order service
//!
//! Every inbound HTTP request is counted and timed by the [`interceptor`]
//! middleware, host resource usage is sampled by [`SystemSampler`], and a
//! background [`exporter`] task periodically pushes every tracked value as a
//! gauge to an external monitoring sink via [`MetricSink`].
//!
//! The subsystem is best-effort by design: counters live only in memory,
//! exports are fire-and-forget with no retry, and no telemetry failure may
//! ever propagate into the request path.

pub mod exporter;
pub mod interceptor;
pub mod sink;
pub mod store;
pub mod system;

pub use exporter::ExporterHandle;
pub use sink::MetricSink;
pub use store::{MethodClass, MetricsSnapshot, ServiceMetrics};
pub use system::{SampleError, SystemSampler};

use crate::config::MetricsConfig;
use anyhow::Result;

/// Telemetry context owned by the service root
///
/// Bundles the counter bank and the sink client. Constructed once at service
/// init and passed by handle into the HTTP pipeline and the exporter task;
/// clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct Telemetry {
    metrics: ServiceMetrics,
    sink: MetricSink,
}

impl Telemetry {
    pub fn new(config: &MetricsConfig) -> Result<Self> {
        Ok(Self {
            metrics: ServiceMetrics::new(),
            sink: MetricSink::new(config)?,
        })
    }

    #[inline]
    #[must_use]
    pub fn metrics(&self) -> &ServiceMetrics {
        &self.metrics
    }

    #[inline]
    #[must_use]
    pub fn sink(&self) -> &MetricSink {
        &self.sink
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(99.999), 100.0);
    }
}
