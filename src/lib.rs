//! Order-processing service backend with in-process telemetry
//!
//! The core of this crate is the metrics subsystem under [`metrics`]: a
//! lock-free counter bank fed by request-instrumentation middleware, a host
//! resource sampler, and a periodic exporter that pushes every tracked value
//! to an external monitoring sink as individual gauge samples.
//!
//! [`service`] provides the HTTP surface the middleware instruments; the
//! business endpoints themselves are thin stubs over external collaborators.

pub mod config;
pub mod constants;
pub mod logging;
pub mod metrics;
pub mod service;

pub use config::{create_default_config, load_config, Config, MetricsConfig};
pub use metrics::{
    ExporterHandle, MethodClass, MetricSink, MetricsSnapshot, SampleError, ServiceMetrics,
    SystemSampler, Telemetry,
};
pub use service::{build_router, AppState};
