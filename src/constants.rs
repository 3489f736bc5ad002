//! Constants used throughout the service
//!
//! Centralizes metric naming and export defaults so the interceptor, the
//! exporter, and the tests agree on the wire-visible identifiers.

/// Metric name components
///
/// The sink sees `<prefix>_<name>` (e.g. `request_total`, `system_cpu`).
/// These spellings are part of the wire contract with the monitoring
/// dashboards; do not rename casually.
pub mod metric {
    // Prefixes
    pub const REQUEST: &str = "request";
    pub const SYSTEM: &str = "system";
    pub const ACTIVE_USERS: &str = "activeUsers";
    pub const AUTHENTICATION: &str = "authentication";
    pub const PIZZAS_SOLD: &str = "pizzasSold";
    pub const PIZZA_FAILURE: &str = "pizzaFailure";
    pub const MAKE_PIZZA: &str = "makePizza";
    pub const REVENUE: &str = "revenue";

    // Names
    pub const TOTAL: &str = "total";
    pub const LATENCY: &str = "latency";
    pub const CPU: &str = "cpu";
    pub const MEMORY: &str = "memory";
    pub const SUCCESSFUL: &str = "successful";
    pub const FAILED: &str = "failed";
}

/// Values for the `method` attribute attached to every sample
pub mod method_tag {
    pub const ALL: &str = "all";
    pub const GET: &str = "GET";
    pub const POST: &str = "POST";
    pub const DELETE: &str = "DELETE";
}

/// Paths the interceptor recognizes
pub mod endpoint {
    /// Order placement; POSTs here drive the sold/failed business counters
    pub const ORDER_PATH: &str = "/api/order";
}

/// Export timing defaults
pub mod export {
    /// Seconds between export ticks
    pub const DEFAULT_INTERVAL_SECS: u64 = 10;

    /// Per-push request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
}
