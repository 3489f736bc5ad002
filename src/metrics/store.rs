//! Process-wide request and business counters
//!
//! Lock-free counter bank using atomic operations. Counters are updated from
//! request handlers on any worker thread and read as a snapshot by the
//! periodic exporter. All methods are safe to call concurrently.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// HTTP method classes tracked by dedicated request counters
///
/// Anything that is not GET, POST, or DELETE only bumps the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodClass {
    Get,
    Post,
    Delete,
    Other,
}

/// Thread-safe counter bank for the whole service
///
/// Cheap to clone; all clones share the same underlying counters. One
/// instance is constructed at service init and handed to the HTTP pipeline
/// and the exporter task.
#[derive(Debug, Clone, Default)]
pub struct ServiceMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug, Default)]
struct MetricsInner {
    // Request traffic
    total_requests: AtomicU64,
    get_requests: AtomicU64,
    post_requests: AtomicU64,
    delete_requests: AtomicU64,

    // Session and authentication events
    active_sessions: AtomicU64,
    auth_successes: AtomicU64,
    auth_failures: AtomicU64,

    // Business events
    pizzas_sold: AtomicU64,
    pizza_failures: AtomicU64,
    // Revenue is fractional (per-item prices); stored as f64 bits
    revenue_bits: AtomicU64,
}

/// Point-in-time view of every tracked counter
///
/// Values reflect all increments that had fully committed when the snapshot
/// was taken; distinct counters are not frozen as one consistent cut.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub get_requests: u64,
    pub post_requests: u64,
    pub delete_requests: u64,
    pub active_sessions: u64,
    pub auth_successes: u64,
    pub auth_failures: u64,
    pub pizzas_sold: u64,
    pub pizza_failures: u64,
    pub revenue: f64,
}

impl ServiceMetrics {
    /// Create a fresh counter bank with every counter at zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one inbound request of the given method class
    ///
    /// Bumps the matching per-method counter and the aggregate.
    #[inline]
    pub fn record_request(&self, method: MethodClass) {
        match method {
            MethodClass::Get => {
                self.inner.get_requests.fetch_add(1, Ordering::Relaxed);
            }
            MethodClass::Post => {
                self.inner.post_requests.fetch_add(1, Ordering::Relaxed);
            }
            MethodClass::Delete => {
                self.inner.delete_requests.fetch_add(1, Ordering::Relaxed);
            }
            MethodClass::Other => {}
        }
        self.inner.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a user session opening (login)
    #[inline]
    pub fn session_opened(&self) {
        self.inner.active_sessions.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a user session closing (logout)
    ///
    /// Clamped at zero: closing a session when none are active is a no-op.
    #[inline]
    pub fn session_closed(&self) {
        let _ = self.inner.active_sessions.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |sessions| sessions.checked_sub(1),
        );
    }

    /// Record a successful authentication attempt
    #[inline]
    pub fn auth_succeeded(&self) {
        self.inner.auth_successes.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed authentication attempt
    #[inline]
    pub fn auth_failed(&self) {
        self.inner.auth_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fulfilled pizza order
    #[inline]
    pub fn pizza_sold(&self) {
        self.inner.pizzas_sold.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed pizza order
    #[inline]
    pub fn pizza_failed(&self) {
        self.inner.pizza_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Add one item's price to the revenue counter
    #[inline]
    pub fn add_revenue(&self, amount: f64) {
        let _ = self.inner.revenue_bits.fetch_update(
            Ordering::Relaxed,
            Ordering::Relaxed,
            |bits| Some((f64::from_bits(bits) + amount).to_bits()),
        );
    }

    /// Get a snapshot of current counter values without blocking writers
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_requests: self.inner.total_requests.load(Ordering::Relaxed),
            get_requests: self.inner.get_requests.load(Ordering::Relaxed),
            post_requests: self.inner.post_requests.load(Ordering::Relaxed),
            delete_requests: self.inner.delete_requests.load(Ordering::Relaxed),
            active_sessions: self.inner.active_sessions.load(Ordering::Relaxed),
            auth_successes: self.inner.auth_successes.load(Ordering::Relaxed),
            auth_failures: self.inner.auth_failures.load(Ordering::Relaxed),
            pizzas_sold: self.inner.pizzas_sold.load(Ordering::Relaxed),
            pizza_failures: self.inner.pizza_failures.load(Ordering::Relaxed),
            revenue: f64::from_bits(self.inner.revenue_bits.load(Ordering::Relaxed)),
        }
    }
}
