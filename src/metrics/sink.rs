//! Push client for the external monitoring sink
//!
//! Serializes one observation into the sink's OTLP-style gauge schema and
//! issues an authenticated HTTPS POST per sample. Pushes are fire-and-forget:
//! the network write runs on a detached task with a bounded timeout, and any
//! transport failure is logged and dropped, never surfaced to the caller.

use crate::config::MetricsConfig;
use anyhow::Result;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, error};

/// Client handle for the monitoring sink
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct MetricSink {
    inner: Arc<SinkInner>,
}

#[derive(Debug)]
struct SinkInner {
    client: reqwest::Client,
    url: String,
    source: String,
    authorization: String,
}

impl MetricSink {
    pub fn new(config: &MetricsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(SinkInner {
                client,
                url: config.url.clone(),
                source: config.source.clone(),
                authorization: format!("Bearer {}:{}", config.user_id, config.api_key),
            }),
        })
    }

    /// Push one observation to the sink
    ///
    /// The sample is stamped with the wall-clock time in nanoseconds and sent
    /// on a detached task. Must be called from within a tokio runtime.
    pub fn push(&self, prefix: &str, method_tag: &str, name: &str, value: f64) {
        let metric_name = format!("{}_{}", prefix, name);
        debug!(metric = %metric_name, value, "pushing metric");

        let payload = MetricPayload::single(&metric_name, method_tag, &self.inner.source, value);
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            let result = inner
                .client
                .post(&inner.url)
                .header(AUTHORIZATION, inner.authorization.clone())
                .json(&payload)
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    debug!(metric = %metric_name, "pushed metric");
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response.text().await.unwrap_or_default();
                    error!(
                        metric = %metric_name,
                        %status,
                        "failed to push metric to sink: {}",
                        body
                    );
                }
                Err(e) => {
                    error!(metric = %metric_name, "error pushing metric: {}", e);
                }
            }
        });
    }
}

// ============================================================================
// Wire schema
// ============================================================================

/// One export request body: a single gauge data point wrapped in the sink's
/// resourceMetrics/scopeMetrics envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetricPayload {
    resource_metrics: Vec<ResourceMetrics>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceMetrics {
    scope_metrics: Vec<ScopeMetrics>,
}

#[derive(Debug, Serialize)]
struct ScopeMetrics {
    metrics: Vec<Metric>,
}

#[derive(Debug, Serialize)]
struct Metric {
    name: String,
    unit: String,
    description: String,
    gauge: Gauge,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Gauge {
    data_points: Vec<DataPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DataPoint {
    as_double: f64,
    // The sink expects nanoseconds as a decimal string
    time_unix_nano: String,
    attributes: Vec<Attribute>,
}

#[derive(Debug, Serialize)]
struct Attribute {
    key: String,
    value: AttributeValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttributeValue {
    string_value: String,
}

impl Attribute {
    fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: AttributeValue {
                string_value: value.to_string(),
            },
        }
    }
}

impl MetricPayload {
    fn single(metric_name: &str, method_tag: &str, source: &str, value: f64) -> Self {
        let time_unix_nano = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
            .to_string();

        Self {
            resource_metrics: vec![ResourceMetrics {
                scope_metrics: vec![ScopeMetrics {
                    metrics: vec![Metric {
                        name: metric_name.to_string(),
                        unit: "1".to_string(),
                        description: String::new(),
                        gauge: Gauge {
                            data_points: vec![DataPoint {
                                as_double: value,
                                time_unix_nano,
                                attributes: vec![
                                    Attribute::new("method", method_tag),
                                    Attribute::new("source", source),
                                ],
                            }],
                        },
                    }],
                }],
            }],
        }
    }
}
