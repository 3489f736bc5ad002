//! Request instrumentation middleware
//!
//! Runs on every inbound request: counts it by method class, times it, and
//! emits a latency sample when the response finishes. Order placements are
//! additionally classified into sold/failed business counters by status.
//!
//! Nothing here can fail the request: counter updates are infallible and
//! sink pushes run on detached tasks that only log their errors.

use crate::constants::{endpoint, method_tag, metric};
use crate::metrics::store::MethodClass;
use crate::metrics::{round2, Telemetry};
use axum::extract::{Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// Axum middleware instrumenting every request
pub async fn track_requests(
    State(telemetry): State<Telemetry>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let is_order_placement =
        request.uri().path() == endpoint::ORDER_PATH && method == Method::POST;

    telemetry.metrics().record_request(classify(&method));
    let started = Instant::now();

    let response = next.run(request).await;

    if is_order_placement {
        if response.status() == StatusCode::OK {
            telemetry.metrics().pizza_sold();
        } else {
            telemetry.metrics().pizza_failed();
        }
    }

    let latency_ms = round2(started.elapsed().as_secs_f64() * 1000.0);
    telemetry
        .sink()
        .push(metric::REQUEST, method_tag::ALL, metric::LATENCY, latency_ms);
    if is_order_placement {
        telemetry
            .sink()
            .push(metric::MAKE_PIZZA, method_tag::POST, metric::LATENCY, latency_ms);
    }

    response
}

fn classify(method: &Method) -> MethodClass {
    if *method == Method::GET {
        MethodClass::Get
    } else if *method == Method::POST {
        MethodClass::Post
    } else if *method == Method::DELETE {
        MethodClass::Delete
    } else {
        MethodClass::Other
    }
}
