//! Tests for the periodic exporter
//!
//! Runs the real export task on a short interval against a stub sink and
//! checks the exported series, failure isolation, and shutdown behavior.

use anyhow::Result;
use axum::http::StatusCode;
use pizza_telemetry::{ExporterHandle, MethodClass, Telemetry};
use std::time::Duration;
use tokio::time::sleep;

use test_helpers::{stub_metrics_config, StubSink};

const TICK: Duration = Duration::from_millis(100);
const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn test_tick_exports_every_tracked_series() -> Result<()> {
    let sink = StubSink::start(StatusCode::OK).await;
    let telemetry = Telemetry::new(&stub_metrics_config(&sink.url))?;

    // Seed some counter state
    telemetry.metrics().record_request(MethodClass::Get);
    telemetry.metrics().record_request(MethodClass::Get);
    telemetry.metrics().record_request(MethodClass::Post);
    telemetry.metrics().session_opened();
    telemetry.metrics().auth_succeeded();
    telemetry.metrics().pizza_sold();
    telemetry.metrics().add_revenue(0.05);

    let exporter = ExporterHandle::start(telemetry.clone(), TICK);

    let expected = [
        ("system_cpu", "all"),
        ("system_memory", "all"),
        ("request_total", "all"),
        ("request_total", "GET"),
        ("request_total", "POST"),
        ("request_total", "DELETE"),
        ("activeUsers_total", "all"),
        ("authentication_successful", "all"),
        ("authentication_failed", "all"),
        ("pizzasSold_total", "all"),
        ("pizzaFailure_total", "all"),
        ("revenue_total", "all"),
    ];
    let all_arrived = sink
        .wait_for(
            |samples| {
                expected
                    .iter()
                    .all(|(name, method)| {
                        samples.iter().any(|s| s.name == *name && s.method == *method)
                    })
            },
            WAIT,
        )
        .await;
    exporter.shutdown().await;
    assert!(all_arrived, "missing series: got {:?}", sink.samples());

    // Exported values reflect the seeded counters
    assert_eq!(sink.samples_for("request_total", "all")[0].value, 3.0);
    assert_eq!(sink.samples_for("request_total", "GET")[0].value, 2.0);
    assert_eq!(sink.samples_for("request_total", "POST")[0].value, 1.0);
    assert_eq!(sink.samples_for("request_total", "DELETE")[0].value, 0.0);
    assert_eq!(sink.samples_for("activeUsers_total", "all")[0].value, 1.0);
    assert_eq!(sink.samples_for("pizzasSold_total", "all")[0].value, 1.0);
    assert!((sink.samples_for("revenue_total", "all")[0].value - 0.05).abs() < 1e-12);
    Ok(())
}

#[tokio::test]
async fn test_pushes_carry_bearer_credentials() -> Result<()> {
    let sink = StubSink::start(StatusCode::OK).await;
    let telemetry = Telemetry::new(&stub_metrics_config(&sink.url))?;
    let exporter = ExporterHandle::start(telemetry.clone(), TICK);

    let arrived = sink.wait_for(|samples| !samples.is_empty(), WAIT).await;
    exporter.shutdown().await;
    assert!(arrived);

    // userId:apiKey pair from the config, as one bearer token
    assert_eq!(sink.samples()[0].authorization, "Bearer 1:test-key");
    Ok(())
}

#[tokio::test]
async fn test_sink_failure_does_not_stop_the_exporter() -> Result<()> {
    let sink = StubSink::start(StatusCode::INTERNAL_SERVER_ERROR).await;
    let telemetry = Telemetry::new(&stub_metrics_config(&sink.url))?;
    let exporter = ExporterHandle::start(telemetry.clone(), TICK);

    // Every push gets a 500 back; ticks must keep coming regardless
    let kept_ticking = sink
        .wait_for(
            |samples| {
                samples
                    .iter()
                    .filter(|s| s.name == "request_total" && s.method == "all")
                    .count()
                    >= 3
            },
            WAIT,
        )
        .await;
    exporter.shutdown().await;
    assert!(kept_ticking, "exporter stopped after sink failures");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_sink_does_not_stop_the_exporter() -> Result<()> {
    // Nothing listens here; every push fails at the transport layer
    let mut config = stub_metrics_config("http://127.0.0.1:9/");
    config.timeout_secs = 1;
    let telemetry = Telemetry::new(&config)?;

    let exporter = ExporterHandle::start(telemetry.clone(), TICK);
    sleep(TICK * 5).await;
    exporter.shutdown().await;

    // Still able to export normally afterwards
    let sink = StubSink::start(StatusCode::OK).await;
    let telemetry = Telemetry::new(&stub_metrics_config(&sink.url))?;
    let exporter = ExporterHandle::start(telemetry, TICK);
    let arrived = sink.wait_for(|samples| !samples.is_empty(), WAIT).await;
    exporter.shutdown().await;
    assert!(arrived);
    Ok(())
}

#[tokio::test]
async fn test_shutdown_stops_ticking() -> Result<()> {
    let sink = StubSink::start(StatusCode::OK).await;
    let telemetry = Telemetry::new(&stub_metrics_config(&sink.url))?;

    let exporter = ExporterHandle::start(telemetry, TICK);
    sink.wait_for(|samples| !samples.is_empty(), WAIT).await;
    exporter.shutdown().await;

    // Let any in-flight pushes land, then expect the count to hold still
    sleep(TICK * 3).await;
    let settled = sink.samples().len();
    sleep(TICK * 5).await;
    assert_eq!(sink.samples().len(), settled);
    Ok(())
}

#[tokio::test]
async fn test_gauges_recomputed_each_tick() -> Result<()> {
    let sink = StubSink::start(StatusCode::OK).await;
    let telemetry = Telemetry::new(&stub_metrics_config(&sink.url))?;
    let exporter = ExporterHandle::start(telemetry.clone(), TICK);

    // First tick sees zero requests
    sink.wait_for(
        |samples| samples.iter().any(|s| s.name == "request_total" && s.method == "all"),
        WAIT,
    )
    .await;

    // Later ticks must observe counters committed in between
    telemetry.metrics().record_request(MethodClass::Delete);
    let observed = sink
        .wait_for(
            |samples| {
                samples
                    .iter()
                    .any(|s| s.name == "request_total" && s.method == "DELETE" && s.value == 1.0)
            },
            WAIT,
        )
        .await;
    exporter.shutdown().await;
    assert!(observed, "export tick did not pick up a later increment");
    Ok(())
}
