use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use pizza_telemetry::{
    build_router, create_default_config, load_config, logging, AppState, ExporterHandle, Telemetry,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_dual_logging();

    let args = Args::parse();

    // Load configuration, creating a default file when none exists
    let config = if std::path::Path::new(&args.config).exists() {
        match load_config(&args.config) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load config file '{}': {}", args.config, e);
                return Err(e);
            }
        }
    } else {
        warn!(
            "Config file '{}' not found, creating default config",
            args.config
        );
        let default_config = create_default_config();
        let config_toml = toml::to_string_pretty(&default_config)?;
        std::fs::write(&args.config, &config_toml)?;
        info!("Created default config file: {}", args.config);
        default_config
    };

    // Telemetry context shared by the request pipeline and the exporter
    let telemetry = Telemetry::new(&config.metrics)?;
    let exporter = ExporterHandle::start(
        telemetry.clone(),
        Duration::from_secs(config.metrics.interval_secs),
    );
    info!(
        "Metrics exporter started ({}s interval, sink: {})",
        config.metrics.interval_secs,
        if config.metrics.url.is_empty() {
            "unset"
        } else {
            config.metrics.url.as_str()
        }
    );

    let app = build_router(AppState::new(telemetry));

    let listen_addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Pizza service listening on {}", listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown signal received, stopping metrics exporter");
    exporter.shutdown().await;
    info!("Graceful shutdown complete");

    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
