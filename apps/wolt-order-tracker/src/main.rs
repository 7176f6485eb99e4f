//! Wolt Order Tracker Binary
//!
//! Starts the order discovery and entity refresh timers and the health
//! server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin wolt-order-tracker
//! ```
//!
//! # Environment Variables
//!
//! ## Required (unless `WOLT_TRACKER_CONFIG` is set)
//! - `WOLT_SESSION_ID`: Wolt web session id
//! - `WOLT_BEARER_TOKEN`: Current access token
//! - `WOLT_REFRESH_TOKEN`: Current refresh token
//!
//! ## Optional
//! - `WOLT_TRACKER_CONFIG`: Path to a YAML config file, used instead of the variables above
//! - `WOLT_NAME`: Sensor name prefix (default: Wolt Order)
//! - `WOLT_VENUE_IDS`: Newline- or comma-delimited venue slugs
//! - `WOLT_UPDATE_INTERVAL_SECS`: Order discovery interval (default: 60)
//! - `WOLT_SCAN_INTERVAL_SECS`: Entity refresh interval (default: 30)
//! - `WOLT_REQUEST_TIMEOUT_SECS`: Per-request timeout (default: 10)
//! - `WOLT_ORDER_EVICTION`: never | inactive (default: never)
//! - `WOLT_AUTH_BASE_URL`, `WOLT_CONSUMER_BASE_URL`: API base URLs
//! - `WOLT_HEALTH_PORT`: Health check HTTP port (default: 8083)
//! - `OTEL_ENABLED`: Enable OpenTelemetry export (default: false)
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use wolt_order_tracker::application::ports::{EntityPlatformPort, WoltApiPort};
use wolt_order_tracker::infrastructure::health::{HealthServer, HealthServerState};
use wolt_order_tracker::infrastructure::telemetry;
use wolt_order_tracker::{
    EntityRegistry, TrackerConfig, TrackerService, WoltClient, init_metrics, load_config,
};

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let _telemetry_guard = telemetry::init();

    tracing::info!("Starting Wolt order tracker");

    let _metrics_handle = init_metrics();

    let config = match std::env::var("WOLT_TRACKER_CONFIG") {
        Ok(path) if !path.is_empty() => {
            load_config(&path).with_context(|| format!("loading {path}"))?
        }
        _ => TrackerConfig::from_env().context("reading WOLT_* environment variables")?,
    };
    log_config(&config);

    let shutdown_token = CancellationToken::new();

    let client: Arc<dyn WoltApiPort> = Arc::new(
        WoltClient::new(&config.client_config(), config.credentials.clone())
            .context("building Wolt client")?,
    );
    let registry = Arc::new(EntityRegistry::new());

    let tracker = Arc::new(TrackerService::new(
        client,
        Arc::clone(&registry) as Arc<dyn EntityPlatformPort>,
        config.tracker_settings(),
    ));

    let summary = tracker.start().await;
    tracing::info!(
        venues = summary.venues_registered,
        orders = summary.first_poll.created.len(),
        first_poll_ok = summary.first_poll.is_success(),
        "Startup complete"
    );

    // Spawn discovery and entity refresh timers
    let timers = {
        let tracker = Arc::clone(&tracker);
        let shutdown = shutdown_token.clone();
        tokio::spawn(async move { tracker.run(shutdown).await })
    };

    // Spawn health server
    let health_state = Arc::new(HealthServerState::new(
        env!("CARGO_PKG_VERSION").to_string(),
        Arc::clone(&registry),
        tracker.coordinator(),
    ));
    let health_server = HealthServer::new(
        config.server.health_port,
        health_state,
        shutdown_token.clone(),
    );
    tokio::spawn(async move {
        if let Err(e) = health_server.run().await {
            tracing::error!(error = %e, "Health server error");
        }
    });

    tracing::info!("Wolt order tracker ready");

    await_shutdown(shutdown_token).await;

    if tokio::time::timeout(SHUTDOWN_TIMEOUT, timers).await.is_err() {
        tracing::warn!("Background tasks did not stop in time");
    }

    tracing::info!("Wolt order tracker stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &TrackerConfig) {
    tracing::info!(
        name = %config.name,
        venues = config.venue_slugs.len(),
        update_interval_secs = config.polling.update_interval.as_secs(),
        scan_interval_secs = config.polling.scan_interval.as_secs(),
        eviction = config.polling.eviction.as_str(),
        health_port = config.server.health_port,
        "Configuration loaded"
    );
    tracing::debug!(
        auth_base_url = %config.endpoints.auth_base_url,
        consumer_base_url = %config.endpoints.consumer_base_url,
        request_timeout_secs = config.polling.request_timeout.as_secs(),
        "Wolt endpoints"
    );
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
#[allow(clippy::expect_used)]
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("signal handler installation is critical for graceful shutdown");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler installation is critical for graceful shutdown")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();

    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
