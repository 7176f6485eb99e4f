//! Health Check, Metrics and Entity Endpoints
//!
//! HTTP surface of the tracker: health and discovery status, Prometheus
//! metrics, and the current snapshot of every registered entity.
//!
//! # Endpoints
//!
//! - `GET /health` - Returns JSON health status
//! - `GET /healthz` - Liveness probe (simple OK)
//! - `GET /readyz` - Readiness probe (ready after one successful discovery pass)
//! - `GET /metrics` - Prometheus metrics in text format
//! - `GET /api/entities` - Snapshots of every entity
//! - `GET /api/entities/{unique_id}` - Snapshot of one entity

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::application::ports::EntityPlatformPort;
use crate::application::services::{OrderCoordinator, PollHealth};
use crate::domain::entity::EntityKind;
use crate::infrastructure::metrics::get_metrics_handle;
use crate::infrastructure::registry::EntityRegistry;

/// Consecutive failed discovery passes after which the tracker is unhealthy.
const UNHEALTHY_AFTER_FAILURES: u32 = 3;

// =============================================================================
// Health Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded", or "unhealthy".
    pub status: HealthStatus,
    /// Tracker version.
    pub version: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Current time.
    pub current_time: DateTime<Utc>,
    /// Order discovery status.
    pub discovery: DiscoveryStatus,
    /// Registered entity counts.
    pub entities: EntityCounts,
}

/// Overall health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Last discovery pass succeeded.
    Healthy,
    /// No pass yet, or a few recent failures.
    Degraded,
    /// Discovery keeps failing, most likely expired credentials.
    Unhealthy,
}

/// Order discovery status.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryStatus {
    /// Passes attempted.
    pub attempts: u64,
    /// Failed passes since the last success.
    pub consecutive_failures: u32,
    /// Time of the last successful pass.
    pub last_success: Option<DateTime<Utc>>,
    /// Time of the last pass.
    pub last_attempt: Option<DateTime<Utc>>,
    /// Error of the last failed pass.
    pub last_error: Option<String>,
    /// Eviction policy in effect.
    pub eviction: &'static str,
}

/// Registered entity counts.
#[derive(Debug, Clone, Serialize)]
pub struct EntityCounts {
    /// Order sensors.
    pub orders: usize,
    /// Venue sensors.
    pub venues: usize,
}

// =============================================================================
// Health Server State
// =============================================================================

/// Shared state for the health server.
pub struct HealthServerState {
    version: String,
    started_at: Instant,
    registry: Arc<EntityRegistry>,
    coordinator: Arc<OrderCoordinator>,
}

impl HealthServerState {
    /// Create new health server state.
    #[must_use]
    pub fn new(
        version: String,
        registry: Arc<EntityRegistry>,
        coordinator: Arc<OrderCoordinator>,
    ) -> Self {
        Self {
            version,
            started_at: Instant::now(),
            registry,
            coordinator,
        }
    }
}

// =============================================================================
// Health Server
// =============================================================================

/// Health check HTTP server.
pub struct HealthServer {
    port: u16,
    state: Arc<HealthServerState>,
    cancel: CancellationToken,
}

impl HealthServer {
    /// Create a new health server.
    #[must_use]
    pub const fn new(port: u16, state: Arc<HealthServerState>, cancel: CancellationToken) -> Self {
        Self {
            port,
            state,
            cancel,
        }
    }

    /// Run the health server until cancelled.
    ///
    /// # Errors
    ///
    /// Returns `HealthServerError` if binding fails or the HTTP server
    /// encounters a fatal error while running.
    pub async fn run(self) -> Result<(), HealthServerError> {
        let app = router(self.state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| HealthServerError::BindFailed(self.port, e.to_string()))?;

        tracing::info!(port = self.port, "Health server listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(self.cancel.cancelled_owned())
            .await
            .map_err(|e| HealthServerError::ServerFailed(e.to_string()))?;

        tracing::info!("Health server stopped");
        Ok(())
    }
}

/// Build the HTTP router.
#[must_use]
pub fn router(state: Arc<HealthServerState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/healthz", get(liveness_handler))
        .route("/readyz", get(readiness_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/entities", get(entities_handler))
        .route("/api/entities/{unique_id}", get(entity_handler))
        .with_state(state)
}

// =============================================================================
// HTTP Handlers
// =============================================================================

async fn health_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    let response = build_health_response(&state);
    let status_code = match response.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn readiness_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    if state.coordinator.health().last_success.is_some() {
        (StatusCode::OK, "READY")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "NOT READY")
    }
}

async fn metrics_handler() -> impl IntoResponse {
    get_metrics_handle().map_or_else(
        || {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                [("content-type", "text/plain")],
                "Metrics not initialized".to_string(),
            )
        },
        |handle| {
            let body = handle.render();
            (
                StatusCode::OK,
                [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
                body,
            )
        },
    )
}

async fn entities_handler(State(state): State<Arc<HealthServerState>>) -> impl IntoResponse {
    Json(state.registry.snapshots())
}

async fn entity_handler(
    State(state): State<Arc<HealthServerState>>,
    Path(unique_id): Path<String>,
) -> impl IntoResponse {
    state.registry.snapshot(&unique_id).map_or_else(
        || (StatusCode::NOT_FOUND, "Entity not found").into_response(),
        |snapshot| Json(snapshot).into_response(),
    )
}

fn build_health_response(state: &HealthServerState) -> HealthResponse {
    let health = state.coordinator.health();
    let status = determine_health_status(&health);

    HealthResponse {
        status,
        version: state.version.clone(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        current_time: Utc::now(),
        discovery: DiscoveryStatus {
            attempts: health.attempts,
            consecutive_failures: health.consecutive_failures,
            last_success: health.last_success,
            last_attempt: health.last_attempt,
            last_error: health.last_error,
            eviction: state.coordinator.eviction().as_str(),
        },
        entities: EntityCounts {
            orders: state.registry.count(EntityKind::Order),
            venues: state.registry.count(EntityKind::Venue),
        },
    }
}

fn determine_health_status(health: &PollHealth) -> HealthStatus {
    match health.consecutive_failures {
        0 if health.last_success.is_some() => HealthStatus::Healthy,
        n if n >= UNHEALTHY_AFTER_FAILURES => HealthStatus::Unhealthy,
        _ => HealthStatus::Degraded,
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Health server errors.
#[derive(Debug, thiserror::Error)]
pub enum HealthServerError {
    /// Failed to bind to port.
    #[error("failed to bind to port {0}: {1}")]
    BindFailed(u16, String),

    /// Server error.
    #[error("server error: {0}")]
    ServerFailed(String),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{Value, json};
    use test_case::test_case;
    use tower::ServiceExt;

    use super::*;
    use crate::application::ports::{FetchError, MockWoltApiPort};
    use crate::application::services::OrderEvictionPolicy;
    use crate::domain::order::{ActiveOrder, OrderDetails};

    fn health(consecutive_failures: u32, succeeded: bool) -> PollHealth {
        PollHealth {
            attempts: u64::from(consecutive_failures) + u64::from(succeeded),
            consecutive_failures,
            last_success: succeeded.then(Utc::now),
            last_attempt: Some(Utc::now()),
            last_error: None,
        }
    }

    #[test_case(0, true, HealthStatus::Healthy ; "last pass succeeded")]
    #[test_case(1, true, HealthStatus::Degraded ; "one failure")]
    #[test_case(2, false, HealthStatus::Degraded ; "two failures never succeeded")]
    #[test_case(3, true, HealthStatus::Unhealthy ; "three failures")]
    #[test_case(10, false, HealthStatus::Unhealthy ; "many failures")]
    fn status_from_poll_health(failures: u32, succeeded: bool, expected: HealthStatus) {
        assert_eq!(determine_health_status(&health(failures, succeeded)), expected);
    }

    #[test]
    fn no_pass_yet_is_degraded() {
        assert_eq!(
            determine_health_status(&PollHealth::default()),
            HealthStatus::Degraded
        );
    }

    #[test]
    fn health_status_serialization() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Healthy).unwrap(),
            "\"healthy\""
        );
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }

    fn state(api: MockWoltApiPort) -> Arc<HealthServerState> {
        let registry = Arc::new(EntityRegistry::new());
        let coordinator = Arc::new(OrderCoordinator::new(
            Arc::new(api),
            Arc::clone(&registry) as Arc<dyn EntityPlatformPort>,
            "Wolt Order",
            OrderEvictionPolicy::Never,
        ));
        Arc::new(HealthServerState::new(
            "0.1.0".to_string(),
            registry,
            coordinator,
        ))
    }

    fn tracking_api() -> MockWoltApiPort {
        let mut api = MockWoltApiPort::new();
        api.expect_fetch_active_orders()
            .returning(|| Ok(vec![ActiveOrder::new("A1")]));
        api.expect_fetch_order_details().returning(|_| {
            Ok(serde_json::from_value::<OrderDetails>(json!({
                "status": "delivering",
                "venue_name": "Noodle Bar"
            }))
            .unwrap())
        });
        api
    }

    async fn get(state: &Arc<HealthServerState>, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router(Arc::clone(state))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn liveness_is_always_ok() {
        let state = state(MockWoltApiPort::new());
        let (status, body) = get(&state, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"OK");
    }

    #[tokio::test]
    async fn not_ready_before_first_successful_pass() {
        let mut api = MockWoltApiPort::new();
        api.expect_fetch_active_orders()
            .returning(|| Err(FetchError::Transport("connection refused".into())));
        let state = state(api);

        let (status, _) = get(&state, "/readyz").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        state.coordinator.poll().await;
        let (status, body) = get(&state, "/health").await;
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "degraded");
        assert_eq!(health["discovery"]["consecutive_failures"], 1);
    }

    #[tokio::test]
    async fn ready_and_healthy_after_successful_pass() {
        let state = state(tracking_api());
        state.coordinator.poll().await;

        let (status, _) = get(&state, "/readyz").await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = get(&state, "/health").await;
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["version"], "0.1.0");
        assert_eq!(health["entities"]["orders"], 1);
        assert_eq!(health["entities"]["venues"], 0);
        assert_eq!(health["discovery"]["eviction"], "never");
    }

    #[tokio::test]
    async fn repeated_failures_are_unhealthy() {
        let mut api = MockWoltApiPort::new();
        api.expect_fetch_active_orders().returning(|| {
            Err(FetchError::Status {
                status: 401,
                url: "http://wolt.invalid/orders".into(),
            })
        });
        let state = state(api);
        for _ in 0..3 {
            state.coordinator.poll().await;
        }

        let (status, body) = get(&state, "/health").await;
        let health: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(health["status"], "unhealthy");
        assert!(
            health["discovery"]["last_error"]
                .as_str()
                .unwrap()
                .contains("401")
        );
    }

    #[tokio::test]
    async fn entities_are_listed_and_looked_up() {
        let state = state(tracking_api());
        state.coordinator.poll().await;

        let (status, body) = get(&state, "/api/entities").await;
        let entities: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entities.as_array().unwrap().len(), 1);

        let (status, body) = get(&state, "/api/entities/wolt_A1").await;
        let entity: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(entity["state"], "delivering");
        assert_eq!(entity["name"], "Wolt Order A1");
        assert_eq!(entity["attributes"]["venue_name"], "Noodle Bar");
        assert_eq!(entity["attribution"], "Data provided by Wolt");
        assert_eq!(entity["icon"], "mdi:package-variant");

        let (status, _) = get(&state, "/api/entities/wolt_missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
