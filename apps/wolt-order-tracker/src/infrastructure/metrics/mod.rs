//! Prometheus Metrics Module
//!
//! Exposes tracker metrics in Prometheus format.
//!
//! # Metrics Categories
//!
//! - **Requests**: Wolt API calls by endpoint and outcome, with latency
//! - **Tokens**: Access token refresh attempts
//! - **Discovery**: Orders discovered and evicted
//! - **Entities**: Tracked entity counts and refresh outcomes
//!
//! # Integration
//!
//! Metrics are exposed at `/metrics` on the health server port.

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

use crate::domain::entity::EntityKind;

// =============================================================================
// Global Metrics Handle
// =============================================================================

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// # Panics
///
/// Panics if the recorder cannot be installed.
#[allow(clippy::expect_used)]
pub fn init_metrics() -> PrometheusHandle {
    PROMETHEUS_HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            register_metrics();
            handle
        })
        .clone()
}

/// Get the Prometheus handle for rendering metrics.
///
/// Returns `None` if metrics have not been initialized.
#[must_use]
pub fn get_metrics_handle() -> Option<PrometheusHandle> {
    PROMETHEUS_HANDLE.get().cloned()
}

// =============================================================================
// Metric Registration
// =============================================================================

fn register_metrics() {
    describe_counter!(
        "wolt_tracker_requests_total",
        "Total Wolt API requests by endpoint and outcome"
    );
    describe_histogram!(
        "wolt_tracker_request_duration_seconds",
        "Wolt API request latency"
    );
    describe_counter!(
        "wolt_tracker_token_refresh_total",
        "Total access token refresh attempts by outcome"
    );
    describe_counter!(
        "wolt_tracker_orders_discovered_total",
        "Total orders discovered in the active-orders list"
    );
    describe_counter!(
        "wolt_tracker_orders_evicted_total",
        "Total inactive orders removed from tracking"
    );
    describe_gauge!(
        "wolt_tracker_tracked_orders",
        "Number of order sensors registered"
    );
    describe_gauge!(
        "wolt_tracker_tracked_venues",
        "Number of venue sensors registered"
    );
    describe_counter!(
        "wolt_tracker_entity_updates_total",
        "Total entity refreshes by kind and outcome"
    );
}

// =============================================================================
// Metric Recording Functions
// =============================================================================

/// Wolt API endpoint label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Access token refresh.
    TokenRefresh,
    /// Active orders list.
    ActiveOrders,
    /// Per-order details.
    OrderDetails,
    /// Public venue details.
    VenueDetails,
}

impl Endpoint {
    /// Label value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TokenRefresh => "token_refresh",
            Self::ActiveOrders => "active_orders",
            Self::OrderDetails => "order_details",
            Self::VenueDetails => "venue_details",
        }
    }
}

/// Record a completed Wolt API request.
pub fn record_request(endpoint: Endpoint, outcome: &'static str, duration: Duration) {
    counter!(
        "wolt_tracker_requests_total",
        "endpoint" => endpoint.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!(
        "wolt_tracker_request_duration_seconds",
        "endpoint" => endpoint.as_str()
    )
    .record(duration.as_secs_f64());
}

/// Record an access token refresh attempt.
pub fn record_token_refresh(outcome: &'static str) {
    counter!("wolt_tracker_token_refresh_total", "outcome" => outcome).increment(1);
}

/// Record newly discovered orders.
pub fn record_orders_discovered(count: u64) {
    counter!("wolt_tracker_orders_discovered_total").increment(count);
}

/// Record orders removed from tracking.
pub fn record_orders_evicted(count: u64) {
    counter!("wolt_tracker_orders_evicted_total").increment(count);
}

/// Update the registered entity count for a kind.
pub fn set_tracked_entities(kind: EntityKind, count: f64) {
    match kind {
        EntityKind::Order => gauge!("wolt_tracker_tracked_orders").set(count),
        EntityKind::Venue => gauge!("wolt_tracker_tracked_venues").set(count),
    }
}

/// Record an entity refresh.
pub fn record_entity_update(kind: EntityKind, outcome: &'static str) {
    counter!(
        "wolt_tracker_entity_updates_total",
        "kind" => kind.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

// =============================================================================
// Tests
// =============================================================================
