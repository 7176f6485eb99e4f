#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements,
        clippy::literal_string_with_formatting_args
    )
)]

//! Wolt Order Tracker - Delivery Order Polling Daemon
//!
//! Polls Wolt for the active orders of one user session and for the
//! availability of a configured set of venues, and exposes each of them as
//! a sensor entity with a state value and an attribute map.
//!
//! # Layers (inside → outside)
//!
//! - **Domain**: Order, venue and entity snapshot types
//!   - `order`: Active orders and order details
//!   - `venue`: Venue availability and delivery estimates
//!   - `entity`: Outward snapshot of a sensor
//!
//! - **Application**: Use cases and port definitions
//!   - `ports`: Wolt API and entity host interfaces
//!   - `services`: Sensors, order discovery, startup and the tracker timers
//!
//! - **Infrastructure**: Adapters and external integrations
//!   - `wolt`: HTTP client with token refresh
//!   - `registry`: In-process entity host
//!   - `config`: Mapping, environment and YAML configuration
//!   - `health`: Health, metrics and entity HTTP endpoints
//!
//! # Data Flow
//!
//! ```text
//!                    every update_interval          every scan_interval (same task)
//!  Wolt active ─────► OrderCoordinator ──new ids──► EntityRegistry ──► sensors.update()
//!  orders list                                            │                 │
//!                                                         │                 ▼
//!                                                         │        Wolt order details /
//!                                                         ▼        venue endpoints
//!                                                  /api/entities
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Module Declarations
// =============================================================================

/// Domain layer - Order, venue and entity types with no I/O.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Re-exports
// =============================================================================

// Domain types
pub use domain::entity::{EntityKind, EntitySnapshot};
pub use domain::order::{ActiveOrder, OrderDetails, OrderId};
pub use domain::venue::{VenueAvailability, VenueDetails};

// Ports and services
pub use application::ports::{
    EntityPlatformPort, FailureKind, FetchError, RefreshSummary, SensorEntity, SharedEntity,
    UpdateOutcome, WoltApiPort,
};
pub use application::services::{
    OrderCoordinator, OrderEvictionPolicy, OrderSensor, PollHealth, PollOutcome, StartupSummary,
    TrackerService, TrackerSettings, VenueSensor,
};

// Infrastructure config
pub use infrastructure::config::{ConfigError, TrackerConfig, load_config};

// Wolt client
pub use infrastructure::wolt::{Credentials, WoltClient, WoltClientConfig, WoltEndpoints};

// Entity host
pub use infrastructure::registry::EntityRegistry;

// Health server
pub use infrastructure::health::{HealthServer, HealthServerError, HealthServerState};

// Metrics
pub use infrastructure::metrics::init_metrics;

// Telemetry
pub use infrastructure::telemetry::{TelemetryConfig, TelemetryGuard, init as init_telemetry};
