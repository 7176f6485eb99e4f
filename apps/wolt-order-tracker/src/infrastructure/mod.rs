//! Infrastructure Layer - Adapters and external integrations.
//!
//! This layer contains the concrete implementations of the port interfaces
//! defined in the application layer.

/// Wolt HTTP client (token refresh, orders, venues).
pub mod wolt;

/// In-process entity host.
pub mod registry;

/// Configuration loading.
pub mod config;

/// Health check, metrics and entity HTTP endpoints.
pub mod health;

/// Prometheus metrics instrumentation.
pub mod metrics;

/// Logging and OpenTelemetry tracing integration.
pub mod telemetry;
