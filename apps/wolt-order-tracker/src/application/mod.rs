//! Application Layer - Port definitions and polling services.
//!
//! This layer holds the sensors, the order discovery loop and the
//! interfaces they use to reach Wolt and the host platform.

/// Port interfaces for the Wolt API and the host platform.
pub mod ports;

/// Sensors, order discovery and the polling timer.
pub mod services;
