//! Port Interfaces
//!
//! Contracts between the polling core and the outside world.
//!
//! ## Driven Ports (Outbound)
//!
//! - `WoltApiPort`: Order and venue reads against the Wolt API
//! - `EntityPlatformPort`: Entity registration with the host platform

mod entity_platform_port;
mod wolt_api_port;

pub use entity_platform_port::{
    EntityPlatformPort, RefreshSummary, SensorEntity, SharedEntity, UpdateOutcome,
};
#[cfg(test)]
pub use wolt_api_port::MockWoltApiPort;
pub use wolt_api_port::{FailureKind, FetchError, WoltApiPort};
