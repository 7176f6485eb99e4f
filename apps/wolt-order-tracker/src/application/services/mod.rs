//! Application Services
//!
//! - `sensors`: Order and venue sensors refreshed by the host
//! - `order_discovery`: Incremental order discovery and eviction policy
//! - `tracker`: Startup sequence and the discovery and refresh timers

pub mod order_discovery;
pub mod sensors;
pub mod tracker;

pub use order_discovery::{OrderCoordinator, OrderEvictionPolicy, PollHealth, PollOutcome};
pub use sensors::{OrderSensor, VenueSensor};
pub use tracker::{
    DEFAULT_SCAN_INTERVAL, DEFAULT_UPDATE_INTERVAL, StartupSummary, TrackerService,
    TrackerSettings,
};
