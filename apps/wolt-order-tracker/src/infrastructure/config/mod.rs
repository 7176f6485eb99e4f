//! Configuration Module
//!
//! Configuration loading for the tracker daemon.

mod settings;

pub use settings::{
    ConfigError, DEFAULT_HEALTH_PORT, DEFAULT_NAME, PollingSettings, ServerSettings,
    TrackerConfig, load_config, parse_venue_ids,
};
