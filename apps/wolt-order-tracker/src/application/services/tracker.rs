//! Tracker Service
//!
//! Startup sequence and the discovery timer.
//!
//! 1. One venue sensor per configured slug, registered with an immediate refresh.
//! 2. A first discovery pass.
//! 3. A discovery pass every `update_interval` and a host refresh of every
//!    entity every `scan_interval`, both from one task, until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

use super::order_discovery::{OrderCoordinator, OrderEvictionPolicy, PollOutcome};
use super::sensors::VenueSensor;
use crate::application::ports::{EntityPlatformPort, SharedEntity, WoltApiPort};

/// Default discovery interval.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Default interval between host refreshes of every entity.
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_secs(30);

/// Settings for the tracker service.
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    /// Display name prefix for every sensor.
    pub name: String,
    /// Venue slugs to track.
    pub venue_slugs: Vec<String>,
    /// Interval between discovery passes.
    pub update_interval: Duration,
    /// Interval between host refreshes of every entity.
    pub scan_interval: Duration,
    /// What to do with sensors of finished orders.
    pub eviction: OrderEvictionPolicy,
}

/// Summary of the startup sequence.
#[derive(Debug, Clone)]
pub struct StartupSummary {
    /// Venue sensors registered.
    pub venues_registered: usize,
    /// Result of the first discovery pass.
    pub first_poll: PollOutcome,
}

/// Owns the order coordinator and drives it on a timer.
pub struct TrackerService {
    api: Arc<dyn WoltApiPort>,
    platform: Arc<dyn EntityPlatformPort>,
    coordinator: Arc<OrderCoordinator>,
    settings: TrackerSettings,
}

impl TrackerService {
    /// Create the service and its order coordinator.
    #[must_use]
    pub fn new(
        api: Arc<dyn WoltApiPort>,
        platform: Arc<dyn EntityPlatformPort>,
        settings: TrackerSettings,
    ) -> Self {
        let coordinator = Arc::new(OrderCoordinator::new(
            Arc::clone(&api),
            Arc::clone(&platform),
            settings.name.clone(),
            settings.eviction,
        ));

        Self {
            api,
            platform,
            coordinator,
            settings,
        }
    }

    /// The order coordinator.
    #[must_use]
    pub fn coordinator(&self) -> Arc<OrderCoordinator> {
        Arc::clone(&self.coordinator)
    }

    /// Register venue sensors and run the first discovery pass.
    pub async fn start(&self) -> StartupSummary {
        let venues_registered = self.register_venues().await;

        let first_poll = self.coordinator.poll().await;
        if self.coordinator.tracked_count() == 0 {
            tracing::info!("No active orders found");
        }

        StartupSummary {
            venues_registered,
            first_poll,
        }
    }

    async fn register_venues(&self) -> usize {
        if self.settings.venue_slugs.is_empty() {
            return 0;
        }

        let venues: Vec<SharedEntity> = self
            .settings
            .venue_slugs
            .iter()
            .map(|slug| {
                Arc::new(VenueSensor::new(
                    Arc::clone(&self.api),
                    slug.clone(),
                    format!("{} {}", self.settings.name, slug),
                )) as SharedEntity
            })
            .collect();

        let added = self.platform.add_entities(venues, true).await;
        tracing::info!(count = added, "Venue sensors registered");
        added
    }

    /// Run discovery every `update_interval` and the host refresh every
    /// `scan_interval` until cancelled.
    ///
    /// Both timers share this task, so a discovery pass never overlaps a
    /// refresh pass. The first ticks fire one interval after the call;
    /// `start` covers the pass at startup.
    pub async fn run(&self, shutdown: CancellationToken) {
        let mut discovery = ticker(self.settings.update_interval);
        let mut refresh = ticker(self.settings.scan_interval);

        tracing::info!(
            update_interval_secs = self.settings.update_interval.as_secs(),
            scan_interval_secs = self.settings.scan_interval.as_secs(),
            "Tracker timers started"
        );

        loop {
            tokio::select! {
                _ = discovery.tick() => {
                    let outcome = self.coordinator.poll().await;
                    tracing::debug!(
                        fetched = outcome.fetched,
                        created = outcome.created.len(),
                        evicted = outcome.evicted.len(),
                        success = outcome.is_success(),
                        "Discovery pass finished"
                    );
                }
                _ = refresh.tick() => {
                    let summary = self.platform.refresh_all().await;
                    tracing::debug!(
                        updated = summary.updated,
                        skipped = summary.skipped,
                        "Entity refresh pass finished"
                    );
                }
                () = shutdown.cancelled() => {
                    tracing::info!("Tracker timers shutting down");
                    break;
                }
            }
        }
    }
}

fn ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
