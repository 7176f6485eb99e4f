//! Entity Platform Port (Driven Port)
//!
//! Interface to the host that owns sensor entities and exposes their state.
//! The tracker service decides when the host refreshes them.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entity::{EntityKind, EntitySnapshot};

/// Result of a single entity refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// New state was written.
    Updated,
    /// No data was available; prior state kept.
    Skipped,
}

impl UpdateOutcome {
    /// Label used in metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Updated => "updated",
            Self::Skipped => "skipped",
        }
    }
}

/// Result of one refresh pass over every entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    /// Entities that wrote new state.
    pub updated: usize,
    /// Entities that kept their prior state.
    pub skipped: usize,
}

/// A sensor the host can refresh and render.
#[async_trait]
pub trait SensorEntity: Send + Sync {
    /// Stable unique id.
    fn unique_id(&self) -> &str;

    /// Human readable name.
    fn name(&self) -> &str;

    /// Entity kind.
    fn kind(&self) -> EntityKind;

    /// Refresh state from the upstream API.
    async fn update(&self) -> UpdateOutcome;

    /// Current state.
    fn snapshot(&self) -> EntitySnapshot;
}

/// Shared handle to a sensor entity.
pub type SharedEntity = Arc<dyn SensorEntity>;

/// Port for registering entities with the host.
#[async_trait]
pub trait EntityPlatformPort: Send + Sync {
    /// Register entities, optionally refreshing each one first.
    ///
    /// Entities whose unique id is already registered are ignored. Returns
    /// the number of entities actually added.
    async fn add_entities(&self, entities: Vec<SharedEntity>, update_before_add: bool) -> usize;

    /// Unregister entities by unique id. Returns the number removed.
    async fn remove_entities(&self, unique_ids: &[String]) -> usize;

    /// Refresh every registered entity once.
    async fn refresh_all(&self) -> RefreshSummary;

    /// Snapshot of one entity.
    fn snapshot(&self, unique_id: &str) -> Option<EntitySnapshot>;

    /// Snapshots of every registered entity.
    fn snapshots(&self) -> Vec<EntitySnapshot>;
}
