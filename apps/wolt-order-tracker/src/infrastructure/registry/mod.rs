//! Entity Registry
//!
//! In-process host for sensor entities. Holds every registered entity by
//! unique id, refreshes all of them when asked and serves their snapshots
//! to the HTTP surface.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::RwLock;

use crate::application::ports::{
    EntityPlatformPort, RefreshSummary, SensorEntity, SharedEntity, UpdateOutcome,
};
use crate::domain::entity::{EntityKind, EntitySnapshot};
use crate::infrastructure::metrics;

/// Registered entities keyed by unique id.
#[derive(Default)]
pub struct EntityRegistry {
    entities: RwLock<BTreeMap<String, SharedEntity>>,
}

impl EntityRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Whether no entity is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Number of registered entities of one kind.
    #[must_use]
    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities
            .read()
            .values()
            .filter(|entity| entity.kind() == kind)
            .count()
    }

    fn publish_counts(&self) {
        for kind in [EntityKind::Order, EntityKind::Venue] {
            #[allow(clippy::cast_precision_loss)]
            metrics::set_tracked_entities(kind, self.count(kind) as f64);
        }
    }
}

async fn refresh(entity: &dyn SensorEntity) -> UpdateOutcome {
    let outcome = entity.update().await;
    metrics::record_entity_update(entity.kind(), outcome.as_str());
    outcome
}

#[async_trait]
impl EntityPlatformPort for EntityRegistry {
    async fn add_entities(&self, entities: Vec<SharedEntity>, update_before_add: bool) -> usize {
        let fresh: Vec<SharedEntity> = {
            let registered = self.entities.read();
            entities
                .into_iter()
                .filter(|entity| {
                    let known = registered.contains_key(entity.unique_id());
                    if known {
                        tracing::debug!(
                            unique_id = entity.unique_id(),
                            "Entity already registered, ignoring"
                        );
                    }
                    !known
                })
                .collect()
        };

        if update_before_add {
            join_all(fresh.iter().map(|entity| refresh(entity.as_ref()))).await;
        }

        let added = {
            let mut registered = self.entities.write();
            let mut added = 0;
            for entity in fresh {
                // Another caller may have won the race during the refresh.
                if registered.contains_key(entity.unique_id()) {
                    continue;
                }
                tracing::debug!(
                    unique_id = entity.unique_id(),
                    kind = entity.kind().as_str(),
                    "Entity registered"
                );
                registered.insert(entity.unique_id().to_string(), entity);
                added += 1;
            }
            added
        };

        self.publish_counts();
        added
    }

    async fn refresh_all(&self) -> RefreshSummary {
        let entities: Vec<SharedEntity> = self.entities.read().values().cloned().collect();
        let outcomes = join_all(entities.iter().map(|entity| refresh(entity.as_ref()))).await;

        let updated = outcomes
            .iter()
            .filter(|outcome| **outcome == UpdateOutcome::Updated)
            .count();

        RefreshSummary {
            updated,
            skipped: outcomes.len() - updated,
        }
    }

    async fn remove_entities(&self, unique_ids: &[String]) -> usize {
        let removed = {
            let mut registered = self.entities.write();
            unique_ids
                .iter()
                .filter(|id| registered.remove(id.as_str()).is_some())
                .count()
        };

        self.publish_counts();
        removed
    }

    fn snapshot(&self, unique_id: &str) -> Option<EntitySnapshot> {
        self.entities
            .read()
            .get(unique_id)
            .map(|entity| entity.snapshot())
    }

    fn snapshots(&self) -> Vec<EntitySnapshot> {
        self.entities
            .read()
            .values()
            .map(|entity| entity.snapshot())
            .collect()
    }
}
