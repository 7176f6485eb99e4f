//! Order Discovery
//!
//! Polls the active-orders list and creates one sensor per order id the
//! first time it is seen. Sensors are registered with the host together
//! with an immediate refresh.
//!
//! # Invariants
//!
//! - No two tracked sensors share an order id.
//! - Under [`OrderEvictionPolicy::Never`] the tracked set only grows, even
//!   after an order leaves the active list.
//! - A failed fetch never creates or evicts anything.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use super::sensors::OrderSensor;
use crate::application::ports::{EntityPlatformPort, FetchError, SharedEntity, WoltApiPort};
use crate::domain::order::{ActiveOrder, OrderId};
use crate::infrastructure::metrics;

// =============================================================================
// Eviction Policy
// =============================================================================

/// What happens to sensors whose order left the active list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderEvictionPolicy {
    /// Keep every sensor ever created.
    #[default]
    Never,
    /// Drop sensors for orders missing from a successful active-orders fetch.
    Inactive,
}

impl OrderEvictionPolicy {
    /// Parse a policy name (`never` or `inactive`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "never" => Some(Self::Never),
            "inactive" => Some(Self::Inactive),
            _ => None,
        }
    }

    /// Policy name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::Inactive => "inactive",
        }
    }
}

// =============================================================================
// Poll Results
// =============================================================================

/// Result of one discovery pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollOutcome {
    /// Orders in the fetched list.
    pub fetched: usize,
    /// Orders that got a new sensor.
    pub created: Vec<OrderId>,
    /// Orders whose sensor was removed.
    pub evicted: Vec<OrderId>,
    /// Fetch failure, if the pass produced no data.
    pub error: Option<FetchError>,
}

impl PollOutcome {
    /// Whether the active-orders fetch succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Running record of discovery pass results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollHealth {
    /// Passes attempted.
    pub attempts: u64,
    /// Failed passes since the last success.
    pub consecutive_failures: u32,
    /// Time of the last successful pass.
    pub last_success: Option<DateTime<Utc>>,
    /// Time of the last pass.
    pub last_attempt: Option<DateTime<Utc>>,
    /// Error of the last failed pass.
    pub last_error: Option<String>,
}

impl PollHealth {
    fn record_success(&mut self) {
        let now = Utc::now();
        self.attempts += 1;
        self.consecutive_failures = 0;
        self.last_success = Some(now);
        self.last_attempt = Some(now);
        self.last_error = None;
    }

    fn record_failure(&mut self, error: &FetchError) {
        self.attempts += 1;
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.last_attempt = Some(Utc::now());
        self.last_error = Some(error.to_string());
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Keeps the set of tracked order sensors in step with the active-orders list.
pub struct OrderCoordinator {
    api: Arc<dyn WoltApiPort>,
    platform: Arc<dyn EntityPlatformPort>,
    name: String,
    eviction: OrderEvictionPolicy,
    tracked: Mutex<BTreeMap<OrderId, Arc<OrderSensor>>>,
    health: RwLock<PollHealth>,
}

impl OrderCoordinator {
    /// Create a coordinator. `name` prefixes every sensor's display name.
    #[must_use]
    pub fn new(
        api: Arc<dyn WoltApiPort>,
        platform: Arc<dyn EntityPlatformPort>,
        name: impl Into<String>,
        eviction: OrderEvictionPolicy,
    ) -> Self {
        Self {
            api,
            platform,
            name: name.into(),
            eviction,
            tracked: Mutex::new(BTreeMap::new()),
            health: RwLock::new(PollHealth::default()),
        }
    }

    /// Run one discovery pass.
    pub async fn poll(&self) -> PollOutcome {
        let orders = match self.api.fetch_active_orders().await {
            Ok(orders) => orders,
            Err(e) => {
                // The client already logged the failure.
                tracing::debug!(error = %e, "Active orders unavailable, skipping discovery");
                self.health.write().record_failure(&e);
                return PollOutcome {
                    error: Some(e),
                    ..PollOutcome::default()
                };
            }
        };

        let (created, evicted) = self.reconcile(&orders);

        if !created.is_empty() {
            let entities: Vec<SharedEntity> = created
                .iter()
                .map(|sensor| Arc::clone(sensor) as SharedEntity)
                .collect();
            self.platform.add_entities(entities, true).await;
            metrics::record_orders_discovered(created.len() as u64);
        }

        if !evicted.is_empty() {
            let unique_ids: Vec<String> = evicted.iter().map(OrderId::unique_id).collect();
            self.platform.remove_entities(&unique_ids).await;
            metrics::record_orders_evicted(evicted.len() as u64);
            tracing::info!(count = evicted.len(), "Stopped tracking inactive orders");
        }

        self.health.write().record_success();

        PollOutcome {
            fetched: orders.len(),
            created: created.iter().map(|s| s.order_id().clone()).collect(),
            evicted,
            error: None,
        }
    }

    /// Apply a fetched list to the tracked set, returning new sensors and
    /// evicted ids.
    fn reconcile(&self, orders: &[ActiveOrder]) -> (Vec<Arc<OrderSensor>>, Vec<OrderId>) {
        let mut tracked = self.tracked.lock();
        let mut created = Vec::new();

        for order_id in orders.iter().filter_map(ActiveOrder::id) {
            if tracked.contains_key(&order_id) {
                continue;
            }
            tracing::info!(order_id = %order_id, "Tracking new order");
            let sensor = Arc::new(OrderSensor::new(
                Arc::clone(&self.api),
                order_id.clone(),
                format!("{} {}", self.name, order_id),
            ));
            tracked.insert(order_id, Arc::clone(&sensor));
            created.push(sensor);
        }

        let evicted = match self.eviction {
            OrderEvictionPolicy::Never => Vec::new(),
            OrderEvictionPolicy::Inactive => {
                let active: HashSet<OrderId> = orders.iter().filter_map(ActiveOrder::id).collect();
                let stale: Vec<OrderId> = tracked
                    .keys()
                    .filter(|id| !active.contains(*id))
                    .cloned()
                    .collect();
                for id in &stale {
                    tracked.remove(id);
                }
                stale
            }
        };

        (created, evicted)
    }

    /// Ids of every tracked order.
    #[must_use]
    pub fn tracked_order_ids(&self) -> Vec<OrderId> {
        self.tracked.lock().keys().cloned().collect()
    }

    /// Number of tracked orders.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.tracked.lock().len()
    }

    /// Discovery pass history.
    #[must_use]
    pub fn health(&self) -> PollHealth {
        self.health.read().clone()
    }

    /// Configured eviction policy.
    #[must_use]
    pub const fn eviction(&self) -> OrderEvictionPolicy {
        self.eviction
    }
}
