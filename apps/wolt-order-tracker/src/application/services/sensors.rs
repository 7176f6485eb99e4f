//! Order and venue sensors.
//!
//! A sensor owns its state exclusively. A refresh that yields no data logs a
//! warning and keeps whatever was there before; stale-but-present beats
//! cleared.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::application::ports::{SensorEntity, UpdateOutcome, WoltApiPort};
use crate::domain::entity::{
    ATTRIBUTION, Attributes, EntityKind, EntitySnapshot, ORDER_ICON, VENUE_ICON,
};
use crate::domain::order::OrderId;
use crate::domain::venue::venue_unique_id;

#[derive(Debug, Default)]
struct SensorState {
    value: Option<String>,
    attributes: Attributes,
    last_updated: Option<DateTime<Utc>>,
}

impl SensorState {
    fn replace(&mut self, value: Option<String>, attributes: Attributes) {
        self.value = value;
        self.attributes = attributes;
        self.last_updated = Some(Utc::now());
    }
}

// =============================================================================
// Order Sensor
// =============================================================================

/// Sensor tracking the status of one order.
pub struct OrderSensor {
    api: Arc<dyn WoltApiPort>,
    order_id: OrderId,
    unique_id: String,
    name: String,
    state: RwLock<SensorState>,
}

impl OrderSensor {
    /// Create a sensor for an order. State stays empty until the first update.
    #[must_use]
    pub fn new(api: Arc<dyn WoltApiPort>, order_id: OrderId, name: String) -> Self {
        Self {
            api,
            unique_id: order_id.unique_id(),
            order_id,
            name,
            state: RwLock::new(SensorState::default()),
        }
    }

    /// The tracked order.
    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }
}

#[async_trait]
impl SensorEntity for OrderSensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Order
    }

    async fn update(&self) -> UpdateOutcome {
        match self.api.fetch_order_details(&self.order_id).await {
            Ok(details) => {
                let status = details.state();
                self.state
                    .write()
                    .replace(status.clone(), details.attributes());
                tracing::debug!(
                    order_id = %self.order_id,
                    status = ?status,
                    "Order sensor updated"
                );
                UpdateOutcome::Updated
            }
            Err(e) => {
                tracing::warn!(order_id = %self.order_id, error = %e, "Order details not found");
                UpdateOutcome::Skipped
            }
        }
    }

    fn snapshot(&self) -> EntitySnapshot {
        let state = self.state.read();
        EntitySnapshot {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            kind: EntityKind::Order,
            state: state.value.clone(),
            attributes: state.attributes.clone(),
            icon: ORDER_ICON,
            attribution: ATTRIBUTION,
            last_updated: state.last_updated,
        }
    }
}

// =============================================================================
// Venue Sensor
// =============================================================================

/// Sensor tracking whether a venue is open.
pub struct VenueSensor {
    api: Arc<dyn WoltApiPort>,
    slug: String,
    unique_id: String,
    name: String,
    state: RwLock<SensorState>,
}

impl VenueSensor {
    /// Create a sensor for a venue slug.
    #[must_use]
    pub fn new(api: Arc<dyn WoltApiPort>, slug: String, name: String) -> Self {
        Self {
            api,
            unique_id: venue_unique_id(&slug),
            slug,
            name,
            state: RwLock::new(SensorState::default()),
        }
    }

    /// The tracked venue slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

#[async_trait]
impl SensorEntity for VenueSensor {
    fn unique_id(&self) -> &str {
        &self.unique_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Venue
    }

    async fn update(&self) -> UpdateOutcome {
        match self.api.fetch_venue_details(&self.slug).await {
            Ok(details) => {
                let availability = details.availability();
                self.state.write().replace(
                    Some(availability.as_str().to_string()),
                    details.attributes(),
                );
                tracing::debug!(
                    slug = %self.slug,
                    state = availability.as_str(),
                    "Venue sensor updated"
                );
                UpdateOutcome::Updated
            }
            Err(e) => {
                tracing::warn!(slug = %self.slug, error = %e, "Venue details not found");
                UpdateOutcome::Skipped
            }
        }
    }

    fn snapshot(&self) -> EntitySnapshot {
        let state = self.state.read();
        EntitySnapshot {
            unique_id: self.unique_id.clone(),
            name: self.name.clone(),
            kind: EntityKind::Venue,
            state: state.value.clone(),
            attributes: state.attributes.clone(),
            icon: VENUE_ICON,
            attribution: ATTRIBUTION,
            last_updated: state.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::ports::{FetchError, MockWoltApiPort};
    use crate::domain::order::OrderDetails;
    use crate::domain::venue::VenueDetails;

    fn delivering() -> OrderDetails {
        serde_json::from_value(json!({
            "status": "delivering",
            "venue_name": "Noodle Bar",
            "payment_amount": 2450,
            "items": [{"name": "Ramen"}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn order_sensor_starts_empty() {
        let sensor = OrderSensor::new(
            Arc::new(MockWoltApiPort::new()),
            OrderId::new("A1"),
            "Wolt Order A1".to_string(),
        );

        let snapshot = sensor.snapshot();
        assert_eq!(snapshot.unique_id, "wolt_A1");
        assert_eq!(snapshot.name, "Wolt Order A1");
        assert_eq!(snapshot.state, None);
        assert!(snapshot.attributes.is_empty());
        assert_eq!(snapshot.icon, ORDER_ICON);
        assert_eq!(snapshot.attribution, ATTRIBUTION);
        assert!(snapshot.last_updated.is_none());
    }

    #[tokio::test]
    async fn order_sensor_applies_details() {
        let mut api = MockWoltApiPort::new();
        api.expect_fetch_order_details()
            .withf(|id| id.as_str() == "A1")
            .times(1)
            .returning(|_| Ok(delivering()));

        let sensor = OrderSensor::new(Arc::new(api), OrderId::new("A1"), "Wolt Order A1".into());

        assert_eq!(sensor.update().await, UpdateOutcome::Updated);
        let snapshot = sensor.snapshot();
        assert_eq!(snapshot.state.as_deref(), Some("delivering"));
        assert_eq!(snapshot.attributes["venue_name"], json!("Noodle Bar"));
        assert_eq!(snapshot.attributes["items"], json!(["Ramen"]));
        assert!(snapshot.last_updated.is_some());
    }

    #[tokio::test]
    async fn order_sensor_tolerates_unexpected_attribute_types() {
        let mut api = MockWoltApiPort::new();
        api.expect_fetch_order_details().times(1).returning(|_| {
            Ok(serde_json::from_value(json!({
                "status": "delivering",
                "venue_name": {"en": "Noodle Bar"},
                "payment_amount": "24.50"
            }))
            .unwrap())
        });

        let sensor = OrderSensor::new(Arc::new(api), OrderId::new("A1"), "Wolt Order A1".into());

        assert_eq!(sensor.update().await, UpdateOutcome::Updated);
        let snapshot = sensor.snapshot();
        assert_eq!(snapshot.state.as_deref(), Some("delivering"));
        assert_eq!(snapshot.attributes["venue_name"], json!({"en": "Noodle Bar"}));
        assert_eq!(snapshot.attributes["payment_amount"], json!("24.50"));
        assert!(snapshot.last_updated.is_some());
    }

    #[tokio::test]
    async fn order_sensor_keeps_state_when_details_missing() {
        let mut api = MockWoltApiPort::new();
        let mut calls = 0;
        api.expect_fetch_order_details().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(delivering())
            } else {
                Err(FetchError::DataAbsent("order_details".into()))
            }
        });

        let sensor = OrderSensor::new(Arc::new(api), OrderId::new("A1"), "Wolt Order A1".into());
        sensor.update().await;
        let before = sensor.snapshot();

        assert_eq!(sensor.update().await, UpdateOutcome::Skipped);
        assert_eq!(sensor.snapshot(), before);
    }

    #[tokio::test]
    async fn venue_sensor_resolves_open_and_closed() {
        let mut api = MockWoltApiPort::new();
        let mut calls = 0;
        api.expect_fetch_venue_details()
            .withf(|slug| slug == "noodle-bar")
            .times(2)
            .returning(move |_| {
                calls += 1;
                let payload = if calls == 1 {
                    json!({"online": true, "delivery_price": 390})
                } else {
                    json!({"is_open": false})
                };
                Ok(serde_json::from_value::<VenueDetails>(payload).unwrap())
            });

        let sensor = VenueSensor::new(
            Arc::new(api),
            "noodle-bar".to_string(),
            "Wolt Order noodle-bar".to_string(),
        );
        assert_eq!(sensor.unique_id(), "wolt_venue_noodle-bar");

        sensor.update().await;
        let snapshot = sensor.snapshot();
        assert_eq!(snapshot.state.as_deref(), Some("open"));
        assert_eq!(snapshot.attributes["delivery_price"], json!(390));
        assert_eq!(snapshot.icon, VENUE_ICON);

        sensor.update().await;
        assert_eq!(sensor.snapshot().state.as_deref(), Some("closed"));
    }

    #[tokio::test]
    async fn venue_sensor_keeps_state_on_failure() {
        let mut api = MockWoltApiPort::new();
        let mut calls = 0;
        api.expect_fetch_venue_details().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(VenueDetails {
                    online: Some(json!(true)),
                    ..VenueDetails::default()
                })
            } else {
                Err(FetchError::Transport("connection reset".into()))
            }
        });

        let sensor = VenueSensor::new(Arc::new(api), "noodle-bar".into(), "Venue".into());
        sensor.update().await;

        assert_eq!(sensor.update().await, UpdateOutcome::Skipped);
        assert_eq!(sensor.snapshot().state.as_deref(), Some("open"));
    }
}
