//! Venue Types
//!
//! Venue availability as reported by the public venue endpoint. The payload
//! has changed shape over time, so both `online` and `is_open` are accepted,
//! as are `delivery_time` and `delivery_time_min`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{Attributes, is_truthy};

/// Unique entity id for the sensor tracking a venue.
#[must_use]
pub fn venue_unique_id(slug: &str) -> String {
    format!("wolt_venue_{slug}")
}

/// Whether a venue is currently accepting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueAvailability {
    /// Accepting orders.
    Open,
    /// Not accepting orders.
    Closed,
}

impl VenueAvailability {
    /// Sensor state string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Venue details as returned by the venue endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueDetails {
    /// Current online flag.
    #[serde(default)]
    pub online: Option<Value>,
    /// Older open flag, consulted when `online` is falsy.
    #[serde(default)]
    pub is_open: Option<Value>,
    /// Delivery price.
    #[serde(default)]
    pub delivery_price: Option<Value>,
    /// Delivery time estimate.
    #[serde(default)]
    pub delivery_time: Option<Value>,
    /// Lower bound of the delivery time estimate.
    #[serde(default)]
    pub delivery_time_min: Option<Value>,
    /// Upper bound of the delivery time estimate.
    #[serde(default)]
    pub delivery_time_max: Option<Value>,
}

impl VenueDetails {
    /// Open when either `online` or `is_open` is truthy.
    #[must_use]
    pub fn availability(&self) -> VenueAvailability {
        let flag = |value: &Option<Value>| value.as_ref().is_some_and(is_truthy);
        if flag(&self.online) || flag(&self.is_open) {
            VenueAvailability::Open
        } else {
            VenueAvailability::Closed
        }
    }

    /// Sensor attributes derived from these details.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let delivery_min = self
            .delivery_time
            .clone()
            .filter(|v| !v.is_null())
            .or_else(|| self.delivery_time_min.clone());

        let mut attributes = Attributes::new();
        attributes.insert(
            "delivery_price".into(),
            self.delivery_price.clone().unwrap_or(Value::Null),
        );
        attributes.insert("delivery_time_min".into(), delivery_min.unwrap_or(Value::Null));
        attributes.insert(
            "delivery_time_max".into(),
            self.delivery_time_max.clone().unwrap_or(Value::Null),
        );
        attributes
    }
}
