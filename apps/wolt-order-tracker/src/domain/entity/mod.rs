//! Entity Snapshot Types
//!
//! The outward view of a sensor: a nullable state string plus an attribute
//! map, keyed by a stable unique id. Snapshots are what the host adapter
//! stores and what the HTTP surface renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Attribution attached to every entity.
pub const ATTRIBUTION: &str = "Data provided by Wolt";

/// Icon hint for order sensors.
pub const ORDER_ICON: &str = "mdi:package-variant";

/// Icon hint for venue sensors.
pub const VENUE_ICON: &str = "mdi:store";

/// Extra state attributes of an entity.
pub type Attributes = Map<String, Value>;

/// Kind of entity exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// An active delivery order.
    Order,
    /// A configured venue.
    Venue,
}

impl EntityKind {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Venue => "venue",
        }
    }
}

/// Point-in-time view of a sensor entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    /// Stable identifier (`wolt_<order_id>` or `wolt_venue_<slug>`).
    pub unique_id: String,
    /// Human readable name.
    pub name: String,
    /// Entity kind.
    pub kind: EntityKind,
    /// Current state, `None` until the first successful refresh.
    pub state: Option<String>,
    /// Extra state attributes.
    pub attributes: Attributes,
    /// Icon hint.
    pub icon: &'static str,
    /// Data attribution.
    pub attribution: &'static str,
    /// Time of the last successful refresh.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Loose truthiness of a payload value: `null`, `false`, zero and empty
/// strings, arrays or objects are false.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Render a payload value as a state string. Strings are used as-is,
/// `null` has no state.
#[must_use]
pub fn state_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
