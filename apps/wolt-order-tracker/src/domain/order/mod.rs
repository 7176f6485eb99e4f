//! Order Types
//!
//! Orders are discovered through the active-orders list and refreshed
//! through the per-order details endpoint. Only the fields surfaced as
//! sensor state or attributes are modelled; everything else in the payload
//! is ignored.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{Attributes, is_truthy, state_string};

// =============================================================================
// Order Identifier
// =============================================================================

/// Stable order identifier assigned by Wolt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new order id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unique entity id for the sensor tracking this order.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("wolt_{}", self.0)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Active Orders
// =============================================================================

/// Entry of the active-orders list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActiveOrder {
    /// Raw order identifier. Usually a string, numbers are accepted.
    #[serde(default)]
    pub order_id: Option<Value>,
}

impl ActiveOrder {
    /// Create an entry for the given id.
    #[must_use]
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: Some(Value::String(order_id.into())),
        }
    }

    /// Read an entry out of a raw list element. Non-object elements yield
    /// `None`.
    #[must_use]
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let object = entry.as_object()?;
        Some(Self {
            order_id: object.get("order_id").cloned(),
        })
    }

    /// The order id, if present and truthy.
    #[must_use]
    pub fn id(&self) -> Option<OrderId> {
        let raw = self.order_id.as_ref().filter(|v| is_truthy(v))?;
        match raw {
            Value::String(s) => Some(OrderId::new(s.as_str())),
            Value::Number(n) => Some(OrderId::new(n.to_string())),
            _ => None,
        }
    }
}

// =============================================================================
// Order Details
// =============================================================================

/// Details of a single order as returned by the details endpoint.
///
/// Fields are kept as raw JSON so an unexpected type in one field never
/// discards the rest of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    /// Order status (`received`, `delivering`, `delivered`, ...).
    #[serde(default)]
    pub status: Option<Value>,
    /// Estimated delivery time.
    #[serde(default)]
    pub delivery_eta: Option<Value>,
    /// Estimate shown to the client before the venue accepted the order.
    #[serde(default)]
    pub client_pre_estimate: Option<Value>,
    /// Name of the venue preparing the order.
    #[serde(default)]
    pub venue_name: Option<Value>,
    /// Total paid, in the currency's minor unit.
    #[serde(default)]
    pub payment_amount: Option<Value>,
    /// Ordered items, each an object with an optional `name`.
    #[serde(default)]
    pub items: Option<Value>,
}

impl OrderDetails {
    /// Sensor state, `None` when the status is missing or `null`.
    #[must_use]
    pub fn state(&self) -> Option<String> {
        self.status.as_ref().and_then(state_string)
    }

    /// Item names in order, `null` for items without a name.
    #[must_use]
    pub fn item_names(&self) -> Vec<Value> {
        self.items
            .as_ref()
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|item| item.get("name").cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sensor attributes derived from these details.
    #[must_use]
    pub fn attributes(&self) -> Attributes {
        let mut attributes = Attributes::new();
        attributes.insert("delivery_eta".into(), or_null(self.delivery_eta.as_ref()));
        attributes.insert(
            "client_pre_estimate".into(),
            or_null(self.client_pre_estimate.as_ref()),
        );
        attributes.insert("venue_name".into(), or_null(self.venue_name.as_ref()));
        attributes.insert("payment_amount".into(), or_null(self.payment_amount.as_ref()));
        attributes.insert("items".into(), Value::Array(self.item_names()));
        attributes
    }
}

fn or_null(value: Option<&Value>) -> Value {
    value.cloned().unwrap_or(Value::Null)
}
