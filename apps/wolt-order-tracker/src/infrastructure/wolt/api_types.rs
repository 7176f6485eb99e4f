//! Wolt API request and response envelopes.
//!
//! Each envelope knows how to unwrap itself into the domain type the port
//! returns, so the adapter stays free of payload-shape details.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::FetchError;
use crate::domain::order::{ActiveOrder, OrderDetails};
use crate::domain::venue::VenueDetails;

/// Body of a token refresh request.
#[derive(Serialize)]
pub struct RefreshRequest<'a> {
    /// Current refresh token.
    pub refresh_token: &'a str,
}

/// Response of the active-orders endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveOrdersResponse {
    /// Orders in progress. Missing or `null` means none.
    #[serde(default)]
    pub orders: Option<Vec<Value>>,
}

impl ActiveOrdersResponse {
    /// The active orders. Entries that are not objects are dropped so one
    /// bad element never hides its siblings.
    #[must_use]
    pub fn into_orders(self) -> Vec<ActiveOrder> {
        self.orders
            .unwrap_or_default()
            .iter()
            .filter_map(ActiveOrder::from_entry)
            .collect()
    }
}

/// Response of the order details endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct OrderDetailsResponse {
    /// Details list; only the first element is used.
    #[serde(default)]
    pub order_details: Option<Vec<OrderDetails>>,
}

impl OrderDetailsResponse {
    /// The first details record.
    ///
    /// # Errors
    ///
    /// Returns `DataAbsent` if the list is missing or empty.
    pub fn into_details(self) -> Result<OrderDetails, FetchError> {
        self.order_details
            .and_then(|details| details.into_iter().next())
            .ok_or_else(|| FetchError::DataAbsent("order_details is empty".to_string()))
    }
}

/// Response of the venue endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct VenueResponse {
    /// Current location of the venue object.
    #[serde(default)]
    pub venue: Option<Value>,
    /// Older location of the venue object.
    #[serde(default)]
    pub venue_info: Option<Value>,
}

impl VenueResponse {
    /// The venue object, preferring `venue` over `venue_info`.
    ///
    /// # Errors
    ///
    /// Returns `DataAbsent` if neither key holds a non-empty object.
    pub fn into_details(self) -> Result<VenueDetails, FetchError> {
        let venue = [self.venue, self.venue_info]
            .into_iter()
            .flatten()
            .find(|v| v.as_object().is_some_and(|o| !o.is_empty()))
            .ok_or_else(|| FetchError::DataAbsent("venue is empty".to_string()))?;

        serde_json::from_value(venue).map_err(|e| FetchError::ResponseFormat(e.to_string()))
    }
}

/// Decode a JSON object into an envelope.
///
/// # Errors
///
/// Returns `ResponseFormat` if the value does not match the envelope.
pub fn decode<T: serde::de::DeserializeOwned>(body: Value) -> Result<T, FetchError> {
    serde_json::from_value(body).map_err(|e| FetchError::ResponseFormat(e.to_string()))
}
