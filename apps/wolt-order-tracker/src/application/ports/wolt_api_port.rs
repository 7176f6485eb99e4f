//! Wolt API Port (Driven Port)
//!
//! Interface for fetching order and venue data from Wolt.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::order::{ActiveOrder, OrderDetails, OrderId};
use crate::domain::venue::VenueDetails;

/// Broad failure category of a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network error or timeout.
    Transport,
    /// Error status, non-JSON body or unexpected shape.
    ResponseFormat,
    /// Well-formed response without the requested record.
    DataAbsent,
}

impl FailureKind {
    /// Label used in metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::ResponseFormat => "response_format",
            Self::DataAbsent => "data_absent",
        }
    }
}

/// Reason a fetch produced no data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Connection or protocol failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Request did not complete in time.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Server answered with an error status.
    #[error("unexpected status {status} from {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Body was not JSON or did not have the expected shape.
    #[error("malformed response: {0}")]
    ResponseFormat(String),

    /// Response was well formed but held no matching record.
    #[error("no data: {0}")]
    DataAbsent(String),
}

impl FetchError {
    /// Failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Transport(_) | Self::Timeout(_) => FailureKind::Transport,
            Self::Status { .. } | Self::ResponseFormat(_) => FailureKind::ResponseFormat,
            Self::DataAbsent(_) => FailureKind::DataAbsent,
        }
    }
}

/// Port for reading orders and venues.
///
/// Implementations swallow nothing: every failure is returned as a
/// `FetchError` and callers decide whether it is worth more than a log line.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WoltApiPort: Send + Sync {
    /// Orders currently in progress for the session.
    async fn fetch_active_orders(&self) -> Result<Vec<ActiveOrder>, FetchError>;

    /// Details of a single order.
    async fn fetch_order_details(&self, order_id: &OrderId) -> Result<OrderDetails, FetchError>;

    /// Availability and delivery estimates of a venue.
    async fn fetch_venue_details(&self, slug: &str) -> Result<VenueDetails, FetchError>;
}
