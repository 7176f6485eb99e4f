//! Wolt client configuration.

use std::time::Duration;

/// Default base URL of the authentication API.
pub const DEFAULT_AUTH_BASE_URL: &str = "https://converse-api.wolt.com";

/// Default base URL of the consumer API.
pub const DEFAULT_CONSUMER_BASE_URL: &str = "https://consumer-api.wolt.com";

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header set of the Wolt web client, sent on every request.
pub const DEFAULT_HEADERS: [(&str, &str); 8] = [
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:138.0) Gecko/20100101 Firefox/138.0",
    ),
    ("Accept", "application/json, text/plain, */*"),
    ("Platform", "Web"),
    ("App-Language", "en"),
    ("ClientVersionNumber", "1.15.28"),
    ("Client-Version", "1.15.28"),
    ("App-Currency-Format", "wqQxLDIzNC41Ng=="),
    ("x-wolt-web-clientid", "76cc0f70-9891-4c90-ab38-e6b5fdab4c02"),
];

/// Header carrying the session id on authenticated requests.
pub const SESSION_ID_HEADER: &str = "w-wolt-session-id";

/// Wolt endpoint URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WoltEndpoints {
    /// Base URL of the authentication API.
    pub auth_base_url: String,
    /// Base URL of the consumer API.
    pub consumer_base_url: String,
}

impl Default for WoltEndpoints {
    fn default() -> Self {
        Self {
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_string(),
            consumer_base_url: DEFAULT_CONSUMER_BASE_URL.to_string(),
        }
    }
}

impl WoltEndpoints {
    /// Point both APIs at the same base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            auth_base_url: base_url.to_string(),
            consumer_base_url: base_url.to_string(),
        }
    }

    /// Token refresh endpoint.
    #[must_use]
    pub fn refresh_url(&self) -> String {
        format!("{}/auth-api/v2/token", trim(&self.auth_base_url))
    }

    /// Active orders endpoint.
    #[must_use]
    pub fn active_orders_url(&self) -> String {
        format!(
            "{}/order-xp/web/v1/pages/orders",
            trim(&self.consumer_base_url)
        )
    }

    /// Details endpoint of one order.
    #[must_use]
    pub fn order_details_url(&self, order_id: &str) -> String {
        format!(
            "{}/order-xp/web/v1/pages/orders/{order_id}",
            trim(&self.consumer_base_url)
        )
    }

    /// Public endpoint of one venue.
    #[must_use]
    pub fn venue_url(&self, slug: &str) -> String {
        format!(
            "{}/order-xp/web/v1/venue/slug/{slug}/dynamic/?selected_delivery_method=homedelivery",
            trim(&self.consumer_base_url)
        )
    }
}

fn trim(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Configuration for the Wolt client.
#[derive(Debug, Clone)]
pub struct WoltClientConfig {
    /// Endpoint URLs.
    pub endpoints: WoltEndpoints,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for WoltClientConfig {
    fn default() -> Self {
        Self {
            endpoints: WoltEndpoints::default(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl WoltClientConfig {
    /// Set the endpoints.
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: WoltEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
