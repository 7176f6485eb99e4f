//! Wolt API Adapter
//!
//! Implements [`WoltApiPort`] over the Wolt web APIs.
//!
//! Authenticated calls refresh the access token first. A failed refresh is
//! logged and the call goes ahead with the current token, which Wolt will
//! reject if it has expired.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::api_types::{
    ActiveOrdersResponse, OrderDetailsResponse, RefreshRequest, VenueResponse, decode,
};
use super::config::{WoltClientConfig, WoltEndpoints};
use super::credentials::{Credentials, TokenResponse, TokenRotation};
use super::http_client::{AuthHeaders, WoltHttpClient};
use crate::application::ports::{FetchError, WoltApiPort};
use crate::domain::order::{ActiveOrder, OrderDetails, OrderId};
use crate::domain::venue::VenueDetails;
use crate::infrastructure::metrics::{self, Endpoint};

/// Wolt API client holding the session credentials.
#[derive(Debug)]
pub struct WoltClient {
    http: WoltHttpClient,
    endpoints: WoltEndpoints,
    credentials: RwLock<Credentials>,
}

impl WoltClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the HTTP client cannot be built.
    pub fn new(config: &WoltClientConfig, credentials: Credentials) -> Result<Self, FetchError> {
        Ok(Self {
            http: WoltHttpClient::new(config.timeout)?,
            endpoints: config.endpoints.clone(),
            credentials: RwLock::new(credentials),
        })
    }

    /// Copy of the current credentials.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    /// Exchange the refresh token for new tokens.
    ///
    /// Credentials are only touched when the response parses; whichever
    /// tokens it carries replace the stored ones.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure. Credentials are unchanged in that case.
    pub async fn refresh_token(&self) -> Result<TokenRotation, FetchError> {
        let refresh_token = self.credentials.read().refresh_token().to_string();
        let request = RefreshRequest {
            refresh_token: &refresh_token,
        };

        let result = self
            .http
            .post_json(Endpoint::TokenRefresh, &self.endpoints.refresh_url(), &request)
            .await
            .and_then(decode::<TokenResponse>);

        match result {
            Ok(tokens) => {
                let rotation = self.credentials.write().apply(tokens);
                if rotation.is_empty() {
                    metrics::record_token_refresh("no_tokens");
                    tracing::warn!("Token refresh returned no tokens, keeping current tokens");
                } else {
                    metrics::record_token_refresh("success");
                    tracing::debug!(
                        access_token_rotated = rotation.access_token,
                        refresh_token_rotated = rotation.refresh_token,
                        "Token refreshed"
                    );
                }
                Ok(rotation)
            }
            Err(e) => {
                metrics::record_token_refresh(e.kind().as_str());
                tracing::error!(error = %e, "Token refresh failed, keeping current tokens");
                Err(e)
            }
        }
    }

    /// Refresh, then build auth headers from whatever tokens are current.
    async fn auth_headers(&self) -> AuthHeaders {
        // Failure is already logged; the request proceeds with the old token.
        let _ = self.refresh_token().await;
        AuthHeaders::from_credentials(&self.credentials.read())
    }
}

#[async_trait]
impl WoltApiPort for WoltClient {
    async fn fetch_active_orders(&self) -> Result<Vec<ActiveOrder>, FetchError> {
        let auth = self.auth_headers().await;
        let body = self
            .http
            .get_json(
                Endpoint::ActiveOrders,
                &self.endpoints.active_orders_url(),
                Some(&auth),
            )
            .await?;

        Ok(decode::<ActiveOrdersResponse>(body)?.into_orders())
    }

    async fn fetch_order_details(&self, order_id: &OrderId) -> Result<OrderDetails, FetchError> {
        let auth = self.auth_headers().await;
        let body = self
            .http
            .get_json(
                Endpoint::OrderDetails,
                &self.endpoints.order_details_url(order_id.as_str()),
                Some(&auth),
            )
            .await?;

        decode::<OrderDetailsResponse>(body)?.into_details()
    }

    async fn fetch_venue_details(&self, slug: &str) -> Result<VenueDetails, FetchError> {
        let body = self
            .http
            .get_json(Endpoint::VenueDetails, &self.endpoints.venue_url(slug), None)
            .await?;

        decode::<VenueResponse>(body)?.into_details()
    }
}
