//! HTTP client wrapper for the Wolt APIs.
//!
//! Every request carries the web client's header set. Every failure is
//! logged with its URL, counted, and returned as a [`FetchError`].

use std::time::{Duration, Instant};

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use super::config::{DEFAULT_HEADERS, SESSION_ID_HEADER};
use super::credentials::Credentials;
use crate::application::ports::FetchError;
use crate::infrastructure::metrics::{self, Endpoint};

/// Headers identifying the session on authenticated requests.
#[derive(Clone)]
pub struct AuthHeaders {
    session_id: String,
    authorization: String,
}

impl AuthHeaders {
    /// Build the headers from the current credentials.
    #[must_use]
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self {
            session_id: credentials.session_id().to_string(),
            authorization: credentials.bearer(),
        }
    }
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("session_id", &"[REDACTED]")
            .field("authorization", &"[REDACTED]")
            .finish()
    }
}

/// HTTP client for the Wolt APIs.
#[derive(Debug, Clone)]
pub struct WoltHttpClient {
    client: Client,
    timeout: Duration,
}

impl WoltHttpClient {
    /// Create a client enforcing `timeout` on every request.
    ///
    /// # Errors
    ///
    /// Returns `Transport` if the underlying client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// GET a JSON object. Non-2xx statuses are failures.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, timeout, error status,
    /// or a body that is not a JSON object.
    pub async fn get_json(
        &self,
        endpoint: Endpoint,
        url: &str,
        auth: Option<&AuthHeaders>,
    ) -> Result<Value, FetchError> {
        let mut request = with_default_headers(self.client.get(url));
        if let Some(auth) = auth {
            request = request
                .header(SESSION_ID_HEADER, &auth.session_id)
                .header(AUTHORIZATION, &auth.authorization);
        }
        self.execute(endpoint, url, request, true).await
    }

    /// POST a JSON body and parse the JSON response.
    ///
    /// The response body is parsed whatever the status.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on transport failure, timeout, or a body that
    /// is not a JSON object.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        url: &str,
        body: &B,
    ) -> Result<Value, FetchError> {
        let request = with_default_headers(self.client.post(url)).json(body);
        self.execute(endpoint, url, request, false).await
    }

    async fn execute(
        &self,
        endpoint: Endpoint,
        url: &str,
        request: RequestBuilder,
        require_success: bool,
    ) -> Result<Value, FetchError> {
        let start = Instant::now();
        let result = self.send(url, request, require_success).await;

        let outcome = match &result {
            Ok(_) => "success",
            Err(e) => e.kind().as_str(),
        };
        metrics::record_request(endpoint, outcome, start.elapsed());

        if let Err(e) = &result {
            tracing::error!(
                endpoint = endpoint.as_str(),
                url = %url,
                error = %e,
                "Error requesting Wolt API"
            );
        }
        result
    }

    async fn send(
        &self,
        url: &str,
        request: RequestBuilder,
        require_success: bool,
    ) -> Result<Value, FetchError> {
        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        if require_success && !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response.text().await.map_err(|e| self.transport_error(&e))?;
        let body: Value =
            serde_json::from_str(&text).map_err(|e| FetchError::ResponseFormat(e.to_string()))?;

        if !body.is_object() {
            return Err(FetchError::ResponseFormat(
                "expected a JSON object".to_string(),
            ));
        }
        Ok(body)
    }

    fn transport_error(&self, error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Transport(error.to_string())
        }
    }
}

fn with_default_headers(mut request: RequestBuilder) -> RequestBuilder {
    for (name, value) in DEFAULT_HEADERS {
        request = request.header(name, value);
    }
    request
}
