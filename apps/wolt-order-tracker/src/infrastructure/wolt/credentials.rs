//! Wolt session credentials.
//!
//! The session id is fixed for the lifetime of the client. The access and
//! refresh tokens rotate whenever a refresh response carries new values.

use serde::Deserialize;

/// Session id plus the access/refresh token pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    session_id: String,
    access_token: String,
    refresh_token: String,
}

impl Credentials {
    /// Create new credentials.
    #[must_use]
    pub const fn new(session_id: String, access_token: String, refresh_token: String) -> Self {
        Self {
            session_id,
            access_token,
            refresh_token,
        }
    }

    /// Session id.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Current access token.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Current refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// `Authorization` header value for the current access token.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Replace whichever tokens the response carries.
    pub fn apply(&mut self, tokens: TokenResponse) -> TokenRotation {
        let mut rotation = TokenRotation::default();
        if let Some(access_token) = tokens.access_token {
            self.access_token = access_token;
            rotation.access_token = true;
        }
        if let Some(refresh_token) = tokens.refresh_token {
            self.refresh_token = refresh_token;
            rotation.refresh_token = true;
        }
        rotation
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("session_id", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Body of a token refresh response.
#[derive(Clone, Default, Deserialize)]
pub struct TokenResponse {
    /// New access token.
    #[serde(default)]
    pub access_token: Option<String>,
    /// New refresh token.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Which tokens a refresh replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenRotation {
    /// Access token was replaced.
    pub access_token: bool,
    /// Refresh token was replaced.
    pub refresh_token: bool,
}

impl TokenRotation {
    /// Whether the response replaced neither token.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !self.access_token && !self.refresh_token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("session".into(), "access-1".into(), "refresh-1".into())
    }

    #[test]
    fn access_token_only_keeps_refresh_token() {
        let mut creds = credentials();
        let rotation = creds.apply(TokenResponse {
            access_token: Some("access-2".into()),
            refresh_token: None,
        });

        assert_eq!(
            rotation,
            TokenRotation {
                access_token: true,
                refresh_token: false
            }
        );
        assert_eq!(creds.access_token(), "access-2");
        assert_eq!(creds.refresh_token(), "refresh-1");
        assert_eq!(creds.session_id(), "session");
    }

    #[test]
    fn both_tokens_rotate() {
        let mut creds = credentials();
        let rotation = creds.apply(TokenResponse {
            access_token: Some("access-2".into()),
            refresh_token: Some("refresh-2".into()),
        });

        assert!(rotation.access_token && rotation.refresh_token);
        assert_eq!(creds.bearer(), "Bearer access-2");
        assert_eq!(creds.refresh_token(), "refresh-2");
    }

    #[test]
    fn empty_response_changes_nothing() {
        let mut creds = credentials();
        let rotation = creds.apply(TokenResponse::default());

        assert_eq!(rotation, TokenRotation::default());
        assert_eq!(creds, credentials());
    }

    #[test]
    fn token_response_ignores_extra_fields() {
        let tokens: TokenResponse = serde_json::from_str(
            r#"{"access_token": "a", "expires_in": 1800, "token_type": "Bearer"}"#,
        )
        .unwrap();
        assert_eq!(tokens.access_token.as_deref(), Some("a"));
        assert!(tokens.refresh_token.is_none());
    }

    #[test]
    fn empty_rotation() {
        let mut creds = credentials();
        assert!(creds.apply(TokenResponse::default()).is_empty());
        let rotation = creds.apply(TokenResponse {
            access_token: Some("access-2".into()),
            refresh_token: None,
        });
        assert!(!rotation.is_empty());
    }

    #[test]
    fn credentials_redacted_debug() {
        let creds = Credentials::new("sess-XYZ".into(), "tok-XYZ".into(), "ref-XYZ".into());
        let debug = format!("{creds:?}");
        assert!(!debug.contains("sess-XYZ"));
        assert!(!debug.contains("tok-XYZ"));
        assert!(!debug.contains("ref-XYZ"));
        assert!(debug.contains("[REDACTED]"));
    }
}
