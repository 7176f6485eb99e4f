//! Tracker Configuration Settings
//!
//! Three ways in, one validation path:
//!
//! - a flat string mapping, as handed over by a setup form
//! - `WOLT_*` environment variables
//! - a YAML document with `${VAR}` / `${VAR:-default}` interpolation
//!
//! Each source is first turned into a `RawConfig`, then validated into a
//! [`TrackerConfig`].

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use serde::Deserialize;

use crate::application::services::{
    DEFAULT_SCAN_INTERVAL, DEFAULT_UPDATE_INTERVAL, OrderEvictionPolicy, TrackerSettings,
};
use crate::infrastructure::wolt::{
    Credentials, DEFAULT_REQUEST_TIMEOUT, WoltClientConfig, WoltEndpoints,
};

/// Display name used when none is configured.
pub const DEFAULT_NAME: &str = "Wolt Order";

/// Default health server port.
pub const DEFAULT_HEALTH_PORT: u16 = 8083;

// =============================================================================
// Settings
// =============================================================================

/// Polling cadence and request settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingSettings {
    /// Interval between discovery passes.
    pub update_interval: Duration,
    /// Interval between entity refreshes.
    pub scan_interval: Duration,
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// What to do with sensors of finished orders.
    pub eviction: OrderEvictionPolicy,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            update_interval: DEFAULT_UPDATE_INTERVAL,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            eviction: OrderEvictionPolicy::default(),
        }
    }
}

/// Server port settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Health check HTTP port.
    pub health_port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            health_port: DEFAULT_HEALTH_PORT,
        }
    }
}

/// Complete tracker configuration.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Display name prefix for every sensor.
    pub name: String,
    /// Session credentials.
    pub credentials: Credentials,
    /// Venue slugs to track.
    pub venue_slugs: Vec<String>,
    /// Polling settings.
    pub polling: PollingSettings,
    /// API base URLs.
    pub endpoints: WoltEndpoints,
    /// Server port settings.
    pub server: ServerSettings,
}

impl TrackerConfig {
    /// Create configuration from a flat mapping.
    ///
    /// Recognised keys: `session_id`, `bearer_token`, `refresh_token`,
    /// `name` and `venue_ids` (newline- or comma-delimited).
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing or empty.
    pub fn from_mapping(mapping: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| mapping.get(key).cloned();
        RawConfig {
            session_id: get("session_id"),
            bearer_token: get("bearer_token"),
            refresh_token: get("refresh_token"),
            name: get("name"),
            venue_ids: get("venue_ids").map(VenueIds::Text),
            ..RawConfig::default()
        }
        .validate()
    }

    /// Create configuration from setup data plus later option overrides.
    ///
    /// Any non-blank key in `options` replaces the same key in `data`, so
    /// venues or credentials can be changed without repeating the setup.
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::from_mapping`].
    pub fn from_entry(
        data: &BTreeMap<String, String>,
        options: &BTreeMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let merged: BTreeMap<String, String> = data
            .iter()
            .chain(options.iter().filter(|(_, value)| !value.trim().is_empty()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self::from_mapping(&merged)
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing or empty, or a tuning
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from any variable lookup.
    ///
    /// # Errors
    ///
    /// See [`TrackerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        RawConfig {
            session_id: lookup("WOLT_SESSION_ID"),
            bearer_token: lookup("WOLT_BEARER_TOKEN"),
            refresh_token: lookup("WOLT_REFRESH_TOKEN"),
            name: lookup("WOLT_NAME"),
            venue_ids: lookup("WOLT_VENUE_IDS").map(VenueIds::Text),
            polling: RawPolling {
                update_interval_secs: parse_var(&lookup, "WOLT_UPDATE_INTERVAL_SECS")?,
                scan_interval_secs: parse_var(&lookup, "WOLT_SCAN_INTERVAL_SECS")?,
                request_timeout_secs: parse_var(&lookup, "WOLT_REQUEST_TIMEOUT_SECS")?,
                order_eviction: lookup("WOLT_ORDER_EVICTION"),
            },
            endpoints: RawEndpoints {
                auth_base_url: lookup("WOLT_AUTH_BASE_URL"),
                consumer_base_url: lookup("WOLT_CONSUMER_BASE_URL"),
            },
            server: RawServer {
                health_port: parse_var(&lookup, "WOLT_HEALTH_PORT")?,
            },
        }
        .validate()
    }

    /// Create configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed or validated.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let interpolated = interpolate_env_vars(yaml);
        let raw: RawConfig = serde_yaml_bw::from_str(&interpolated)?;
        raw.validate()
    }

    /// Settings for the tracker service.
    #[must_use]
    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            name: self.name.clone(),
            venue_slugs: self.venue_slugs.clone(),
            update_interval: self.polling.update_interval,
            scan_interval: self.polling.scan_interval,
            eviction: self.polling.eviction,
        }
    }

    /// Settings for the Wolt client.
    #[must_use]
    pub fn client_config(&self) -> WoltClientConfig {
        WoltClientConfig::default()
            .with_endpoints(self.endpoints.clone())
            .with_timeout(self.polling.request_timeout)
    }
}

/// Load configuration from a YAML file.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: &str) -> Result<TrackerConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;
    TrackerConfig::from_yaml_str(&contents)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required value is missing.
    #[error("missing required value: {0}")]
    MissingValue(String),

    /// Required value is empty.
    #[error("value {0} cannot be empty")]
    EmptyValue(String),

    /// Value is present but unusable.
    #[error("invalid value for {key}: {reason}")]
    Invalid {
        /// Offending key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),
}

// =============================================================================
// Raw Configuration
// =============================================================================

/// Venue slugs as a YAML list or a delimited string.
#[derive(Deserialize)]
#[serde(untagged)]
enum VenueIds {
    List(Vec<String>),
    Text(String),
}

impl VenueIds {
    fn into_slugs(self) -> Vec<String> {
        match self {
            Self::List(items) => normalize_slugs(items.iter().map(String::as_str)),
            Self::Text(text) => parse_venue_ids(&text),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    session_id: Option<String>,
    bearer_token: Option<String>,
    refresh_token: Option<String>,
    name: Option<String>,
    venue_ids: Option<VenueIds>,
    polling: RawPolling,
    endpoints: RawEndpoints,
    server: RawServer,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawPolling {
    update_interval_secs: Option<u64>,
    scan_interval_secs: Option<u64>,
    request_timeout_secs: Option<u64>,
    order_eviction: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawEndpoints {
    auth_base_url: Option<String>,
    consumer_base_url: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawServer {
    health_port: Option<u16>,
}

impl RawConfig {
    fn validate(self) -> Result<TrackerConfig, ConfigError> {
        let credentials = Credentials::new(
            required("session_id", self.session_id)?,
            required("bearer_token", self.bearer_token)?,
            required("refresh_token", self.refresh_token)?,
        );

        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NAME.to_string());

        let venue_slugs = self.venue_ids.map(VenueIds::into_slugs).unwrap_or_default();

        let defaults = PollingSettings::default();
        let eviction = match self.polling.order_eviction.as_deref().map(str::trim) {
            None | Some("") => defaults.eviction,
            Some(value) => OrderEvictionPolicy::parse(value).ok_or_else(|| ConfigError::Invalid {
                key: "order_eviction".to_string(),
                reason: format!("expected 'never' or 'inactive', got '{value}'"),
            })?,
        };
        let polling = PollingSettings {
            update_interval: interval(
                "update_interval_secs",
                self.polling.update_interval_secs,
                defaults.update_interval,
            )?,
            scan_interval: interval(
                "scan_interval_secs",
                self.polling.scan_interval_secs,
                defaults.scan_interval,
            )?,
            request_timeout: interval(
                "request_timeout_secs",
                self.polling.request_timeout_secs,
                defaults.request_timeout,
            )?,
            eviction,
        };

        let default_endpoints = WoltEndpoints::default();
        let endpoints = WoltEndpoints {
            auth_base_url: non_blank(self.endpoints.auth_base_url)
                .unwrap_or(default_endpoints.auth_base_url),
            consumer_base_url: non_blank(self.endpoints.consumer_base_url)
                .unwrap_or(default_endpoints.consumer_base_url),
        };

        let server = ServerSettings {
            health_port: self
                .server
                .health_port
                .unwrap_or(ServerSettings::default().health_port),
        };

        Ok(TrackerConfig {
            name,
            credentials,
            venue_slugs,
            polling,
            endpoints,
            server,
        })
    }
}

fn required(key: &str, value: Option<String>) -> Result<String, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue(key.to_string()))?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyValue(key.to_string()));
    }
    Ok(trimmed.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn interval(key: &str, secs: Option<u64>, default: Duration) -> Result<Duration, ConfigError> {
    match secs {
        None => Ok(default),
        Some(0) => Err(ConfigError::Invalid {
            key: key.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Some(secs) => Ok(Duration::from_secs(secs)),
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            value
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Invalid {
                    key: key.to_string(),
                    reason: format!("'{value}' is not a valid number"),
                })
        }
        _ => Ok(None),
    }
}

/// Split a newline- or comma-delimited list of venue slugs.
///
/// Entries are trimmed; blanks and repeats are dropped.
#[must_use]
pub fn parse_venue_ids(text: &str) -> Vec<String> {
    normalize_slugs(text.split(['\n', ',']))
}

fn normalize_slugs<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut slugs: Vec<String> = Vec::new();
    for slug in items.map(str::trim).filter(|s| !s.is_empty()) {
        if !slugs.iter().any(|s| s == slug) {
            slugs.push(slug.to_string());
        }
    }
    slugs
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset or empty
/// variables without a default become empty strings.
#[allow(clippy::expect_used)]
fn interpolate_env_vars(input: &str) -> String {
    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |caps: &regex::Captures<'_>| {
        let default_value = caps.get(2).map_or("", |m| m.as_str());
        match caps.get(1).map(|m| std::env::var(m.as_str())) {
            Some(Ok(value)) if !value.is_empty() => value,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn secrets() -> Vec<(&'static str, &'static str)> {
        vec![
            ("session_id", "session"),
            ("bearer_token", "access"),
            ("refresh_token", "refresh"),
        ]
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = mapping(pairs);
        move |key| vars.get(key).cloned()
    }

    const ENV_SECRETS: [(&str, &str); 3] = [
        ("WOLT_SESSION_ID", "session"),
        ("WOLT_BEARER_TOKEN", "access"),
        ("WOLT_REFRESH_TOKEN", "refresh"),
    ];

    #[test_case("a\nb\n", &["a", "b"] ; "newline delimited")]
    #[test_case("a, b,,c", &["a", "b", "c"] ; "comma delimited")]
    #[test_case("  noodle-bar \n\n  ", &["noodle-bar"] ; "trims and drops blanks")]
    #[test_case("a\na", &["a"] ; "drops repeats")]
    #[test_case("", &[] ; "empty")]
    fn venue_id_parsing(input: &str, expected: &[&str]) {
        assert_eq!(parse_venue_ids(input), expected);
    }

    #[test]
    fn mapping_with_defaults() {
        let config = TrackerConfig::from_mapping(&mapping(&secrets())).unwrap();

        assert_eq!(config.name, "Wolt Order");
        assert_eq!(config.credentials.session_id(), "session");
        assert_eq!(config.credentials.access_token(), "access");
        assert_eq!(config.credentials.refresh_token(), "refresh");
        assert!(config.venue_slugs.is_empty());
        assert_eq!(config.polling, PollingSettings::default());
        assert_eq!(config.endpoints, WoltEndpoints::default());
        assert_eq!(config.server.health_port, 8083);
    }

    #[test]
    fn mapping_with_name_and_venues() {
        let mut pairs = secrets();
        pairs.push(("name", "Dinner"));
        pairs.push(("venue_ids", "noodle-bar\npizza-place"));
        let config = TrackerConfig::from_mapping(&mapping(&pairs)).unwrap();

        assert_eq!(config.name, "Dinner");
        assert_eq!(config.venue_slugs, vec!["noodle-bar", "pizza-place"]);

        let settings = config.tracker_settings();
        assert_eq!(settings.name, "Dinner");
        assert_eq!(settings.update_interval, Duration::from_secs(60));
    }

    #[test_case("session_id" ; "session id")]
    #[test_case("bearer_token" ; "bearer token")]
    #[test_case("refresh_token" ; "refresh token")]
    fn mapping_missing_secret(key: &str) {
        let pairs: Vec<_> = secrets().into_iter().filter(|(k, _)| *k != key).collect();
        let err = TrackerConfig::from_mapping(&mapping(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue(k) if k == key));
    }

    #[test]
    fn entry_options_override_venues() {
        let mut data = secrets();
        data.push(("venue_ids", "noodle-bar"));
        let options = mapping(&[("venue_ids", "pizza-place,sushi-spot")]);

        let config = TrackerConfig::from_entry(&mapping(&data), &options).unwrap();

        assert_eq!(config.venue_slugs, vec!["pizza-place", "sushi-spot"]);
        assert_eq!(config.credentials.session_id(), "session");
    }

    #[test]
    fn entry_blank_option_keeps_data() {
        let mut data = secrets();
        data.push(("venue_ids", "noodle-bar"));
        let options = mapping(&[("venue_ids", "  "), ("bearer_token", "")]);

        let config = TrackerConfig::from_entry(&mapping(&data), &options).unwrap();

        assert_eq!(config.venue_slugs, vec!["noodle-bar"]);
        assert_eq!(config.credentials.access_token(), "access");
    }

    #[test]
    fn entry_options_replace_credentials() {
        let options = mapping(&[("bearer_token", "access-new"), ("refresh_token", "refresh-new")]);

        let config = TrackerConfig::from_entry(&mapping(&secrets()), &options).unwrap();

        assert_eq!(config.credentials.session_id(), "session");
        assert_eq!(config.credentials.access_token(), "access-new");
        assert_eq!(config.credentials.refresh_token(), "refresh-new");
    }

    #[test]
    fn entry_options_cannot_supply_missing_data_alone() {
        let err = TrackerConfig::from_entry(&BTreeMap::new(), &mapping(&[("name", "Dinner")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue(k) if k == "session_id"));
    }

    #[test]
    fn mapping_empty_secret() {
        let mut pairs = secrets();
        pairs[1] = ("bearer_token", "   ");
        let err = TrackerConfig::from_mapping(&mapping(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(k) if k == "bearer_token"));
    }

    #[test]
    fn blank_name_falls_back_to_default() {
        let mut pairs = secrets();
        pairs.push(("name", " "));
        let config = TrackerConfig::from_mapping(&mapping(&pairs)).unwrap();
        assert_eq!(config.name, DEFAULT_NAME);
    }

    #[test]
    fn env_with_tuning() {
        let mut pairs = ENV_SECRETS.to_vec();
        pairs.extend([
            ("WOLT_VENUE_IDS", "noodle-bar,pizza-place"),
            ("WOLT_UPDATE_INTERVAL_SECS", "120"),
            ("WOLT_SCAN_INTERVAL_SECS", "15"),
            ("WOLT_REQUEST_TIMEOUT_SECS", "5"),
            ("WOLT_ORDER_EVICTION", "inactive"),
            ("WOLT_CONSUMER_BASE_URL", "http://localhost:9000"),
            ("WOLT_HEALTH_PORT", "9999"),
        ]);
        let config = TrackerConfig::from_lookup(env(&pairs)).unwrap();

        assert_eq!(config.venue_slugs, vec!["noodle-bar", "pizza-place"]);
        assert_eq!(config.polling.update_interval, Duration::from_secs(120));
        assert_eq!(config.polling.scan_interval, Duration::from_secs(15));
        assert_eq!(config.polling.request_timeout, Duration::from_secs(5));
        assert_eq!(config.polling.eviction, OrderEvictionPolicy::Inactive);
        assert_eq!(config.endpoints.consumer_base_url, "http://localhost:9000");
        assert_eq!(config.endpoints.auth_base_url, "https://converse-api.wolt.com");
        assert_eq!(config.server.health_port, 9999);

        let client = config.client_config();
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.endpoints, config.endpoints);
    }

    #[test]
    fn env_missing_secret() {
        let err = TrackerConfig::from_lookup(env(&ENV_SECRETS[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingValue(k) if k == "refresh_token"));
    }

    #[test_case("WOLT_UPDATE_INTERVAL_SECS", "0" ; "zero update interval")]
    #[test_case("WOLT_SCAN_INTERVAL_SECS", "0" ; "zero scan interval")]
    #[test_case("WOLT_REQUEST_TIMEOUT_SECS", "soon" ; "non numeric timeout")]
    #[test_case("WOLT_HEALTH_PORT", "70000" ; "port out of range")]
    #[test_case("WOLT_ORDER_EVICTION", "sometimes" ; "unknown eviction policy")]
    fn env_invalid_tuning(key: &str, value: &str) {
        let mut pairs = ENV_SECRETS.to_vec();
        pairs.push((key, value));
        let err = TrackerConfig::from_lookup(env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
    }

    #[test]
    fn yaml_with_venue_list() {
        let yaml = r"
session_id: session
bearer_token: access
refresh_token: refresh
name: Dinner
venue_ids:
  - noodle-bar
  - ' pizza-place '
polling:
  update_interval_secs: 30
  order_eviction: inactive
server:
  health_port: 8090
";
        let config = TrackerConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.name, "Dinner");
        assert_eq!(config.venue_slugs, vec!["noodle-bar", "pizza-place"]);
        assert_eq!(config.polling.update_interval, Duration::from_secs(30));
        assert_eq!(config.polling.scan_interval, Duration::from_secs(30));
        assert_eq!(config.polling.eviction, OrderEvictionPolicy::Inactive);
        assert_eq!(config.server.health_port, 8090);
    }

    #[test]
    fn yaml_with_venue_string() {
        let yaml = "
session_id: session
bearer_token: access
refresh_token: refresh
venue_ids: |
  noodle-bar
  pizza-place
";
        let config = TrackerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.venue_slugs, vec!["noodle-bar", "pizza-place"]);
    }

    #[test]
    #[allow(clippy::literal_string_with_formatting_args)]
    fn yaml_interpolates_env_defaults() {
        let yaml = "
session_id: ${WOLT_TRACKER_TEST_UNSET_SESSION:-from-default}
bearer_token: access
refresh_token: refresh
";
        let config = TrackerConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.credentials.session_id(), "from-default");
    }

    #[test]
    #[allow(clippy::literal_string_with_formatting_args)]
    fn yaml_unset_variable_is_empty() {
        let yaml = "
session_id: session
bearer_token: \"${WOLT_TRACKER_TEST_UNSET_TOKEN}\"
refresh_token: refresh
";
        let err = TrackerConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyValue(k) if k == "bearer_token"));
    }

    #[test]
    fn yaml_parse_error() {
        let err = TrackerConfig::from_yaml_str("session_id: [unterminated").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn load_config_missing_file() {
        let err = load_config("/nonexistent/wolt-tracker.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    #[allow(clippy::literal_string_with_formatting_args)]
    fn interpolation_without_default_becomes_empty() {
        let result = interpolate_env_vars("token: ${WOLT_TRACKER_TEST_UNLIKELY_TO_EXIST}");
        assert_eq!(result, "token: ");
    }

    #[test]
    fn config_debug_redacts_credentials() {
        let config = TrackerConfig::from_mapping(&mapping(&[
            ("session_id", "sess-XYZ"),
            ("bearer_token", "tok-XYZ"),
            ("refresh_token", "ref-XYZ"),
        ]))
        .unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("sess-XYZ"));
        assert!(!debug.contains("tok-XYZ"));
        assert!(!debug.contains("ref-XYZ"));
        assert!(debug.contains("[REDACTED]"));
    }
}
