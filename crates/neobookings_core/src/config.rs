//! Configuration for the Neobookings gateway
//!
//! Values resolve in three layers: built-in defaults, an optional TOML file,
//! then `NEO_*` environment variables. The resolved configuration is read
//! once at startup and shared read-only afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

use crate::envelope::Language;

pub const DEFAULT_CLIENT_CODE: &str = "neo";
pub const DEFAULT_SYSTEM_CODE: &str = "XML";
pub const DEFAULT_USERNAME: &str = "neomcp";
pub const DEFAULT_PASSWORD: &str = "ECtIOnSPhepO";
pub const DEFAULT_BASE_URL: &str = "https://ws-test.neobookings.com/api/v2";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const REDACTED: &str = "********";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file")]
    #[diagnostic(
        code(neobookings::config::io),
        help("Check that {path} exists and is readable")
    )]
    Io {
        path: String,
        #[source]
        cause: std::io::Error,
    },

    #[error("Failed to parse configuration file")]
    #[diagnostic(
        code(neobookings::config::parse),
        help("{path} must be valid TOML matching the configuration layout")
    )]
    Parse {
        path: String,
        #[source]
        cause: toml::de::Error,
    },

    #[error("Failed to serialize configuration")]
    #[diagnostic(code(neobookings::config::serialize))]
    Serialize {
        #[source]
        cause: toml::ser::Error,
    },

    #[error("Invalid value for {var}")]
    #[diagnostic(
        code(neobookings::config::invalid_env),
        help("{var} was set to '{value}', expected {expected}")
    )]
    InvalidEnv {
        var: String,
        value: String,
        expected: String,
    },

    #[error("Invalid configuration: {field}")]
    #[diagnostic(code(neobookings::config::invalid), help("{reason}"))]
    Invalid { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Upstream account credentials. Never printed in cleartext.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_code: String,
    pub system_code: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// The `Credentials` block of the authentication payload.
    pub fn to_wire(&self) -> Value {
        json!({
            "ClientCode": self.client_code,
            "SystemCode": self.system_code,
            "Username": self.username,
            "Password": self.password,
        })
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            client_code: DEFAULT_CLIENT_CODE.to_string(),
            system_code: DEFAULT_SYSTEM_CODE.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_code", &self.client_code)
            .field("system_code", &self.system_code)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Upstream endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub default_language: Language,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_language: Language::default(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Cross-invocation token reuse. Off unless asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCacheConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_token_ttl")]
    pub ttl_secs: u64,
}

fn default_token_ttl() -> u64 {
    300
}

impl Default for TokenCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_secs: default_token_ttl(),
        }
    }
}

impl TokenCacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Retries for transport-level failures (timeouts, refused connections).
/// HTTP statuses and upstream business errors are never retried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
}

fn default_initial_backoff() -> u64 {
    200
}

fn default_max_backoff() -> u64 {
    5_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (zero based), doubling each time.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let millis = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(millis)
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NeobookingsConfig {
    #[serde(default)]
    pub credentials: Credentials,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub token_cache: TokenCacheConfig,

    #[serde(default)]
    pub retry: RetryPolicy,
}

impl NeobookingsConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay `NEO_*` variables resolved through `lookup`.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = lookup("NEO_CLIENT_CODE") {
            self.credentials.client_code = value;
        }
        if let Some(value) = lookup("NEO_SYSTEM_CODE") {
            self.credentials.system_code = value;
        }
        if let Some(value) = lookup("NEO_USERNAME") {
            self.credentials.username = value;
        }
        if let Some(value) = lookup("NEO_PASSWORD") {
            self.credentials.password = value;
        }
        if let Some(value) = lookup("NEO_API_BASE_URL") {
            self.api.base_url = value;
        }
        if let Some(value) = lookup("NEO_API_TIMEOUT") {
            self.api.timeout_secs = parse_env("NEO_API_TIMEOUT", &value, "a whole number of seconds")?;
        }
        if let Some(value) = lookup("NEO_DEFAULT_LANGUAGE") {
            self.api.default_language =
                value
                    .parse::<Language>()
                    .map_err(|_| ConfigError::InvalidEnv {
                        var: "NEO_DEFAULT_LANGUAGE".to_string(),
                        value: value.clone(),
                        expected: format!("one of {}", Language::codes().join(", ")),
                    })?;
        }
        if let Some(value) = lookup("NEO_TOKEN_CACHE") {
            self.token_cache.enabled = parse_bool("NEO_TOKEN_CACHE", &value)?;
        }
        if let Some(value) = lookup("NEO_TOKEN_TTL") {
            self.token_cache.ttl_secs = parse_env("NEO_TOKEN_TTL", &value, "a whole number of seconds")?;
        }
        if let Some(value) = lookup("NEO_MAX_RETRIES") {
            self.retry.max_retries = parse_env("NEO_MAX_RETRIES", &value, "a non-negative integer")?;
        }
        if let Some(value) = lookup("NEO_RETRY_BACKOFF_MS") {
            self.retry.initial_backoff_ms =
                parse_env("NEO_RETRY_BACKOFF_MS", &value, "a whole number of milliseconds")?;
        }

        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.api.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                field: "api.base_url".to_string(),
                reason: format!("'{}' must start with http:// or https://", url),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "api.timeout_secs".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        let credentials = &self.credentials;
        for (field, value) in [
            ("credentials.client_code", &credentials.client_code),
            ("credentials.system_code", &credentials.system_code),
            ("credentials.username", &credentials.username),
            ("credentials.password", &credentials.password),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: field.to_string(),
                    reason: "value must not be empty".to_string(),
                });
            }
        }
        if self.token_cache.enabled && self.token_cache.ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "token_cache.ttl_secs".to_string(),
                reason: "a zero TTL would never reuse a token; disable the cache instead"
                    .to_string(),
            });
        }
        Ok(())
    }

    /// Copy safe for display: the password is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.credentials.password = REDACTED.to_string();
        copy
    }

    /// Load from a file, overlay the environment and validate.
    pub async fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => load_config(path).await?,
            None => load_config_from_standard_locations().await?,
        };
        let config = base.with_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(var: &str, value: &str, expected: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    })
}

fn parse_bool(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var: var.to_string(),
            value: value.to_string(),
            expected: "true or false".to_string(),
        }),
    }
}

/// Load configuration from a TOML file
pub async fn load_config(path: &Path) -> Result<NeobookingsConfig> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|cause| ConfigError::Io {
            path: path.display().to_string(),
            cause,
        })?;

    toml::from_str(&content).map_err(|cause| ConfigError::Parse {
        path: path.display().to_string(),
        cause,
    })
}

/// Save configuration to a TOML file
pub async fn save_config(config: &NeobookingsConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|cause| ConfigError::Io {
                    path: parent.display().to_string(),
                    cause,
                })?;
        }
    }

    let content = toml::to_string_pretty(config).map_err(|cause| ConfigError::Serialize { cause })?;

    tokio::fs::write(path, content)
        .await
        .map_err(|cause| ConfigError::Io {
            path: path.display().to_string(),
            cause,
        })
}

/// Standard configuration file locations, most specific first
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // Project-specific config
    paths.push(PathBuf::from("neobookings.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("neobookings").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".neobookings").join("config.toml"));
    }

    paths
}

/// Load configuration from standard locations
pub async fn load_config_from_standard_locations() -> Result<NeobookingsConfig> {
    for path in config_paths() {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            return load_config(&path).await;
        }
    }

    Ok(NeobookingsConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_test_environment() {
        let config = NeobookingsConfig::default();
        assert_eq!(config.credentials.client_code, "neo");
        assert_eq!(config.credentials.system_code, "XML");
        assert_eq!(config.credentials.username, "neomcp");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
        assert!(!config.token_cache.enabled);
        assert_eq!(config.retry.max_retries, 0);
        config.validate().unwrap();
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = NeobookingsConfig::default()
            .with_env_overrides(env(&[
                ("NEO_CLIENT_CODE", "acme"),
                ("NEO_PASSWORD", "hunter2"),
                ("NEO_API_BASE_URL", "http://localhost:9000/api"),
                ("NEO_API_TIMEOUT", "5"),
                ("NEO_DEFAULT_LANGUAGE", "en"),
                ("NEO_TOKEN_CACHE", "true"),
                ("NEO_MAX_RETRIES", "2"),
                ("NEO_USERNAME", "   "),
            ]))
            .unwrap();

        assert_eq!(config.credentials.client_code, "acme");
        assert_eq!(config.credentials.password, "hunter2");
        assert_eq!(config.credentials.username, DEFAULT_USERNAME);
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.api.default_language, Language::En);
        assert!(config.token_cache.enabled);
        assert_eq!(config.retry.max_retries, 2);
    }

    #[test]
    fn invalid_environment_values_are_errors() {
        let error = NeobookingsConfig::default()
            .with_env_overrides(env(&[("NEO_API_TIMEOUT", "soon")]))
            .unwrap_err();
        assert!(matches!(error, ConfigError::InvalidEnv { ref var, .. } if var == "NEO_API_TIMEOUT"));

        let error = NeobookingsConfig::default()
            .with_env_overrides(env(&[("NEO_DEFAULT_LANGUAGE", "klingon")]))
            .unwrap_err();
        assert!(matches!(error, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn validation_rejects_bad_urls_and_timeouts() {
        let mut config = NeobookingsConfig::default();
        config.api.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());

        let mut config = NeobookingsConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn credentials_never_print_the_password() {
        let config = NeobookingsConfig::default();
        let debug = format!("{:?}", config);
        assert!(!debug.contains(DEFAULT_PASSWORD));
        assert_eq!(config.redacted().credentials.password, REDACTED);
    }

    #[test]
    fn endpoint_url_joins_cleanly() {
        let api = ApiConfig {
            base_url: "https://example.com/api/v2/".into(),
            ..ApiConfig::default()
        };
        assert_eq!(
            api.endpoint_url("/BasketCreateRQ"),
            "https://example.com/api/v2/BasketCreateRQ"
        );
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = RetryPolicy {
            max_retries: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 350,
        };
        assert_eq!(policy.backoff_for(0), Duration::from_millis(100));
        assert_eq!(policy.backoff_for(1), Duration::from_millis(200));
        assert_eq!(policy.backoff_for(2), Duration::from_millis(350));
        assert_eq!(policy.backoff_for(80), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn save_then_load_keeps_settings() {
        let path = std::env::temp_dir()
            .join(format!("neobookings-{}", uuid::Uuid::new_v4()))
            .join("config.toml");
        let mut config = NeobookingsConfig::default();
        config.api.timeout_secs = 12;
        config.token_cache.enabled = true;

        save_config(&config, &path).await.unwrap();
        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded, config);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
    }

    #[tokio::test]
    async fn partial_files_fill_in_defaults() {
        let path = std::env::temp_dir().join(format!("neobookings-{}.toml", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "[api]\nbase_url = \"http://localhost:1\"\ntimeout_secs = 3\n")
            .await
            .unwrap();
        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded.api.base_url, "http://localhost:1");
        assert_eq!(loaded.credentials, Credentials::default());
        let _ = tokio::fs::remove_file(&path).await;
    }
}
