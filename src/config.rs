//! Viewer configuration
//!
//! Loaded from an optional YAML file; every field has a default matching the
//! live catalog API, so an empty file is a valid config.
//!
//! ```yaml
//! endpoint: "https://api.valantis.store:41000/"
//! page_size: 50
//! auth:
//!   type: daily_hash
//!   prefix: Valantis
//!   header: X-Auth
//! http:
//!   timeout_seconds: 30
//!   max_retries: 5        # omit to retry forever
//!   retry_backoff:
//!     type: exponential
//!     initial_ms: 100
//!     max_ms: 60000
//!   rate_limit:
//!     requests_per_second: 5
//! ```

use crate::auth::{AuthConfig, Authenticator};
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClient, HttpClientConfig, RateLimiterConfig, DEFAULT_ENDPOINT};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Catalog API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Unique identifiers per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page_size: default_page_size(),
            auth: AuthConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl ViewerConfig {
    /// Parse and validate YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml reads an empty document as null
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&contents)
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::invalid_config("page_size", "must be at least 1"));
        }
        url::Url::parse(&self.endpoint)
            .map_err(|e| Error::invalid_config("endpoint", e.to_string()))?;
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_config(
                "http.timeout_seconds",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let backoff = &self.http.retry_backoff;
        let mut builder = HttpClientConfig::builder()
            .endpoint(&self.endpoint)
            .timeout(Duration::from_secs(self.http.timeout_seconds))
            .backoff(
                backoff.backoff_type,
                Duration::from_millis(backoff.initial_ms),
                Duration::from_millis(backoff.max_ms),
            );

        builder = match self.http.max_retries {
            Some(retries) => builder.max_retries(retries),
            None => builder.unlimited_retries(),
        };

        builder = match &self.http.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        builder.build()
    }

    /// Authenticated HTTP client
    pub fn http_client(&self) -> Result<HttpClient> {
        HttpClient::with_auth(self.http_client_config(), Authenticator::new(&self.auth))
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries (absent = unlimited)
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Retry backoff configuration
    #[serde(default)]
    pub retry_backoff: BackoffConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: None,
            retry_backoff: BackoffConfig::default(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::None,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = ViewerConfig::from_yaml("").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.endpoint, "https://api.valantis.store:41000/");
        assert_eq!(config.page_size, 50);
        assert!(config.http.max_retries.is_none());
        assert_eq!(config.http.retry_backoff.backoff_type, BackoffType::None);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
endpoint: "http://localhost:8000/"
page_size: 20
auth:
  type: static
  token: "abc"
  header: "X-Key"
http:
  timeout_seconds: 5
  max_retries: 3
  retry_backoff:
    type: exponential
    initial_ms: 50
    max_ms: 1000
  rate_limit:
    requests_per_second: 2
    burst_size: 4
"#;

        let config = ViewerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.page_size, 20);
        assert_eq!(
            config.auth,
            AuthConfig::Static {
                token: "abc".to_string(),
                header: "X-Key".to_string(),
            }
        );

        let http = config.http_client_config();
        assert_eq!(http.endpoint, "http://localhost:8000/");
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.max_retries, Some(3));
        assert_eq!(http.backoff_type, BackoffType::Exponential);
        assert_eq!(http.initial_backoff, Duration::from_millis(50));
        assert_eq!(http.max_backoff, Duration::from_secs(1));
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(2, 4)));
    }

    #[test]
    fn test_default_http_client_config_retries_forever() {
        let http = ViewerConfig::default().http_client_config();
        assert!(http.max_retries.is_none());
        assert_eq!(http.backoff_type, BackoffType::None);
        assert!(http.rate_limit.is_none());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = ViewerConfig::from_yaml("page_size: 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "page_size"));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let err = ViewerConfig::from_yaml("endpoint: \"not a url\"").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "endpoint"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ViewerConfig::from_yaml("page_size: [1, 2").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size: 10").unwrap();

        let config = ViewerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ViewerConfig::from_file(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_http_client_from_config() {
        let client = ViewerConfig::default().http_client().unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "https://api.valantis.store:41000/"
        );
    }
}
