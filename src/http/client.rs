//! HTTP client with retry and rate limiting
//!
//! Sends `{action, params}` envelopes to the catalog endpoint and handles:
//! - Retries on any non-success response or transport failure
//! - Optional retry limit and backoff (unlimited, immediate by default)
//! - Cancellation through a `CancellationToken`
//! - Optional rate limiting

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::auth::Authenticator;
use crate::error::{Error, Result};
use crate::types::{Action, BackoffType, JsonValue};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use url::Url;

/// Default catalog endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.valantis.store:41000/";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Endpoint receiving every request
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries (None = retry forever)
    pub max_retries: Option<u32>,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Type of backoff strategy
    pub backoff_type: BackoffType,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: None,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
            backoff_type: BackoffType::None,
            rate_limit: None,
            default_headers: HashMap::new(),
            user_agent: format!("catalog-viewer/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = Some(retries);
        self
    }

    /// Retry until success
    pub fn unlimited_retries(mut self) -> Self {
        self.config.max_retries = None;
        self
    }

    /// Set backoff configuration
    pub fn backoff(mut self, backoff_type: BackoffType, initial: Duration, max: Duration) -> Self {
        self.config.backoff_type = backoff_type;
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client for the catalog endpoint
pub struct HttpClient {
    client: Client,
    endpoint: Url,
    config: HttpClientConfig,
    authenticator: Authenticator,
    rate_limiter: Option<RateLimiter>,
    cancel: CancellationToken,
}

impl HttpClient {
    /// Create a client without authentication
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Self::with_auth(config, Authenticator::none())
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, authenticator: Authenticator) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            endpoint,
            config,
            authenticator,
            rate_limiter,
            cancel: CancellationToken::new(),
        })
    }

    /// Use an externally owned cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Token that aborts in-flight and future calls when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Endpoint requests are sent to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Send one attempt and decode the `result` payload
    async fn send_once(&self, request: &ApiRequest) -> Result<JsonValue> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        // Wait for rate limiter
        if let Some(ref limiter) = self.rate_limiter {
            tokio::select! {
                () = self.cancel.cancelled() => return Err(Error::Cancelled),
                () = limiter.wait() => {}
            }
        }

        let mut req = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.config.timeout)
            .json(request);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Fresh token per attempt
        req = self.authenticator.apply(req);

        let sent = tokio::select! {
            () = self.cancel.cancelled() => return Err(Error::Cancelled),
            sent = req.send() => sent,
        };

        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                error!(action = %request.action, "Request error: {e}");
                if e.is_timeout() {
                    return Err(Error::Timeout {
                        timeout_ms: self.config.timeout.as_millis() as u64,
                    });
                }
                return Err(Error::Http(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                action = %request.action,
                "Request error with code: {} and text: {}",
                status.as_u16(),
                body
            );
            return Err(Error::http_status(status.as_u16(), body));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!(action = %request.action, "Failed to read response body: {e}");
                return Err(Error::Http(e));
            }
        };

        let envelope: ApiResponse = serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("response is not a JSON envelope: {e}")))?;

        debug!(action = %request.action, "Request succeeded");
        envelope
            .result
            .ok_or_else(|| Error::decode("response has no `result` field"))
    }

    /// Calculate backoff delay for a given attempt
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let delay = match self.config.backoff_type {
            BackoffType::None => Duration::ZERO,
            BackoffType::Constant => self.config.initial_backoff,
            BackoffType::Linear => self
                .config
                .initial_backoff
                .saturating_mul(attempt.saturating_add(1)),
            BackoffType::Exponential => {
                let factor = 2u32.saturating_pow(attempt);
                self.config.initial_backoff.saturating_mul(factor)
            }
        };

        std::cmp::min(delay, self.config.max_backoff)
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn call(&self, action: Action, params: JsonValue) -> Result<JsonValue> {
        let request = ApiRequest { action, params };
        let mut attempt: u32 = 0;

        loop {
            let failure = match self.send_once(&request).await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() => e,
                Err(e) => return Err(e),
            };

            if let Some(max_retries) = self.config.max_retries {
                if attempt >= max_retries {
                    return Err(Error::MaxRetriesExceeded {
                        max_retries,
                        last_error: failure.to_string(),
                    });
                }
            }

            let delay = self.calculate_backoff(attempt);
            attempt = attempt.saturating_add(1);
            debug!(action = %action, attempt, ?delay, "Retrying request");

            if delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::select! {
                    () = self.cancel.cancelled() => return Err(Error::Cancelled),
                    () = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .field("authenticator", &self.authenticator)
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
