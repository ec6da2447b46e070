//! Authenticator implementation
//!
//! Derives tokens and applies them to outgoing requests.

use super::types::{AuthConfig, Token};
use chrono::{NaiveDate, Utc};
use md5::{Digest, Md5};
use reqwest::RequestBuilder;
use std::sync::Arc;

/// Source of the token placed on each request
pub trait TokenProvider: Send + Sync {
    /// Token valid right now
    fn current_token(&self) -> Token;
}

/// Hash of `{prefix}_{YYYYMMDD}` for a given date
pub fn token_for_date(prefix: &str, date: NaiveDate) -> Token {
    let mut hasher = Md5::new();
    hasher.update(format!("{prefix}_{}", date.format("%Y%m%d")).as_bytes());
    Token::new(format!("{:x}", hasher.finalize()))
}

/// Token derived from the current UTC date
///
/// Recomputed on every call, so it rolls over at UTC midnight.
#[derive(Debug, Clone)]
pub struct DailyTokenProvider {
    prefix: String,
    fixed_date: Option<NaiveDate>,
}

impl DailyTokenProvider {
    /// Create a provider with the given secret prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            fixed_date: None,
        }
    }

    /// Pin the date instead of reading the clock
    #[must_use]
    pub fn at_date(mut self, date: NaiveDate) -> Self {
        self.fixed_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.fixed_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

impl TokenProvider for DailyTokenProvider {
    fn current_token(&self) -> Token {
        token_for_date(&self.prefix, self.today())
    }
}

/// Always the same token
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    /// Create a provider for a fixed token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Token::new(token),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn current_token(&self) -> Token {
        self.token.clone()
    }
}

/// Authenticator handles applying authentication to HTTP requests
#[derive(Clone)]
pub struct Authenticator {
    /// Header to place the token in (None = no auth)
    header: Option<String>,
    /// Token source
    provider: Option<Arc<dyn TokenProvider>>,
}

impl Authenticator {
    /// Build an authenticator from config
    pub fn new(config: &AuthConfig) -> Self {
        match config {
            AuthConfig::None => Self::none(),
            AuthConfig::DailyHash { prefix, header } => {
                Self::with_provider(header.clone(), Arc::new(DailyTokenProvider::new(prefix)))
            }
            AuthConfig::Static { token, header } => {
                Self::with_provider(header.clone(), Arc::new(StaticTokenProvider::new(token)))
            }
        }
    }

    /// Authenticator that adds nothing
    pub fn none() -> Self {
        Self {
            header: None,
            provider: None,
        }
    }

    /// Authenticator with a custom token source
    pub fn with_provider(header: impl Into<String>, provider: Arc<dyn TokenProvider>) -> Self {
        Self {
            header: Some(header.into()),
            provider: Some(provider),
        }
    }

    /// Compute the token for this moment, if any
    pub fn current_token(&self) -> Option<Token> {
        self.provider.as_ref().map(|p| p.current_token())
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match (&self.header, self.current_token()) {
            (Some(header), Some(token)) => req.header(header.as_str(), token.as_str()),
            _ => req,
        }
    }
}

impl Default for Authenticator {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("header", &self.header)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}
