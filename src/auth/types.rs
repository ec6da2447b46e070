//! Auth configuration types
//!
//! `AuthConfig` is the serializable form loaded from the viewer config;
//! `Token` is the value placed into the auth header.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default secret prefix hashed together with the date
pub const DEFAULT_PREFIX: &str = "Valantis";

/// Default header carrying the token
pub const DEFAULT_HEADER: &str = "X-Auth";

/// Authentication token sent with every request
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Wrap a raw token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the token value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// No authentication header
    None,

    /// MD5 of `{prefix}_{YYYYMMDD}` for the current UTC date
    DailyHash {
        /// Secret prefix
        #[serde(default = "default_prefix")]
        prefix: String,
        /// Header name
        #[serde(default = "default_header")]
        header: String,
    },

    /// Fixed token value
    Static {
        /// The token
        token: String,
        /// Header name
        #[serde(default = "default_header")]
        header: String,
    },
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::DailyHash {
            prefix: default_prefix(),
            header: default_header(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

fn default_header() -> String {
    DEFAULT_HEADER.to_string()
}
