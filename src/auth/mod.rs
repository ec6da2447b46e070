//! Authentication module
//!
//! Supports: daily date hash, static token, none
//!
//! The daily token is the MD5 of `{prefix}_{YYYYMMDD}` for the current UTC
//! date and is recomputed for every request.

mod authenticator;
mod types;

pub use authenticator::{
    token_for_date, Authenticator, DailyTokenProvider, StaticTokenProvider, TokenProvider,
};
pub use types::{AuthConfig, Token, DEFAULT_HEADER, DEFAULT_PREFIX};
