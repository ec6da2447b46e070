//! HTTP transport module
//!
//! Provides the `Transport` seam and its HTTP implementation.
//!
//! # Features
//!
//! - **Envelope protocol**: `POST {action, params}`, answer in `result`
//! - **Retries**: unlimited by default, optionally bounded with backoff
//! - **Cancellation**: `CancellationToken` aborts a suspended retry loop
//! - **Rate Limiting**: optional token bucket using governor

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, DEFAULT_ENDPOINT};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{decode_ids, ApiRequest, ApiResponse, Transport};
