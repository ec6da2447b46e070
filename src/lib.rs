// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Catalog Viewer
//!
//! A client for a paginated product catalog API that only exposes raw
//! identifier windows. Identifiers repeat in the backing store, so the
//! viewer discovers page boundaries itself and remembers them, giving
//! stable pages of unique products with back and forward navigation.
//!
//! ## Features
//!
//! - **Daily token auth**: MD5 of `{prefix}_{YYYYMMDD}` in UTC, sent as `X-Auth`
//! - **Retrying transport**: Retry forever by default, or bounded with backoff
//! - **Checkpoint pagination**: Variable-width raw windows, exactly-N unique pages
//! - **Search**: Filter by product name, brand or price
//! - **CLI and HTTP server**: Cards or JSON in the terminal, JSON over HTTP
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use catalog_viewer::{Catalog, ViewerConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ViewerConfig::default();
//!     let mut catalog = Catalog::with_page_size(config.http_client()?, config.page_size)?;
//!
//!     let first = catalog.current_page().await?;
//!     let second = catalog.next_page().await?;
//!     assert!(second.can_go_back);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │           CLI (page / search / browse / serve)           │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────────────────────────────────────────────────┐
//! │  Catalog: current_page  next_page  previous_page  search │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────┬──────────────┬──────────────┬─────────────────┐
//! │  Pager   │   Filter     │    Dedup     │   Transport     │
//! ├──────────┼──────────────┼──────────────┼─────────────────┤
//! │ Checkpts │ Form → params│ First wins   │ HTTP + retries  │
//! │ Scan     │              │              │ Daily token     │
//! └──────────┴──────────────┴──────────────┴─────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Daily token authentication
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Checkpoint pagination over identifier windows
pub mod pagination;

/// Order-preserving deduplication
pub mod dedup;

/// Search form to filter params
pub mod filter;

/// Catalog facade
pub mod catalog;

/// Viewer configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use catalog::{Catalog, CatalogView, ViewMode};
pub use config::ViewerConfig;
pub use error::{Error, Result};
pub use filter::FilterForm;
pub use pagination::Pager;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
