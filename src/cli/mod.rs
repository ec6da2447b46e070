//! CLI module
//!
//! Command-line interface for the catalog viewer.
//!
//! # Commands
//!
//! - `page` - Show one page of products
//! - `search` - Filter by product, brand or price
//! - `browse` - Page through the catalog interactively
//! - `token` - Print today's auth token
//! - `serve` - Start HTTP server mode

mod commands;
mod render;
mod runner;
mod server;

pub use commands::{BrowseCommand, Cli, Commands, OutputFormat};
pub use render::{render, render_card, render_cards};
pub use runner::{load_page, Runner};
pub use server::{router, serve};
