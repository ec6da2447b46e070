//! Pagination module
//!
//! Offset pagination over an identifier list that contains duplicates.
//!
//! # Overview
//!
//! The API only offers `offset`/`limit` windows, and the same identifier can
//! appear several times, so a fixed window does not hold a fixed number of
//! unique items. The pager records the offset where each page starts
//! (checkpoints) the first time it is visited, and replays those offsets on
//! later visits.

mod pager;
mod types;

pub use pager::Pager;
pub use types::{scan_page, Checkpoints, ScanOutcome, DEFAULT_PAGE_SIZE};

#[cfg(test)]
mod tests;
