//! Pagination types
//!
//! Checkpoints are offsets into the identifier space that mark where each
//! page starts. The discovery scan decides where a new page ends.

use crate::error::{Error, Result};
use crate::types::ProductId;
use serde::Serialize;
use std::collections::HashSet;

/// Default number of unique identifiers per page
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Strictly increasing page start offsets, beginning at `[0]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checkpoints(Vec<u64>);

impl Checkpoints {
    /// Start with the single checkpoint `0`
    pub fn new() -> Self {
        Self(vec![0])
    }

    /// Number of recorded checkpoints
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; there is always the `0` checkpoint
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Offset where page `page` starts
    pub fn get(&self, page: usize) -> Option<u64> {
        self.0.get(page).copied()
    }

    /// Raw length of page `page`, if both of its bounds are known
    pub fn span(&self, page: usize) -> Option<u64> {
        let start = self.get(page)?;
        let end = self.get(page.checked_add(1)?)?;
        Some(end - start)
    }

    /// Last recorded offset
    pub fn last(&self) -> u64 {
        self.0.last().copied().unwrap_or(0)
    }

    /// All offsets
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Append a new boundary; it must be past the last one
    pub fn push(&mut self, offset: u64) -> Result<()> {
        let last = self.last();
        if offset <= last {
            return Err(Error::Other(format!(
                "checkpoint {offset} does not advance past {last}"
            )));
        }
        self.0.push(offset);
        Ok(())
    }
}

impl Default for Checkpoints {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of scanning an over-fetched batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Unique identifiers in first-seen order
    pub ids: Vec<ProductId>,
    /// Raw index where the page ended, `None` if the batch ran out first
    pub stop: Option<usize>,
}

impl ScanOutcome {
    /// Whether the batch ran out before a full page was collected
    pub fn is_exhausted(&self) -> bool {
        self.stop.is_none()
    }
}

/// Collect `page_size` unique identifiers from `raw`
///
/// Stops at the first index where the unique count equals `page_size` and
/// the element differs from the raw element before it, so a page never ends
/// inside a run of identical values.
pub fn scan_page(raw: &[ProductId], page_size: usize) -> ScanOutcome {
    let mut seen = HashSet::new();
    let mut ids = Vec::with_capacity(page_size);

    for (i, id) in raw.iter().enumerate() {
        if seen.insert(id.as_str()) {
            ids.push(id.clone());
        }

        let differs = i == 0 || raw[i - 1] != *id;
        if ids.len() == page_size && differs {
            return ScanOutcome { ids, stop: Some(i) };
        }
    }

    ScanOutcome { ids, stop: None }
}
