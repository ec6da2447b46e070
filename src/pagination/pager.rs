//! Checkpoint pager
//!
//! Pages are discovered lazily. The first visit to a page over-fetches twice
//! the page size and scans for its end, fetching further batches while long
//! runs of repeats keep the page short; later visits replay the recorded
//! boundaries.

use super::types::{scan_page, Checkpoints, DEFAULT_PAGE_SIZE};
use crate::dedup::dedupe_ids;
use crate::error::{Error, Result};
use crate::http::Transport;
use crate::types::ProductId;
use tracing::{debug, info};

/// Offset pager over an identifier space with duplicates
#[derive(Debug, Clone)]
pub struct Pager {
    checkpoints: Checkpoints,
    cursor: usize,
    page_size: usize,
    /// Index of the last page, once a scan has run out of identifiers
    terminal: Option<usize>,
}

impl Pager {
    /// Create a pager; `page_size` must be at least 1
    pub fn new(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_config("page_size", "must be at least 1"));
        }

        Ok(Self {
            checkpoints: Checkpoints::new(),
            cursor: 0,
            page_size,
            terminal: None,
        })
    }

    /// Target number of unique identifiers per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Zero-based page cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// One-based page number for display
    pub fn page_number(&self) -> usize {
        self.cursor + 1
    }

    /// Recorded page boundaries
    pub fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    /// Index of the last page, if known
    pub fn terminal_page(&self) -> Option<usize> {
        self.terminal
    }

    /// Whether the cursor is on or past the last page
    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some_and(|t| self.cursor >= t)
    }

    /// Whether advancing could yield more identifiers
    pub fn has_next(&self) -> bool {
        !self.is_terminal()
    }

    /// Whether retreating would move the cursor
    pub fn has_previous(&self) -> bool {
        self.cursor >= 1
    }

    /// Move to the next page
    pub fn advance_page(&mut self) {
        self.cursor += 1;
    }

    /// Move to the previous page; no-op on the first page
    pub fn retreat_page(&mut self) {
        if self.cursor >= 1 {
            self.cursor -= 1;
        }
    }

    /// Back to the first page
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Identifiers of the page at the cursor
    ///
    /// Known pages fetch exactly their recorded span and may come back
    /// shorter than the page size when the span holds duplicates.
    pub async fn next_identifier_page<T>(&mut self, transport: &T) -> Result<Vec<ProductId>>
    where
        T: Transport + ?Sized,
    {
        // Pages skipped by repeated advances are discovered in order
        while self.checkpoints.len() <= self.cursor {
            if self.beyond_end() {
                break;
            }
            let page = self.checkpoints.len() - 1;
            debug!(page, "Discovering skipped page");
            self.discover(transport, page).await?;
        }

        if self.beyond_end() {
            debug!(cursor = self.cursor, "Cursor is past the last page");
            return Ok(Vec::new());
        }

        if let Some(limit) = self.checkpoints.span(self.cursor) {
            let offset = self.checkpoints.get(self.cursor).unwrap_or_default();
            debug!(page = self.cursor, offset, limit, "Loading known page");
            let raw = transport.get_ids(offset, limit).await?;
            return Ok(dedupe_ids(raw));
        }

        self.discover(transport, self.cursor).await
    }

    /// True when nothing can exist at the cursor
    fn beyond_end(&self) -> bool {
        match self.terminal {
            Some(t) if self.cursor > t => true,
            // Empty last page has no recorded span
            Some(t) if self.cursor == t => self.checkpoints.span(t).is_none(),
            _ => false,
        }
    }

    /// Over-fetch page `page` and record where it ends
    ///
    /// A full batch that still holds fewer than `page_size` unique
    /// identifiers is followed by another batch at the next raw offset.
    /// Only a short batch marks the end of the catalog.
    async fn discover<T>(&mut self, transport: &T, page: usize) -> Result<Vec<ProductId>>
    where
        T: Transport + ?Sized,
    {
        let offset = self
            .checkpoints
            .get(page)
            .ok_or_else(|| Error::Other(format!("no checkpoint for page {page}")))?;
        let limit = (self.page_size as u64).saturating_mul(2);

        let mut raw: Vec<ProductId> = Vec::new();
        loop {
            let at = offset + raw.len() as u64;
            debug!(page, offset = at, limit, "Discovering page");
            let batch = transport.get_ids(at, limit).await?;
            let full = batch.len() as u64 >= limit;
            raw.extend(batch);

            let outcome = scan_page(&raw, self.page_size);
            if let Some(i) = outcome.stop {
                self.checkpoints.push(offset + i as u64 + 1)?;
                return Ok(outcome.ids);
            }

            if !full {
                if !raw.is_empty() {
                    self.checkpoints.push(offset + raw.len() as u64)?;
                }
                info!(
                    page,
                    unique = outcome.ids.len(),
                    "Reached the end of the catalog"
                );
                self.terminal = Some(page);
                return Ok(outcome.ids);
            }

            debug!(
                page,
                raw = raw.len(),
                unique = outcome.ids.len(),
                "Full batch without a full page, fetching more"
            );
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            checkpoints: Checkpoints::new(),
            cursor: 0,
            page_size: DEFAULT_PAGE_SIZE,
            terminal: None,
        }
    }
}
