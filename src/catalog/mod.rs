//! Catalog facade
//!
//! Ties the pager, the filter builder and the deduplicator to a transport
//! and exposes the entry points a presentation layer calls: current, next
//! and previous page, and search. Each returns a `CatalogView` describing
//! the whole screen, so no UI state lives in here.

mod types;

pub use types::{CatalogView, ViewMode};

use crate::dedup::{dedupe_ids, dedupe_products};
use crate::error::Result;
use crate::filter::{build_filter_params, FilterForm};
use crate::http::Transport;
use crate::pagination::Pager;
use crate::types::{JsonValue, Product, ProductId};
use tracing::{debug, info};

/// Product catalog over a transport
#[derive(Debug)]
pub struct Catalog<T> {
    transport: T,
    pager: Pager,
}

impl<T: Transport> Catalog<T> {
    /// Create a catalog with an existing pager
    pub fn new(transport: T, pager: Pager) -> Self {
        Self { transport, pager }
    }

    /// Create a catalog with a fresh pager
    pub fn with_page_size(transport: T, page_size: usize) -> Result<Self> {
        Ok(Self::new(transport, Pager::new(page_size)?))
    }

    /// Pager state
    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Load the page at the cursor
    pub async fn current_page(&mut self) -> Result<CatalogView> {
        let ids = self.pager.next_identifier_page(&self.transport).await?;
        let products = self.fetch_products(&ids).await?;

        info!(
            page = self.pager.page_number(),
            ids = ids.len(),
            products = products.len(),
            "Loaded page"
        );

        Ok(CatalogView::paginated(
            self.pager.page_number(),
            products,
            self.pager.has_previous(),
            self.pager.has_next(),
        ))
    }

    /// Advance and load
    pub async fn next_page(&mut self) -> Result<CatalogView> {
        self.pager.advance_page();
        self.current_page().await
    }

    /// Retreat (no-op on the first page) and load
    pub async fn previous_page(&mut self) -> Result<CatalogView> {
        self.pager.retreat_page();
        self.current_page().await
    }

    /// Products matching the form, bypassing pagination
    ///
    /// Resets the pager to the first page so leaving search mode starts over.
    pub async fn search(&mut self, form: &FilterForm) -> Result<CatalogView> {
        let ids = self.filtered_ids(form).await?;
        let products = self.fetch_products(&ids).await?;
        info!(matches = products.len(), "Search finished");
        Ok(CatalogView::filtered(products))
    }

    /// Unique identifiers matching the form; empty form sends nothing
    pub async fn filtered_ids(&mut self, form: &FilterForm) -> Result<Vec<ProductId>> {
        self.pager.reset();

        let Some(params) = build_filter_params(form)? else {
            debug!("Empty filter form, skipping request");
            return Ok(Vec::new());
        };

        let ids = self.transport.filter(JsonValue::Object(params)).await?;
        Ok(dedupe_ids(ids))
    }

    /// Records for `ids`, deduplicated by id
    pub async fn fetch_products(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let products = self.transport.get_items(ids).await?;
        let fetched = products.len();
        let products = dedupe_products(products);
        debug!(
            requested = ids.len(),
            fetched,
            unique = products.len(),
            "Fetched products"
        );
        Ok(products)
    }
}
