//! View state handed to the presentation layer

use crate::types::Product;
use serde::Serialize;

/// How the current product list was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewMode {
    /// Browsing pages; `page` is one-based
    Paginated { page: usize },
    /// Results of a filter query, no pagination
    Filtered,
}

/// Everything a renderer needs to draw one screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogView {
    /// Paginated or filtered
    #[serde(flatten)]
    pub mode: ViewMode,
    /// Deduplicated records in display order
    pub products: Vec<Product>,
    /// Previous-page control enabled
    pub can_go_back: bool,
    /// Next-page control enabled
    pub can_go_forward: bool,
    /// Pagination controls shown at all; off for search results
    pub show_pagination: bool,
}

impl CatalogView {
    /// A paginated view
    pub fn paginated(
        page: usize,
        products: Vec<Product>,
        can_go_back: bool,
        can_go_forward: bool,
    ) -> Self {
        Self {
            mode: ViewMode::Paginated { page },
            products,
            can_go_back,
            can_go_forward,
            show_pagination: true,
        }
    }

    /// A filtered view; pagination controls are off
    pub fn filtered(products: Vec<Product>) -> Self {
        Self {
            mode: ViewMode::Filtered,
            products,
            can_go_back: false,
            can_go_forward: false,
            show_pagination: false,
        }
    }

    /// Whether pagination controls are shown at all
    pub fn show_pagination(&self) -> bool {
        self.show_pagination
    }

    /// One-based page number in paginated mode
    pub fn page_number(&self) -> Option<usize> {
        match self.mode {
            ViewMode::Paginated { page } => Some(page),
            ViewMode::Filtered => None,
        }
    }

    /// Whether there is nothing to show
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
