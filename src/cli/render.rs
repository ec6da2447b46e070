//! Terminal rendering of catalog views

use super::commands::OutputFormat;
use crate::catalog::{CatalogView, ViewMode};
use crate::types::Product;
use std::fmt::Write;

/// Format a view in the requested output format
pub fn render(view: &CatalogView, format: OutputFormat) -> String {
    match format {
        OutputFormat::Cards => render_cards(view),
        OutputFormat::Json => serde_json::to_string(view).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(view).unwrap_or_default(),
    }
}

/// Product cards with a header and the available controls
pub fn render_cards(view: &CatalogView) -> String {
    let mut out = String::new();

    match view.mode {
        ViewMode::Paginated { page } => {
            let _ = writeln!(out, "== Page {page} ==");
        }
        ViewMode::Filtered => {
            let _ = writeln!(out, "== Search results ({}) ==", view.products.len());
        }
    }

    if view.is_empty() {
        out.push_str("No products found\n");
    }

    for product in &view.products {
        out.push('\n');
        out.push_str(&render_card(product));
    }

    if view.show_pagination() {
        let mut controls = Vec::new();
        if view.can_go_back {
            controls.push("[p] prev");
        }
        if view.can_go_forward {
            controls.push("[n] next");
        }
        if !controls.is_empty() {
            let _ = writeln!(out, "\n{}", controls.join("  "));
        }
    }

    out
}

/// One product card
pub fn render_card(product: &Product) -> String {
    format!(
        "{}\n  Price: {}\n  Brand: {}\n  Id: {}\n",
        product.product,
        product.price,
        product.brand.as_deref().unwrap_or("-"),
        product.id
    )
}
