//! Common types used throughout the catalog viewer
//!
//! This module contains the product record, the API action names,
//! shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Product identifier as handed out by the API
pub type ProductId = String;

// ============================================================================
// API Actions
// ============================================================================

/// Remote API action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// List identifiers by `offset` and `limit`
    GetIds,
    /// Fetch full records for a list of `ids`
    GetItems,
    /// List identifiers matching `product`, `brand` or `price`
    Filter,
}

impl Action {
    /// Wire name of the action
    pub fn as_str(self) -> &'static str {
        match self {
            Action::GetIds => "get_ids",
            Action::GetItems => "get_items",
            Action::Filter => "filter",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Product Record
// ============================================================================

/// A product record returned by `get_items`
///
/// Only `id` carries meaning for the viewer; the other fields are for display.
/// Fields the API adds beyond these are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identity key
    pub id: ProductId,

    /// Product name
    #[serde(default)]
    pub product: String,

    /// Price
    #[serde(default)]
    pub price: f64,

    /// Brand, often missing
    #[serde(default)]
    pub brand: Option<String>,

    /// Unrecognized fields
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl Product {
    /// Create a product with the display fields set
    pub fn new(
        id: impl Into<ProductId>,
        product: impl Into<String>,
        price: f64,
        brand: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            product: product.into(),
            price,
            brand: brand.map(str::to_string),
            extra: JsonObject::new(),
        }
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Retry immediately
    #[default]
    None,
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    Exponential,
}
