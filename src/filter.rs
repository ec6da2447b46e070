//! Filter query builder
//!
//! Turns search form state into `filter` action params. Empty fields are
//! left out; a form with no fields produces no query at all.

use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimum text length that enables a search
pub const MIN_QUERY_LEN: usize = 3;

/// Search form state as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterForm {
    /// Product name
    #[serde(default)]
    pub product: Option<String>,
    /// Brand
    #[serde(default)]
    pub brand: Option<String>,
    /// Price, as text
    #[serde(default)]
    pub price: Option<String>,
}

impl FilterForm {
    /// Empty form
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the product field
    #[must_use]
    pub fn product(mut self, value: impl Into<String>) -> Self {
        self.product = Some(value.into());
        self
    }

    /// Set the brand field
    #[must_use]
    pub fn brand(mut self, value: impl Into<String>) -> Self {
        self.brand = Some(value.into());
        self
    }

    /// Set the price field
    #[must_use]
    pub fn price(mut self, value: impl Into<String>) -> Self {
        self.price = Some(value.into());
        self
    }

    /// Whether no field is filled in
    pub fn is_empty(&self) -> bool {
        [&self.product, &self.brand, &self.price]
            .into_iter()
            .all(|f| present(f).is_none())
    }

    /// Whether the search button would be enabled
    ///
    /// A text field needs at least `MIN_QUERY_LEN` characters; any price
    /// counts.
    pub fn is_searchable(&self) -> bool {
        let long_enough =
            |f: &Option<String>| present(f).is_some_and(|v| v.chars().count() >= MIN_QUERY_LEN);
        long_enough(&self.product) || long_enough(&self.brand) || present(&self.price).is_some()
    }
}

/// Trimmed non-empty value of a field
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Build `filter` params, or `None` when nothing is set
pub fn build_filter_params(form: &FilterForm) -> Result<Option<JsonObject>> {
    let mut params = JsonObject::new();

    if let Some(product) = present(&form.product) {
        params.insert("product".to_string(), Value::from(product));
    }

    if let Some(brand) = present(&form.brand) {
        params.insert("brand".to_string(), Value::from(brand));
    }

    if let Some(price) = present(&form.price) {
        let parsed: f64 = price
            .parse()
            .map_err(|_| Error::invalid_filter("price", format!("'{price}' is not a number")))?;
        if !parsed.is_finite() {
            return Err(Error::invalid_filter("price", "must be finite"));
        }
        params.insert("price".to_string(), Value::from(parsed));
    }

    if params.is_empty() {
        return Ok(None);
    }
    Ok(Some(params))
}
