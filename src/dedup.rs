//! Deduplication by identity key
//!
//! The API hands out repeated identifiers and repeated records. Every helper
//! here keeps the first occurrence and preserves input order.

use crate::types::{Product, ProductId};
use std::collections::HashSet;
use std::hash::Hash;

/// Keep the first item for each key, in input order
pub fn dedupe_by_key<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Unique identifiers by exact value
pub fn dedupe_ids(ids: impl IntoIterator<Item = ProductId>) -> Vec<ProductId> {
    dedupe_by_key(ids, ProductId::clone)
}

/// Unique products by `id`
pub fn dedupe_products(products: impl IntoIterator<Item = Product>) -> Vec<Product> {
    dedupe_by_key(products, |p| p.id.clone())
}
