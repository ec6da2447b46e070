//! In-memory catalog API for unit tests

use crate::error::{Error, Result};
use crate::http::Transport;
use crate::types::{Action, JsonValue, Product, ProductId};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Mutex;

/// Serves `get_ids` windows from a fixed list and records every call
#[derive(Debug, Default)]
pub(crate) struct FakeCatalog {
    ids: Vec<ProductId>,
    filter_result: Vec<ProductId>,
    duplicate_items: bool,
    calls: Mutex<Vec<(Action, JsonValue)>>,
}

impl FakeCatalog {
    pub(crate) fn with_ids(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    /// `n` unique identifiers, each repeated `repeat` times in a row
    pub(crate) fn with_runs(n: usize, repeat: usize) -> Self {
        let ids = (0..n)
            .flat_map(|i| std::iter::repeat(format!("id-{i:04}")).take(repeat))
            .collect();
        Self {
            ids,
            ..Self::default()
        }
    }

    pub(crate) fn filter_result(mut self, ids: &[&str]) -> Self {
        self.filter_result = ids.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Answer `get_items` with every record twice
    pub(crate) fn duplicate_items(mut self) -> Self {
        self.duplicate_items = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<(Action, JsonValue)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self, action: Action) -> usize {
        self.calls().iter().filter(|(a, _)| *a == action).count()
    }

    pub(crate) fn product_for(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), 1000.0, Some("Acme"))
    }
}

#[async_trait]
impl Transport for FakeCatalog {
    async fn call(&self, action: Action, params: JsonValue) -> Result<JsonValue> {
        self.calls.lock().unwrap().push((action, params.clone()));

        match action {
            Action::GetIds => {
                let offset = params["offset"].as_u64().unwrap_or(0) as usize;
                let limit = params["limit"].as_u64().unwrap_or(0) as usize;
                let start = offset.min(self.ids.len());
                let end = offset.saturating_add(limit).min(self.ids.len());
                Ok(json!(self.ids[start..end]))
            }
            Action::GetItems => {
                let ids: Vec<ProductId> = serde_json::from_value(params["ids"].clone())
                    .map_err(|e| Error::decode(e.to_string()))?;
                let copies = if self.duplicate_items { 2 } else { 1 };
                let products: Vec<Product> = ids
                    .iter()
                    .flat_map(|id| std::iter::repeat(Self::product_for(id)).take(copies))
                    .collect();
                Ok(serde_json::to_value(products)?)
            }
            Action::Filter => Ok(json!(self.filter_result)),
        }
    }
}
