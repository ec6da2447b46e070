//! Transport seam between the catalog logic and the network
//!
//! Everything above this trait speaks in actions and JSON params; only the
//! HTTP client knows about envelopes, headers and retries.

use crate::error::{Error, Result};
use crate::types::{Action, JsonValue, Product, ProductId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Request body sent to the endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Action name
    pub action: Action,
    /// Action parameters
    pub params: JsonValue,
}

/// Response envelope returned by the endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    /// Payload
    pub result: Option<JsonValue>,
}

/// A single logical request/response operation against the catalog API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `action` with `params` and return the decoded `result` payload
    async fn call(&self, action: Action, params: JsonValue) -> Result<JsonValue>;

    /// `get_ids` for a window of the identifier space
    async fn get_ids(&self, offset: u64, limit: u64) -> Result<Vec<ProductId>> {
        let result = self
            .call(Action::GetIds, json!({ "offset": offset, "limit": limit }))
            .await?;
        decode_ids(result)
    }

    /// `get_items` for a list of identifiers
    async fn get_items(&self, ids: &[ProductId]) -> Result<Vec<Product>> {
        let result = self.call(Action::GetItems, json!({ "ids": ids })).await?;
        serde_json::from_value(result)
            .map_err(|e| Error::decode(format!("get_items result is not a product list: {e}")))
    }

    /// `filter` with prebuilt params
    async fn filter(&self, params: JsonValue) -> Result<Vec<ProductId>> {
        let result = self.call(Action::Filter, params).await?;
        decode_ids(result)
    }
}

/// Decode an identifier list payload
pub fn decode_ids(result: JsonValue) -> Result<Vec<ProductId>> {
    serde_json::from_value(result)
        .map_err(|e| Error::decode(format!("result is not an identifier list: {e}")))
}
