//! HTTP server mode exposing the catalog entry points as JSON
//!
//! One catalog is shared by all clients and guarded by a mutex, so page
//! loads run one at a time.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::{Catalog, CatalogView};
use crate::error::{Error, Result};
use crate::filter::FilterForm;
use crate::http::Transport;

/// App state shared across handlers
struct AppState<T> {
    catalog: Mutex<Catalog<T>>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct JsonEnvelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> JsonEnvelope<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonEnvelope<()> {
    fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the router around a catalog
pub fn router<T: Transport + 'static>(catalog: Catalog<T>) -> Router {
    let state = Arc::new(AppState {
        catalog: Mutex::new(catalog),
    });

    // Browser front ends call this from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/page", get(current_page::<T>))
        .route("/page/next", post(next_page::<T>))
        .route("/page/prev", post(previous_page::<T>))
        .route("/search", post(search::<T>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server
pub async fn serve<T: Transport + 'static>(catalog: Catalog<T>, port: u16) -> Result<()> {
    let app = router(catalog);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn current_page<T: Transport + 'static>(State(state): State<Arc<AppState<T>>>) -> Response {
    let mut catalog = state.catalog.lock().await;
    respond(catalog.current_page().await)
}

async fn next_page<T: Transport + 'static>(State(state): State<Arc<AppState<T>>>) -> Response {
    let mut catalog = state.catalog.lock().await;
    respond(catalog.next_page().await)
}

async fn previous_page<T: Transport + 'static>(State(state): State<Arc<AppState<T>>>) -> Response {
    let mut catalog = state.catalog.lock().await;
    respond(catalog.previous_page().await)
}

async fn search<T: Transport + 'static>(
    State(state): State<Arc<AppState<T>>>,
    payload: std::result::Result<Json<FilterForm>, JsonRejection>,
) -> Response {
    let form = match payload {
        Ok(Json(form)) => form,
        Err(rejection) => {
            tracing::warn!("Rejected search body: {}", rejection.body_text());
            let status = rejection.status();
            return (status, Json(JsonEnvelope::error(rejection.body_text()))).into_response();
        }
    };

    let mut catalog = state.catalog.lock().await;
    respond(catalog.search(&form).await)
}

fn respond(result: Result<CatalogView>) -> Response {
    match result {
        Ok(view) => (StatusCode::OK, Json(JsonEnvelope::success(view))).into_response(),
        Err(e) => {
            tracing::warn!("Request failed: {e}");
            let status = match e {
                Error::InvalidFilter { .. } => StatusCode::BAD_REQUEST,
                Error::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(JsonEnvelope::error(e.to_string()))).into_response()
        }
    }
}
