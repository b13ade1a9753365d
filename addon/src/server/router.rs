use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::api;
use crate::app::SharedState;
use crate::manifest::ADDON_ID;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    let at = |action: &str| format!("/{ADDON_ID}{action}");

    Router::new()
        // --- Core ---
        .route("/health", get(status_handler))
        // --- Addon actions ---
        .route(&at(""), get(api::manifest))
        .route(&at("/addon"), post(api::manifest))
        .route(&at("/directory"), post(api::directory))
        .route(&at("/item"), post(api::item))
        .route(&at("/source"), post(api::source))
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
