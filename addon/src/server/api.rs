//! Addon action endpoints (manifest, directory, item, source).

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};

use twitch_client::TwitchError;
use twitch_client::content::{DirectoryResponse, Item, Source};

use crate::app::SharedState;
use crate::handlers::{self, ActionContext, DirectoryRequest, ItemRequest, SourceRequest};
use crate::manifest::{ADDON_ID, AddonManifest};

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

/// Standard error response.
pub fn err_json(status: u16, message: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(json!({ "error": message })),
    )
}

/// Upstream API errors keep their status and body; transport and decoding
/// failures are a bad gateway.
pub fn map_twitch_error(err: TwitchError) -> (StatusCode, Json<Value>) {
    match err {
        TwitchError::ApiError { status, body } => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            Json(json!({ "error": body })),
        ),
        e @ (TwitchError::Http(_) | TwitchError::Json(_)) => err_json(502, &e.to_string()),
        other => err_json(500, &other.to_string()),
    }
}

fn context() -> ActionContext {
    ActionContext {
        addon_id: ADDON_ID.into(),
    }
}

/// GET /twitch, POST /twitch/addon
pub async fn manifest() -> Json<AddonManifest> {
    Json(AddonManifest::twitch())
}

/// POST /twitch/directory
pub async fn directory(
    State(state): State<SharedState>,
    Json(req): Json<DirectoryRequest>,
) -> ApiResult<DirectoryResponse> {
    handlers::directory(state.client(), req, &context())
        .await
        .map(Json)
        .map_err(map_twitch_error)
}

/// POST /twitch/item
pub async fn item(
    State(state): State<SharedState>,
    Json(req): Json<ItemRequest>,
) -> ApiResult<Item> {
    handlers::item(state.client(), req, &context())
        .await
        .map(Json)
        .map_err(map_twitch_error)
}

/// POST /twitch/source
pub async fn source(Json(req): Json<SourceRequest>) -> ApiResult<Vec<Source>> {
    handlers::source(req, &context())
        .await
        .map(Json)
        .map_err(map_twitch_error)
}
