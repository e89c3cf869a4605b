//! HTTP API for the kulture node.
//!
//! Every failure answers with `{"error": {"api", "id", "message"}}`.

use crate::error::Error;
use crate::node::NodeState;
use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use kulture_core::{CubeCoord, ErrorEnvelope, Kulture};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type AppState = Arc<RwLock<NodeState>>;

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Kultures
        .route(
            "/api/v1/kulture",
            get(get_without_id)
                .post(create_kulture)
                .delete(delete_without_id),
        )
        .route(
            "/api/v1/kulture/:id",
            get(get_kulture).put(update_kulture).delete(delete_kulture),
        )
        .route("/api/v1/kulture/:id/neighbors", get(get_neighbors))
        // Kluster
        .route("/api/v1/kluster", get(kluster_summary))
        .route("/api/v1/kluster/location", get(get_by_location))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// --- Errors ---

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorEnvelope,
}

/// A failed request: status code plus error envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    envelope: ErrorEnvelope,
}

impl ApiError {
    fn new(status: StatusCode, api: &str, id: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            envelope: ErrorEnvelope::new(api).with_id(id).with_message(message),
        }
    }

    fn bad_request(api: &str, id: &str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, api, id, message)
    }

    fn not_found(api: &str, id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, api, id, "id not found")
    }

    /// Map a node error onto a status code.
    fn from_error(api: &str, id: &str, err: Error) -> Self {
        match err {
            Error::NotFound(_) => Self::not_found(api, id),
            Error::Duplicate(_) => Self::new(StatusCode::CONFLICT, api, id, "duplicate id"),
            Error::Validation(e) => Self::bad_request(api, id, e.to_string()),
            other => {
                tracing::error!(api, id, error = %other, "request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, api, id, other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.envelope,
            }),
        )
            .into_response()
    }
}

// --- Health endpoints ---

async fn health() -> &'static str {
    "OK"
}

// --- Kulture endpoints ---

async fn get_without_id() -> ApiError {
    ApiError::bad_request("GetKulture", "none", "URI did not include id")
}

async fn delete_without_id() -> ApiError {
    ApiError::bad_request("DeleteKulture", "none", "URI did not include id")
}

async fn get_kulture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Kulture>, ApiError> {
    let state = state.read().await;
    match state.storage.fetch_by_id(&id) {
        Ok(Some(kulture)) => Ok(Json(kulture)),
        Ok(None) => Err(ApiError::not_found("GetKulture", &id)),
        Err(e) => Err(ApiError::from_error("GetKulture", &id, e)),
    }
}

/// Parse and validate a request body into a kulture.
fn parse_body(api: &str, body: &[u8], require_hex_plane: bool) -> Result<Kulture, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ApiError::bad_request(api, "none", "request missing JSON body"));
    }

    let record: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(api, "none", format!("request body is not JSON: {e}")))?;
    if record.as_object().is_some_and(|o| o.is_empty()) {
        return Err(ApiError::bad_request(api, "none", "request missing JSON body"));
    }

    let kulture = Kulture::try_from(record).map_err(|e| {
        tracing::warn!(api, error = %e, "rejected invalid kulture");
        ApiError::bad_request(
            api,
            "none",
            format!("request JSON body not a valid kulture: {e}"),
        )
    })?;

    if require_hex_plane && !kulture.location().is_hex_plane() {
        return Err(ApiError::bad_request(
            api,
            kulture.id(),
            format!("location {} is not on the hex plane", kulture.location()),
        ));
    }

    Ok(kulture)
}

async fn create_kulture(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Kulture>), ApiError> {
    const API: &str = "AddKulture";

    let mut state = state.write().await;
    let kulture = parse_body(API, &body, state.config.require_hex_plane)?;

    state
        .storage
        .insert(&kulture)
        .map_err(|e| ApiError::from_error(API, kulture.id(), e))?;

    if let Err(e) = state.kluster.add_kulture(kulture.clone()) {
        tracing::warn!(id = kulture.id(), error = %e, "kluster out of step with storage");
    }

    Ok((StatusCode::CREATED, Json(kulture)))
}

async fn update_kulture(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Kulture>, ApiError> {
    const API: &str = "UpdateKulture";

    let mut state = state.write().await;
    let kulture = parse_body(API, &body, state.config.require_hex_plane)?;
    if kulture.id() != id {
        return Err(ApiError::bad_request(
            API,
            &id,
            format!("body id {} does not match URI id", kulture.id()),
        ));
    }

    state
        .storage
        .update(&kulture)
        .map_err(|e| ApiError::from_error(API, &id, e))?;

    if state.kluster.replace_kulture(kulture.clone()).is_err() {
        tracing::warn!(id = %id, "kluster out of step with storage, adding");
        if let Err(e) = state.kluster.add_kulture(kulture.clone()) {
            tracing::warn!(id = %id, error = %e, "kluster out of step with storage");
        }
    }

    Ok(Json(kulture))
}

async fn delete_kulture(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const API: &str = "DeleteKulture";

    let mut state = state.write().await;
    state
        .storage
        .delete(&id)
        .map_err(|e| ApiError::from_error(API, &id, e))?;

    if let Err(e) = state.kluster.delete_kulture_by_id(&id) {
        tracing::warn!(id = %id, error = %e, "kluster out of step with storage");
    }

    Ok(Json(json!({ "id": id })))
}

// --- Kluster endpoints ---

async fn get_neighbors(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const API: &str = "GetNeighbors";

    let state = state.read().await;
    let neighbors = state
        .kluster
        .get_neighbors(&id)
        .ok_or_else(|| ApiError::not_found(API, &id))?;

    serde_json::to_value(neighbors)
        .map(Json)
        .map_err(|e| ApiError::from_error(API, &id, e.into()))
}

#[derive(Debug, Deserialize)]
struct LocationQuery {
    x: i64,
    y: i64,
    z: i64,
}

async fn get_by_location(
    State(state): State<AppState>,
    query: Result<Query<LocationQuery>, QueryRejection>,
) -> Result<Json<Kulture>, ApiError> {
    const API: &str = "GetByLocation";

    let Query(loc) = query.map_err(|e| ApiError::bad_request(API, "none", e.body_text()))?;
    let location = CubeCoord::new(loc.x, loc.y, loc.z);
    let state = state.read().await;
    state
        .kluster
        .get_by_loc(&location)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(API, &location.to_string()))
}

#[derive(Debug, Serialize)]
struct KlusterSummary {
    count: usize,
    hex_plane_enforced: bool,
}

async fn kluster_summary(State(state): State<AppState>) -> Json<KlusterSummary> {
    let state = state.read().await;
    Json(KlusterSummary {
        count: state.kluster.count(),
        hex_plane_enforced: state.config.require_hex_plane,
    })
}
