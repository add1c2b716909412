//! HTTP API for Probelab.
//!
//! Thin transport over the engine: JSON in, JSON out, permissive CORS
//! for browser clients. All placement logic lives in `probelab-engine`.

use crate::node::SharedState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use probelab_engine::{Error as EngineError, NodeDetail, NodeSummary, Strategy};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

/// Build the API router.
pub fn build_router(state: SharedState) -> Router {
    // CORS layer for browser access
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        // Hash insertion
        .route("/api/hash", post(hash_input))
        // Admin
        .route("/api/reset", post(reset_table))
        // Storage nodes
        .route("/api/storage-nodes", get(list_nodes))
        .route("/api/storage-nodes/:id", get(get_node))
        .layer(cors)
        .with_state(state)
}

// --- Error mapping ---

/// JSON error body returned for all failures.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Engine error wrapped for axum responses.
#[derive(Debug)]
struct ApiError(EngineError);

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            EngineError::NodeNotFound(_) => StatusCode::NOT_FOUND,
            EngineError::EmptyInput
            | EngineError::UnknownStrategy(_)
            | EngineError::TableFull => StatusCode::BAD_REQUEST,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// --- Health endpoint ---

async fn health() -> &'static str {
    "OK"
}

// --- Hash insertion endpoint ---

#[derive(Debug, Deserialize)]
struct HashRequest {
    /// The value to hash and place. Required and non-empty.
    input: Option<String>,
    /// Strategy wire name; defaults to chaining.
    strategy: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HashResponse {
    hash: String,
    location: String,
    collision: bool,
    details: HashDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HashDetails {
    strategy: Strategy,
    original_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    step_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    probe_sequence: Option<usize>,
    storage_node: NodeSummary,
    timestamp: u64,
}

async fn hash_input(
    State(state): State<SharedState>,
    Json(req): Json<HashRequest>,
) -> Result<Json<HashResponse>, ApiError> {
    let input = req.input.unwrap_or_default();
    let strategy = match req.strategy.as_deref() {
        Some(name) => name.parse::<Strategy>()?,
        None => Strategy::default(),
    };

    let mut state = state.write().await;
    let placement = state.table.insert(&input, strategy)?;
    let storage_node = state.table.summary(placement.node_id)?;

    tracing::debug!(
        digest = %placement.digest,
        location = %placement.location,
        %strategy,
        collision = placement.is_collision,
        "placed item"
    );

    Ok(Json(HashResponse {
        hash: placement.digest,
        location: placement.location,
        collision: placement.is_collision,
        details: HashDetails {
            strategy,
            original_location: placement.original_location,
            step_size: placement.step_size,
            probe_sequence: placement.probe_sequence,
            storage_node,
            timestamp: placement.timestamp,
        },
    }))
}

// --- Admin endpoints ---

#[derive(Debug, Serialize)]
struct ResetResponse {
    message: String,
}

async fn reset_table(State(state): State<SharedState>) -> Json<ResetResponse> {
    let mut state = state.write().await;
    state.table.reset();
    tracing::info!("bucket table reset");
    Json(ResetResponse {
        message: "all storage nodes cleared".to_string(),
    })
}

// --- Storage node endpoints ---

async fn list_nodes(State(state): State<SharedState>) -> Json<Vec<NodeSummary>> {
    let state = state.read().await;
    Json(state.table.summaries())
}

async fn get_node(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Result<Json<NodeDetail>, ApiError> {
    let state = state.read().await;
    let detail = state.table.detail(id)?;
    Ok(Json(detail))
}
