use axum::{
    extract::{OriginalUri, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::services::FoldersService;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Noteful API",
        "version": version,
        "endpoints": {
            "notes": "/api/notes[/:id]",
            "folders": "/api/folders[/:id]",
            "health": "/health",
        }
    }))
}

/// GET /health - liveness plus a database round trip
pub async fn health(State(folders): State<FoldersService>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match folders.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

/// Any unmatched route
pub async fn not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    tracing::debug!("No route for {}", uri.path());
    ApiError::not_found("Not found")
}
