// handlers/public/status.rs - GET / and GET /health

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::state::AppState;

/// GET / - service name and version
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "public": "POST /signup, POST /signin",
            "protected": "GET|POST /movies, GET|PUT|DELETE /movies/:id (Authorization: JWT <token>)"
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.store.ping().await {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "store": state.store.backend(),
            "status": "ok"
        }))),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            Err(ApiError::service_unavailable("Store unavailable"))
        }
    }
}
