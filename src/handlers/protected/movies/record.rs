// handlers/protected/movies/record.rs - single-movie operations

use axum::{
    body::Bytes,
    extract::{Path, State},
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::database::models::MoviePatch;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

use super::parse_movie_id;

const NOT_FOUND: &str = "Unable to find movie.";
const UPDATE_NOT_FOUND: &str = "Unable to Update movie.";
const DELETE_NOT_FOUND: &str = "Unable to Delete movie.";

/// GET /movies/:movie_id
pub async fn movie_get(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_movie_id(&movie_id, NOT_FOUND)?;

    match state.store.find_movie(id).await? {
        Some(movie) => Ok(Json(json!({ "success": true, "movie": movie }))),
        None => Err(ApiError::not_found(NOT_FOUND)),
    }
}

/// PUT /movies/:movie_id - partial update, only supplied fields change.
/// A missing body is an empty patch; a present one must be a JSON object.
pub async fn movie_put(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(movie_id): Path<String>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let id = parse_movie_id(&movie_id, UPDATE_NOT_FOUND)?;
    let patch = parse_patch(&body)?;

    match state.store.update_movie(id, patch.normalized()).await {
        Ok(Some(_)) => {
            tracing::info!(user = %user.username, movie_id = %id, "Movie updated");
            Ok(Json(json!({ "success": true, "message": "Updated Movie." })))
        }
        Ok(None) => Err(ApiError::not_found(UPDATE_NOT_FOUND)),
        Err(e) if e.is_duplicate() => Err(ApiError::conflict(
            "A movie with that name already exists.",
        )),
        Err(e) => Err(e.into()),
    }
}

/// DELETE /movies/:movie_id
pub async fn movie_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_movie_id(&movie_id, DELETE_NOT_FOUND)?;

    if !state.store.delete_movie(id).await? {
        return Err(ApiError::not_found(DELETE_NOT_FOUND));
    }

    tracing::info!(user = %user.username, movie_id = %id, "Movie deleted");
    Ok(Json(json!({ "success": true, "message": "Deleted Movie." })))
}

fn parse_patch(body: &[u8]) -> Result<MoviePatch, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(MoviePatch::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::invalid_json(format!("Failed to parse the request body as JSON: {}", e)))
}
