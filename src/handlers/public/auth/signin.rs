// handlers/public/auth/signin.rs - POST /signin handler

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{password, with_scheme};
use crate::error::ApiError;
use crate::handlers::non_empty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /signin - Verify credentials and issue a one-hour token
///
/// Success body: `{ "success": true, "token": "JWT <token>" }`
pub async fn signin_post(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;

    let Some(username) = non_empty(payload.username) else {
        return Err(ApiError::unauthorized("Authentication failed. User not found."));
    };

    let Some(user) = state.store.find_user_by_username(&username).await? else {
        tracing::warn!(username = %username, "Signin for unknown user");
        return Err(ApiError::unauthorized("Authentication failed. User not found."));
    };

    let matches = match non_empty(payload.password) {
        Some(plain) => password::verify_password(plain, user.password_hash.clone()).await?,
        None => false,
    };
    if !matches {
        tracing::warn!(username = %user.username, "Signin with incorrect password");
        return Err(ApiError::unauthorized("Authentication failed. Incorrect password."));
    }

    let token = state.tokens.issue(user.id, &user.username)?;
    tracing::info!(username = %user.username, "User signed in");

    Ok(Json(json!({ "success": true, "token": with_scheme(&token) })))
}
