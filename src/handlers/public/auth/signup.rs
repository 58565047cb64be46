// handlers/public/auth/signup.rs - POST /signup handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::password;
use crate::database::models::NewUser;
use crate::error::ApiError;
use crate::handlers::non_empty;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /signup - Register a new user
///
/// The password is hashed here, before the record exists; the store only ever
/// sees the PHC hash. The confirmation body never echoes the record.
pub async fn signup_post(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload?;

    let (Some(username), Some(plain)) = (non_empty(payload.username), non_empty(payload.password))
    else {
        return Err(ApiError::validation_error(
            "Please include both username and password to signup.",
            None,
        ));
    };

    let password_hash = password::hash_password(plain).await?;
    let user = NewUser {
        name: non_empty(payload.name),
        username,
        password_hash,
    };

    match state.store.insert_user(user).await {
        Ok(user) => {
            tracing::info!(username = %user.username, "User signed up");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "success": true, "message": "Successfully created new user." })),
            ))
        }
        Err(e) if e.is_duplicate() => Err(ApiError::conflict(
            "A user with that username already exists.",
        )),
        Err(e) => Err(e.into()),
    }
}
