use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::{Claims, TOKEN_SCHEME};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated user context extracted from the token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

/// Validates the token and injects `AuthUser` into request extensions
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_headers(&headers).map_err(ApiError::unauthorized)?;
    let claims = state.tokens.verify(token)?;

    tracing::debug!(user = %claims.username, "authenticated request");
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Accepts `JWT <token>` and `Bearer <token>`, scheme case-insensitive
fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, &'static str> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or("Missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format")?;

    let (scheme, token) = auth_str
        .trim()
        .split_once(' ')
        .ok_or("Authorization header must use the JWT scheme")?;

    if !scheme.eq_ignore_ascii_case(TOKEN_SCHEME) && !scheme.eq_ignore_ascii_case("Bearer") {
        return Err("Authorization header must use the JWT scheme");
    }

    let token = token.trim();
    if token.is_empty() {
        return Err("Empty JWT token");
    }
    Ok(token)
}
