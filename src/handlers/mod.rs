// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (token auth applied per route in lib.rs)
pub mod public;
pub mod protected;

use crate::error::ApiError;

/// Fallback for any method a route does not define.
/// Registered outside the auth layer, so it answers 405 with or without a token.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Empty strings count as missing input
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
