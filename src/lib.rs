pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use state::AppState;

/// Builds the full router around an injected store and token issuer.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        .merge(auth_public_routes())
        // Protected
        .merge(movie_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/signup", post(auth::signup_post))
        .route("/signin", post(auth::signin_post))
}

fn movie_routes(state: AppState) -> Router<AppState> {
    use handlers::method_not_allowed;
    use handlers::protected::movies;

    let auth = from_fn_with_state(state, middleware::jwt_auth_middleware);

    // route_layer wraps only the defined methods; the fallback added after it
    // stays unauthenticated so unsupported methods always get 405
    Router::new()
        .route(
            "/movies",
            get(movies::movies_get)
                .post(movies::movies_post)
                .route_layer(auth.clone())
                .fallback(method_not_allowed),
        )
        .route(
            "/movies/:movie_id",
            get(movies::movie_get)
                .put(movies::movie_put)
                .delete(movies::movie_delete)
                .route_layer(auth)
                .fallback(method_not_allowed),
        )
}
