// handlers/protected/movies/mod.rs - /movies and /movies/:movie_id

pub mod collection; // GET, POST /movies
pub mod record;     // GET, PUT, DELETE /movies/:movie_id

pub use collection::{movies_get, movies_post};
pub use record::{movie_delete, movie_get, movie_put};

use uuid::Uuid;

use crate::error::ApiError;

/// A malformed identifier cannot resolve to a record, so it reports as not found.
pub(crate) fn parse_movie_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}
