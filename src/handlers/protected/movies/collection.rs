// handlers/protected/movies/collection.rs - collection-level movie operations

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::{deserialize_release_date, Movie, NewMovie};
use crate::error::ApiError;
use crate::handlers::non_empty;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub actors: Option<Vec<String>>,
}

impl CreateMovieRequest {
    /// All four fields are required. The message names the first missing
    /// field; `field_errors` lists every one.
    pub fn into_new_movie(self) -> Result<NewMovie, ApiError> {
        let title = non_empty(self.title);
        let genre = non_empty(self.genre);

        let mut missing: Vec<(&str, &str)> = Vec::new();
        if title.is_none() {
            missing.push(("title", "Movie needs a title!"));
        }
        if self.release_date.is_none() {
            missing.push(("releaseDate", "Movie needs a releaseDate!"));
        }
        if genre.is_none() {
            missing.push(("genre", "Movie needs a genre!"));
        }
        if self.actors.is_none() {
            missing.push(("actors", "Movie needs actors!"));
        }

        match (title, self.release_date, genre, self.actors) {
            (Some(title), Some(release_date), Some(genre), Some(actors)) => Ok(NewMovie {
                title,
                release_date,
                genre,
                actors,
            }),
            _ => {
                let message = missing[0].1;
                let field_errors: BTreeMap<String, String> = missing
                    .iter()
                    .map(|(field, _)| (field.to_string(), "This field is required".to_string()))
                    .collect();
                Err(ApiError::validation_error(message, Some(field_errors)))
            }
        }
    }
}

/// GET /movies - every movie, no pagination
pub async fn movies_get(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    let movies = state.store.list_movies().await?;
    Ok(Json(movies))
}

/// POST /movies - create a movie; 201 with the stored record
pub async fn movies_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateMovieRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(payload) = payload?;
    let new_movie = payload.into_new_movie()?;

    match state.store.insert_movie(new_movie).await {
        Ok(movie) => {
            tracing::info!(user = %user.username, movie_id = %movie.id, "Movie created");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "success": true, "movie": movie })),
            ))
        }
        Err(e) if e.is_duplicate() => Err(ApiError::conflict(
            "A movie with that name already exists.",
        )),
        Err(e) => Err(e.into()),
    }
}
