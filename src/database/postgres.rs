use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{Movie, MoviePatch, NewMovie, NewUser, User};
use crate::database::store::{MovieStore, Store, StoreError, UserStore};

const USER_COLUMNS: &str = "id, name, username, password_hash, created_at";
const MOVIE_COLUMNS: &str = "id, title, release_date, genre, actors";

/// Postgres-backed store. Uniqueness is enforced by the table constraints.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, name, username, password_hash) VALUES ($1, $2, $3, $4) RETURNING {}",
            USER_COLUMNS
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(user.name)
            .bind(user.username)
            .bind(user.password_hash)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_write(e, "user", "username"))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl MovieStore for PgStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        let sql = format!("SELECT {} FROM movies ORDER BY created_at, id", MOVIE_COLUMNS);

        let movies = sqlx::query_as::<_, Movie>(&sql).fetch_all(&self.pool).await?;
        Ok(movies)
    }

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let sql = format!(
            "INSERT INTO movies (id, title, release_date, genre, actors) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&sql)
            .bind(Uuid::new_v4())
            .bind(movie.title)
            .bind(movie.release_date)
            .bind(movie.genre)
            .bind(movie.actors)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_write(e, "movie", "title"))
    }

    async fn find_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError> {
        let sql = format!("SELECT {} FROM movies WHERE id = $1", MOVIE_COLUMNS);

        let movie = sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(movie)
    }

    async fn update_movie(&self, id: Uuid, patch: MoviePatch) -> Result<Option<Movie>, StoreError> {
        // NULL parameters keep the stored column
        let sql = format!(
            "UPDATE movies SET \
                title = COALESCE($2, title), \
                release_date = COALESCE($3, release_date), \
                genre = COALESCE($4, genre), \
                actors = COALESCE($5, actors) \
             WHERE id = $1 RETURNING {}",
            MOVIE_COLUMNS
        );

        sqlx::query_as::<_, Movie>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.release_date)
            .bind(patch.genre)
            .bind(patch.actors)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_write(e, "movie", "title"))
    }

    async fn delete_movie(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
