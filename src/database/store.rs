use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{Movie, MoviePatch, NewMovie, NewUser, User};

/// Errors surfaced by any store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write
    #[error("Duplicate {entity}: {field} already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate { .. })
    }

    /// Maps a unique-constraint violation to `Duplicate`, anything else passes through.
    pub(crate) fn from_write(err: sqlx::Error, entity: &'static str, field: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Duplicate { entity, field }
            }
            _ => StoreError::Sqlx(err),
        }
    }
}

/// Credential persistence. Usernames are unique.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Movie persistence. Titles are unique.
#[async_trait]
pub trait MovieStore: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError>;

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, StoreError>;

    async fn find_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError>;

    /// Returns the updated record, or `None` when `id` does not resolve.
    async fn update_movie(&self, id: Uuid, patch: MoviePatch) -> Result<Option<Movie>, StoreError>;

    /// Returns `false` when `id` does not resolve.
    async fn delete_movie(&self, id: Uuid) -> Result<bool, StoreError>;
}

/// The full store handle injected into the router.
#[async_trait]
pub trait Store: UserStore + MovieStore {
    /// Cheap round-trip used by the health endpoint
    async fn ping(&self) -> Result<(), StoreError>;

    fn backend(&self) -> &'static str;
}
