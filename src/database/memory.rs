use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{Movie, MoviePatch, NewMovie, NewUser, User};
use crate::database::store::{MovieStore, Store, StoreError, UserStore};

/// Process-local store with the same uniqueness rules as the Postgres schema.
///
/// Each write checks its constraint and inserts under one write lock, so two
/// concurrent inserts with the same key cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    movies: RwLock<Vec<Movie>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user_count(&self) -> usize {
        self.users.read().await.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.username) {
            return Err(StoreError::Duplicate {
                entity: "user",
                field: "username",
            });
        }

        let user = user.into_user(Uuid::new_v4(), Utc::now());
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl MovieStore for MemoryStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        Ok(self.movies.read().await.clone())
    }

    async fn insert_movie(&self, movie: NewMovie) -> Result<Movie, StoreError> {
        let mut movies = self.movies.write().await;
        if movies.iter().any(|m| m.title == movie.title) {
            return Err(StoreError::Duplicate {
                entity: "movie",
                field: "title",
            });
        }

        let movie = movie.into_movie(Uuid::new_v4());
        movies.push(movie.clone());
        Ok(movie)
    }

    async fn find_movie(&self, id: Uuid) -> Result<Option<Movie>, StoreError> {
        Ok(self.movies.read().await.iter().find(|m| m.id == id).cloned())
    }

    async fn update_movie(&self, id: Uuid, patch: MoviePatch) -> Result<Option<Movie>, StoreError> {
        let mut movies = self.movies.write().await;

        let Some(index) = movies.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        if let Some(title) = &patch.title {
            if movies.iter().any(|m| m.id != id && &m.title == title) {
                return Err(StoreError::Duplicate {
                    entity: "movie",
                    field: "title",
                });
            }
        }

        patch.apply_to(&mut movies[index]);
        Ok(Some(movies[index].clone()))
    }

    async fn delete_movie(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != id);
        Ok(movies.len() != before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
