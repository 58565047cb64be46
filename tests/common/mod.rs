#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use uuid::Uuid;

use movies_api::auth::{with_scheme, TokenIssuer};
use movies_api::database::models::{Movie, MoviePatch, NewMovie, NewUser, User};
use movies_api::database::{MemoryStore, MovieStore, Store, StoreError, UserStore};
use movies_api::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// The real router on a free local port, backed by a fresh in-memory store
/// unless another store is supplied.
pub struct TestServer<S = MemoryStore> {
    pub base_url: String,
    pub store: Arc<S>,
    pub tokens: TokenIssuer,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(MemoryStore::new()).await
    }
}

impl<S: Store + 'static> TestServer<S> {
    pub async fn spawn_with(store: S) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(store);
        let state = AppState::new(store.clone(), TokenIssuer::new(TEST_SECRET, 3600)?);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, movies_api::app(state)).await;
        });

        let server = Self {
            base_url,
            store,
            tokens: TokenIssuer::new(TEST_SECRET, 3600)?,
            client: reqwest::Client::new(),
            handle,
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    // Polls `/`, which answers without touching the store
    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// A valid `JWT <token>` header value without going through /signin
    pub fn auth_header(&self, username: &str) -> Result<String> {
        let token = self.tokens.issue(Uuid::new_v4(), username)?;
        Ok(with_scheme(&token))
    }

    pub async fn signup(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/signup"))
            .json(&json!({ "name": "Test User", "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn signin(&self, username: &str, password: &str) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/signin"))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?)
    }

    pub async fn create_movie(&self, auth: &str, movie: &Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url("/movies"))
            .header("Authorization", auth)
            .json(movie)
            .send()
            .await?)
    }
}

impl<S> Drop for TestServer<S> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn sample_movie(title: &str) -> Value {
    json!({
        "title": title,
        "releaseDate": "2020-01-01",
        "genre": "Drama",
        "actors": ["A", "B"]
    })
}

/// A store whose every call fails as if the database were unreachable.
#[derive(Debug, Default)]
pub struct FailingStore;

fn unreachable_db() -> StoreError {
    StoreError::Sqlx(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl UserStore for FailingStore {
    async fn insert_user(&self, _user: NewUser) -> Result<User, StoreError> {
        Err(unreachable_db())
    }

    async fn find_user_by_username(&self, _username: &str) -> Result<Option<User>, StoreError> {
        Err(unreachable_db())
    }
}

#[async_trait]
impl MovieStore for FailingStore {
    async fn list_movies(&self) -> Result<Vec<Movie>, StoreError> {
        Err(unreachable_db())
    }

    async fn insert_movie(&self, _movie: NewMovie) -> Result<Movie, StoreError> {
        Err(unreachable_db())
    }

    async fn find_movie(&self, _id: Uuid) -> Result<Option<Movie>, StoreError> {
        Err(unreachable_db())
    }

    async fn update_movie(&self, _id: Uuid, _patch: MoviePatch) -> Result<Option<Movie>, StoreError> {
        Err(unreachable_db())
    }

    async fn delete_movie(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(unreachable_db())
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable_db())
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}
