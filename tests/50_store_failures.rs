mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

use movies_api::error::INTERNAL_MESSAGE;

use common::{sample_movie, FailingStore, TestServer};

async fn assert_internal(res: reqwest::Response, what: &str) -> Result<()> {
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR, "{}", what);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], false, "{}", what);
    assert_eq!(body["message"], INTERNAL_MESSAGE, "{}", what);
    assert_eq!(body["code"], "INTERNAL_SERVER_ERROR", "{}", what);
    Ok(())
}

#[tokio::test]
async fn health_reports_unavailable_store() -> Result<()> {
    let server = TestServer::spawn_with(FailingStore).await?;

    let res = server.client.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn signup_and_signin_fail_with_internal_error() -> Result<()> {
    let server = TestServer::spawn_with(FailingStore).await?;

    let res = server.signup("critic", "pw").await?;
    assert_internal(res, "signup").await?;

    let res = server.signin("critic", "pw").await?;
    assert_internal(res, "signin").await?;
    Ok(())
}

#[tokio::test]
async fn movie_routes_fail_with_internal_error_not_404() -> Result<()> {
    let server = TestServer::spawn_with(FailingStore).await?;
    let auth = server.auth_header("critic")?;
    let item = format!("/movies/{}", Uuid::new_v4());

    for (method, path) in [
        (Method::GET, "/movies"),
        (Method::POST, "/movies"),
        (Method::GET, item.as_str()),
        (Method::PUT, item.as_str()),
        (Method::DELETE, item.as_str()),
    ] {
        let res = server
            .client
            .request(method.clone(), server.url(path))
            .header("Authorization", &auth)
            .json(&sample_movie("Unreachable"))
            .send()
            .await?;
        assert_internal(res, &format!("{} {}", method, path)).await?;
    }
    Ok(())
}

#[tokio::test]
async fn malformed_id_is_still_not_found() -> Result<()> {
    let server = TestServer::spawn_with(FailingStore).await?;
    let auth = server.auth_header("critic")?;

    let res = server
        .client
        .put(server.url("/movies/not-a-uuid"))
        .header("Authorization", &auth)
        .json(&json!({ "genre": "Noir" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
