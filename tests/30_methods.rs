mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use common::TestServer;

#[tokio::test]
async fn unsupported_methods_are_405_regardless_of_auth() -> Result<()> {
    let server = TestServer::spawn().await?;
    let auth = server.auth_header("critic")?;
    let item = format!("/movies/{}", uuid::Uuid::new_v4());

    let cases = [
        (Method::PATCH, "/movies"),
        (Method::PUT, "/movies"),
        (Method::DELETE, "/movies"),
        (Method::PATCH, item.as_str()),
        (Method::POST, item.as_str()),
    ];

    for (method, path) in cases {
        for with_token in [false, true] {
            let mut req = server.client.request(method.clone(), server.url(path));
            if with_token {
                req = req.header("Authorization", &auth);
            }
            let res = req.send().await?;
            assert_eq!(
                res.status(),
                StatusCode::METHOD_NOT_ALLOWED,
                "{} {} (token: {})",
                method,
                path,
                with_token
            );

            let body = res.json::<Value>().await?;
            assert_eq!(body["message"], "HTTP method not supported.");
        }
    }
    Ok(())
}

#[tokio::test]
async fn movie_routes_require_a_token() -> Result<()> {
    let server = TestServer::spawn().await?;
    let item = format!("/movies/{}", uuid::Uuid::new_v4());

    let cases = [
        (Method::GET, "/movies"),
        (Method::POST, "/movies"),
        (Method::GET, item.as_str()),
        (Method::PUT, item.as_str()),
        (Method::DELETE, item.as_str()),
    ];

    for (method, path) in cases {
        let res = server
            .client
            .request(method.clone(), server.url(path))
            .json(&common::sample_movie("Unauthorized"))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{} {}", method, path);

        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    // Nothing slipped through to the store
    let auth = server.auth_header("critic")?;
    let res = server
        .client
        .get(server.url("/movies"))
        .header("Authorization", &auth)
        .send()
        .await?;
    assert_eq!(res.json::<Vec<Value>>().await?.len(), 0);
    Ok(())
}
