mod common;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use giftbit_storefront::api::middleware::rate_limit::RateLimit;
use giftbit_storefront::routes;
use serde_json::Value;
use std::net::SocketAddr;
use std::path::PathBuf;
use tower::ServiceExt;

#[tokio::test]
async fn test_health_endpoint_success() {
    let server = common::seeded_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["storage"]["status"], "ok");
    assert_eq!(json["storage"]["backend"], "memory");
    assert_eq!(json["storage"]["message"], "5 categories");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let server = common::test_server(common::empty_state());

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("storage").is_some());
    assert_eq!(json["storage"]["message"], "0 categories");
}

#[tokio::test]
async fn test_unknown_api_route_is_not_found() {
    let server = common::seeded_server().await;

    let response = server.get("/api/unknown").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let app = routes::app_router(common::seeded_state().await, None, None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/testimonials/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 3);
}

fn static_fixture(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("giftbit-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html>storefront</html>").unwrap();
    std::fs::write(dir.join("app.js"), "console.log('giftbit');").unwrap();
    dir
}

#[tokio::test]
async fn test_static_assets_and_spa_fallback() {
    let dir = static_fixture("spa");
    let server = axum_test::TestServer::new(routes::router(
        common::seeded_state().await,
        None,
        Some(dir.as_path()),
    ))
    .unwrap();

    let asset = server.get("/app.js").await;
    asset.assert_status_ok();
    assert!(asset.text().contains("giftbit"));

    let page = server.get("/gift-cards/amazon").await;
    page.assert_status_ok();
    assert!(page.text().contains("storefront"));

    // API routes win over the fallback
    let api = server.get("/api/faq").await;
    api.assert_status_ok();
    assert!(api.json::<Value>().is_array());

    std::fs::remove_dir_all(&dir).ok();
}

async fn limited_router(behind_proxy: bool) -> Router {
    let limit = RateLimit {
        per_second: 60,
        burst: 2,
        behind_proxy,
    };
    routes::router(common::seeded_state().await, Some(limit), None)
}

/// Sends a GET from a single peer socket, optionally as a forwarded client.
async fn status_of(app: &Router, path: &str, forwarded_for: Option<&str>) -> StatusCode {
    let mut builder = Request::builder().uri(path);
    if let Some(ip) = forwarded_for {
        builder = builder.header("x-forwarded-for", ip);
    }
    let mut request = builder.body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([10, 0, 0, 1], 40000))));

    app.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn test_api_burst_is_throttled() {
    let app = limited_router(false).await;

    assert_eq!(status_of(&app, "/api/faq", None).await, StatusCode::OK);
    assert_eq!(status_of(&app, "/api/faq", None).await, StatusCode::OK);
    assert_eq!(
        status_of(&app, "/api/faq", None).await,
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn test_health_is_never_throttled() {
    let app = limited_router(false).await;

    for _ in 0..3 {
        status_of(&app, "/api/faq", None).await;
    }

    for _ in 0..5 {
        assert_eq!(status_of(&app, "/health", None).await, StatusCode::OK);
    }
}

#[tokio::test]
async fn test_forwarded_clients_share_peer_bucket_by_default() {
    let app = limited_router(false).await;

    let statuses = [
        status_of(&app, "/api/faq", Some("203.0.113.1")).await,
        status_of(&app, "/api/faq", Some("203.0.113.2")).await,
        status_of(&app, "/api/faq", Some("203.0.113.3")).await,
    ];

    assert_eq!(
        statuses,
        [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
    );
}

#[tokio::test]
async fn test_behind_proxy_gives_each_forwarded_client_a_bucket() {
    let app = limited_router(true).await;

    let statuses = [
        status_of(&app, "/api/faq", Some("203.0.113.1")).await,
        status_of(&app, "/api/faq", Some("203.0.113.2")).await,
        status_of(&app, "/api/faq", Some("203.0.113.3")).await,
    ];
    assert_eq!(statuses, [StatusCode::OK; 3]);

    assert_eq!(
        status_of(&app, "/api/faq", Some("203.0.113.1")).await,
        StatusCode::OK
    );
    assert_eq!(
        status_of(&app, "/api/faq", Some("203.0.113.1")).await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        status_of(&app, "/api/faq", Some("203.0.113.2")).await,
        StatusCode::OK
    );
}
