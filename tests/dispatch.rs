//! End-to-end dispatch through the HTTP server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use hitwalker_router::config::ServerConfig;
use hitwalker_router::handlers::HandlerRegistry;
use hitwalker_router::routing::Match;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_literal_routes_dispatch_to_their_views() {
    let server = common::start_default_server().await;
    let client = reqwest::Client::new();

    let cases = [
        ("/", "index"),
        ("/network/", "network"),
        ("/pathway/", "pathway"),
        ("/table/", "table"),
        ("/test/", "qtests"),
        ("/get_graph/", "get_graph"),
        ("/password/", "password"),
        ("/login/", "auth.login"),
        ("/logout/", "auth.logout_then_login"),
    ];

    for (path, handler) in cases {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{}", path);
        let json: Value = res.json().await.unwrap();
        assert_eq!(json["handler"], handler, "{}", path);
        assert_eq!(json["path"], path);
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_capture_and_static_params() {
    let server = common::start_default_server().await;
    let client = reqwest::Client::new();

    let json: Value = client
        .get(server.url("/match_gene/"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["handler"], "get_match");
    assert_eq!(json["route"], "get_match");
    assert_eq!(json["params"]["match_type"], "gene");

    let json: Value = client
        .get(server.url("/SampleNotFound"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(json["handler"], "index");
    assert_eq!(json["params"]["retry_message"], "Sample Not Found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_unknown_path_is_404() {
    let server = common::start_default_server().await;

    let res = reqwest::get(server.url("/nonexistent/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key("x-request-id"));
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["error"], "route_not_found");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let server = common::start_default_server().await;

    let res = reqwest::Client::new()
        .get(server.url("/network/"))
        .header("x-request-id", "test-id-42")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "test-id-42");

    server.shutdown.trigger();
}

async fn network_view(_req: Request<Body>, matched: Match) -> Response {
    format!("network view via {}", matched.pattern).into_response()
}

#[tokio::test]
async fn test_registered_handler_and_fallback() {
    let handlers = HandlerRegistry::echo().with("network", network_view);
    let server = common::start_server(ServerConfig::default(), handlers).await;

    let body = reqwest::get(server.url("/network/"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(body, "network view via ^network/$");

    let res = reqwest::get(server.url("/pathway/")).await.unwrap();
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["handler"], "pathway");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_mount_prefix() {
    let mut config = ServerConfig::default();
    config.app.mount_prefix = "/HitWalker2/".into();
    let server = common::start_server(config, HandlerRegistry::echo()).await;

    let res = reqwest::get(server.url("/HitWalker2/table/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = reqwest::get(server.url("/table/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_percent_encoded_paths() {
    let server = common::start_default_server().await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/No%53ample")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["handler"], "index");
    assert_eq!(json["params"]["retry_message"], "No Sample Specified");

    let res = client.get(server.url("/match_g%C3%A9ne/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["params"]["match_type"], "géne");
    assert_eq!(json["path"], "/match_géne/");

    let res = client.get(server.url("/match_%FF/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}
