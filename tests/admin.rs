//! Admin API and config reload.

use axum::http::StatusCode;
use hitwalker_router::config::{RouteConfig, ServerConfig};
use hitwalker_router::handlers::HandlerRegistry;
use serde_json::Value;

mod common;

const KEY: &str = "test-admin-key";

fn admin_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.admin.enabled = true;
    config.admin.api_key = KEY.into();
    config
}

async fn admin_get(server: &common::TestServer, path: &str) -> reqwest::Response {
    reqwest::Client::new()
        .get(server.url(path))
        .bearer_auth(KEY)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_admin_requires_key() {
    let server = common::start_server(admin_config(), HandlerRegistry::echo()).await;
    let client = reqwest::Client::new();

    let res = client.get(server.url("/admin/status")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/admin/status"))
        .bearer_auth("wrong")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = admin_get(&server, "/admin/status").await;
    assert_eq!(res.status(), StatusCode::OK);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["status"], "operational");
    assert_eq!(json["routes"], 22);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_admin_lists_routes_in_order() {
    let server = common::start_server(admin_config(), HandlerRegistry::echo()).await;

    let routes: Vec<Value> = admin_get(&server, "/admin/routes").await.json().await.unwrap();
    assert_eq!(routes.len(), 22);
    assert_eq!(routes[0]["pattern"], "^$");
    assert_eq!(routes[0]["name"], "index");
    assert_eq!(routes[15]["handler"], "get_match");
    assert_eq!(routes[20]["handler"], "auth.login");
    assert_eq!(routes[20]["name"], Value::Null);
    assert_eq!(routes[21]["params"]["login_url"], "/HitWalker2/login/");

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_admin_resolve_and_reverse() {
    let server = common::start_server(admin_config(), HandlerRegistry::echo()).await;

    let json: Value = admin_get(&server, "/admin/resolve?path=/Ambigous")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(json["handler"], "index");
    assert_eq!(json["params"]["retry_message"], "Ambigous Alias");

    let res = admin_get(&server, "/admin/resolve?path=/nonexistent/").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let json: Value = admin_get(&server, "/admin/reverse/get_match?match_type=pathway")
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(json["url"], "/match_pathway/");

    let res = admin_get(&server, "/admin/reverse/get_match").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = admin_get(&server, "/admin/reverse/nope").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_config_update_swaps_route_table() {
    let server = common::start_default_server().await;

    let mut config = ServerConfig::default();
    config.routes.push(RouteConfig {
        pattern: "^fresh/$".into(),
        handler: "fresh".into(),
        name: None,
        params: Default::default(),
    });
    server.updates.send(config).unwrap();

    let url = server.url("/fresh/");
    let swapped = common::eventually(|| {
        let url = url.clone();
        async move {
            reqwest::get(url)
                .await
                .map(|r| r.status() == StatusCode::OK)
                .unwrap_or(false)
        }
    })
    .await;
    assert!(swapped);

    let res = reqwest::get(server.url("/network/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_rejected_update_keeps_route_table() {
    let handlers = HandlerRegistry::new()
        .with("network", hitwalker_router::handlers::EchoHandler);
    let mut config = ServerConfig::default();
    config.routes.push(RouteConfig {
        pattern: "^network/$".into(),
        handler: "network".into(),
        name: None,
        params: Default::default(),
    });
    let server = common::start_server(config.clone(), handlers).await;

    // "index" has no handler in this registry.
    let mut rejected = config.clone();
    rejected.routes[0].handler = "index".into();
    server.updates.send(rejected).unwrap();

    // Updates apply in order, so once this one is live the rejected one has
    // been handled.
    config.routes.push(RouteConfig {
        pattern: "^also/$".into(),
        handler: "network".into(),
        name: None,
        params: Default::default(),
    });
    server.updates.send(config).unwrap();
    let url = server.url("/also/");
    let applied = common::eventually(|| {
        let url = url.clone();
        async move {
            reqwest::get(url)
                .await
                .map(|r| r.status() == StatusCode::OK)
                .unwrap_or(false)
        }
    })
    .await;
    assert!(applied);

    let res = reqwest::get(server.url("/network/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json: Value = res.json().await.unwrap();
    assert_eq!(json["handler"], "network");

    server.shutdown.trigger();
}
