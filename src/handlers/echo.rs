//! Echo handler: reports the dispatch result instead of rendering a view.

use axum::body::Body;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::future::BoxFuture;
use serde::Serialize;

use crate::handlers::Handler;
use crate::http::request::decode_path;
use crate::routing::{Match, Params};

/// Body returned by [`EchoHandler`].
#[derive(Debug, Serialize)]
pub struct EchoBody {
    pub method: String,
    pub path: String,
    pub route: Option<String>,
    pub handler: String,
    pub params: Params,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

impl Handler for EchoHandler {
    fn call(&self, request: Request<Body>, matched: Match) -> BoxFuture<'static, Response> {
        let body = EchoBody {
            method: request.method().to_string(),
            path: decode_path(request.uri().path())
                .map(|path| path.into_owned())
                .unwrap_or_else(|_| request.uri().path().to_string()),
            route: matched.route_name,
            handler: matched.handler,
            params: matched.params,
            args: matched.args,
        };
        Box::pin(async move { Json(body).into_response() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Route;

    #[tokio::test]
    async fn test_echo_reports_match() {
        let route = Route::new(r"^match_(?P<match_type>\w+)/$", "get_match")
            .unwrap()
            .named("get_match");
        let matched = route.try_match("match_gene/").unwrap();
        let request = Request::builder()
            .uri("/match_gene/")
            .body(Body::empty())
            .unwrap();

        let response = EchoHandler.call(request, matched).await;
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["handler"], "get_match");
        assert_eq!(json["route"], "get_match");
        assert_eq!(json["params"]["match_type"], "gene");
        assert_eq!(json["path"], "/match_gene/");
        assert_eq!(json["method"], "GET");
    }
}
