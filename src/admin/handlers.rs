use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::http::server::AppState;
use crate::routing::{Match, Params, RoutingError};

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub routes: usize,
    pub mount_prefix: String,
}

/// One row of the route table.
#[derive(Debug, Serialize, Deserialize)]
pub struct RouteSummary {
    pub index: usize,
    pub pattern: String,
    pub handler: String,
    pub name: Option<String>,
    pub params: Params,
    pub reversible: bool,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReverseResponse {
    pub name: String,
    pub url: String,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let router = state.router.load();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        routes: router.len(),
        mount_prefix: router.mount_prefix().to_string(),
    })
}

pub async fn get_routes(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let router = state.router.load();
    let routes = router
        .routes()
        .iter()
        .enumerate()
        .map(|(index, route)| RouteSummary {
            index,
            pattern: route.pattern().source().to_string(),
            handler: route.handler().to_string(),
            name: route.name().map(str::to_string),
            params: route.params().clone(),
            reversible: route.pattern().is_reversible(),
        })
        .collect();
    Json(routes)
}

pub async fn get_resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<Json<Match>, RoutingError> {
    state.router.load().resolve(&query.path).map(Json)
}

pub async fn get_reverse(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(kwargs): Query<HashMap<String, String>>,
) -> Result<Json<ReverseResponse>, RoutingError> {
    let url = state.router.load().reverse(&name, kwargs)?;
    Ok(Json(ReverseResponse { name, url }))
}
