//! Admin API: inspect the live route table.
//!
//! All endpoints require the configured bearer key. The layer is applied
//! with `route_layer`, so unknown `/admin/*` paths still reach the route
//! table instead of failing authentication.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn setup_admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/routes", get(get_routes))
        .route("/admin/resolve", get(get_resolve))
        .route("/admin/reverse/{name}", get(get_reverse))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
