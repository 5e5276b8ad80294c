//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all dispatch handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Mount the admin API when enabled
//! - Swap in a new route table when a config update arrives
//! - Serve until the shutdown broadcast fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin;
use crate::config::{AdminConfig, ServerConfig};
use crate::handlers::HandlerRegistry;
use crate::http::request::{decode_path, RequestIdExt, UuidRequestId, X_REQUEST_ID};
use crate::observability::metrics;
use crate::routing::{BuildError, Router, RoutingError};

/// Errors that keep a route table from going live.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build route table: {0}")]
    Build(#[from] BuildError),

    #[error("no handler registered for: {}", .0.join(", "))]
    MissingHandlers(Vec<String>),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// The live route table. Replaced wholesale on reload.
    pub router: Arc<ArcSwap<Router>>,
    pub handlers: Arc<HandlerRegistry>,
    pub admin: AdminConfig,
}

impl AppState {
    /// Build state for a config, checking every handler id can be served.
    pub fn new(config: &ServerConfig, handlers: HandlerRegistry) -> Result<Self, ServerError> {
        let router = build_router(config, &handlers)?;
        Ok(Self {
            router: Arc::new(ArcSwap::from_pointee(router)),
            handlers: Arc::new(handlers),
            admin: config.admin.clone(),
        })
    }

    /// Replace the route table. On error the current table stays live.
    pub fn reload(&self, config: &ServerConfig) -> Result<(), ServerError> {
        let result = build_router(config, &self.handlers);
        metrics::record_reload(result.is_ok());

        let router = result?;
        tracing::info!(
            routes = router.len(),
            mount_prefix = %router.mount_prefix(),
            "Route table reloaded"
        );
        self.router.store(Arc::new(router));
        Ok(())
    }
}

fn build_router(config: &ServerConfig, handlers: &HandlerRegistry) -> Result<Router, ServerError> {
    let router = Router::from_config(config)?;
    let missing = handlers.missing(&router);
    if !missing.is_empty() {
        return Err(ServerError::MissingHandlers(
            missing.into_iter().map(str::to_string).collect(),
        ));
    }
    Ok(router)
}

/// HTTP server for the route table.
pub struct HttpServer {
    app: axum::Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and handlers.
    pub fn new(config: ServerConfig, handlers: HandlerRegistry) -> Result<Self, ServerError> {
        let state = AppState::new(&config, handlers)?;
        let app = Self::build_app(&config, state.clone());

        tracing::info!(
            routes = state.router.load().len(),
            registered_handlers = state.handlers.len(),
            admin_enabled = config.admin.enabled,
            "HTTP server configured"
        );

        Ok(Self { app, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, state: AppState) -> axum::Router {
        let mut app = axum::Router::new();
        if config.admin.enabled {
            app = app.merge(admin::setup_admin_router(state.clone()));
        }

        app.fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
            .layer(TraceLayer::new_for_http())
    }

    /// The Axum app, for driving the server without a listener.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener.
    ///
    /// Config updates swap the route table in place; the server stops once
    /// `shutdown` fires and in-flight requests finish.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ServerConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload_state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = reload_state.reload(&config) {
                    tracing::error!(error = %e, "Rejected config update, keeping current route table");
                }
            }
        });

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: resolve the path and hand the request to its handler.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let raw_path = request.uri().path().to_string();

    let router = state.router.load_full();
    let (path, dispatched) = match decode_path(&raw_path) {
        Ok(path) => {
            let dispatched = router.dispatch(&path, state.handlers.as_ref());
            (path.into_owned(), dispatched)
        }
        Err(err) => (raw_path.clone(), Err(err)),
    };
    match dispatched {
        Ok((handler, matched)) => {
            let handler_id = matched.handler.clone();
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                route = ?matched.route_name,
                handler = %handler_id,
                "Dispatching request"
            );

            let response = handler.call(request, matched).await;
            metrics::record_dispatch(&handler_id, response.status().as_u16(), start_time);
            response
        }
        Err(err @ RoutingError::NotFound(_)) => {
            tracing::warn!(request_id = %request_id, path = %path, "No route matched");
            metrics::record_not_found();
            err.into_response()
        }
        Err(err) => {
            tracing::error!(request_id = %request_id, path = %path, error = %err, "Dispatch failed");
            err.into_response()
        }
    }
}
