//! Handler seam.
//!
//! # Data Flow
//! ```text
//! Router::dispatch(path, &impl HandlerSet)
//!     → Match (handler id, params, args)
//!     → HandlerSet::handler(id) → Arc<dyn Handler>
//!     → Handler::call(request, match) → Response
//! ```
//!
//! # Design Decisions
//! - Handlers are addressed by string id so route tables stay declarative
//! - A registry may carry a fallback that serves any id
//! - Unserved ids are detected before a table goes live (`missing`)

pub mod echo;

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::routing::{Match, Router};

pub use echo::EchoHandler;

/// A request handler bound to one or more routes.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request<Body>, matched: Match) -> BoxFuture<'static, Response>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request<Body>, Match) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn call(&self, request: Request<Body>, matched: Match) -> BoxFuture<'static, Response> {
        Box::pin(self(request, matched))
    }
}

/// Lookup of handlers by id.
pub trait HandlerSet: Send + Sync {
    fn handler(&self, id: &str) -> Option<Arc<dyn Handler>>;
}

/// Handlers registered by id, with an optional catch-all.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn Handler>>,
    fallback: Option<Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry that echoes every dispatch.
    pub fn echo() -> Self {
        Self::new().with_fallback(EchoHandler)
    }

    /// Register a handler under `id`, replacing any previous one.
    pub fn with(mut self, id: impl Into<String>, handler: impl Handler) -> Self {
        self.insert(id, handler);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, handler: impl Handler) {
        self.handlers.insert(id.into(), Arc::new(handler));
    }

    /// Serve ids with no explicit registration.
    pub fn with_fallback(mut self, handler: impl Handler) -> Self {
        self.fallback = Some(Arc::new(handler));
        self
    }

    /// Handler ids in the router that this registry cannot serve.
    pub fn missing<'a>(&self, router: &'a Router) -> Vec<&'a str> {
        if self.fallback.is_some() {
            return Vec::new();
        }
        router
            .handler_ids()
            .into_iter()
            .filter(|id| !self.handlers.contains_key(*id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerSet for HandlerRegistry {
    fn handler(&self, id: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(id).or(self.fallback.as_ref()).cloned()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<&String> = self.handlers.keys().collect();
        ids.sort();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &ids)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
