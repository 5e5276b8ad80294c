//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered route table
//! - Resolve a request path to the first matching route
//! - Pair the match with its handler
//! - Generate paths from route names
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) linear scan in declaration order; first match wins
//! - O(1) name lookup via HashMap for reverse
//! - Explicit NotFound rather than silent default

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::handlers::{Handler, HandlerSet};
use crate::routing::error::{BuildError, RoutingError};
use crate::routing::route::{Match, Route};
use crate::routing::table;

/// An immutable, ordered route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
    /// Route name -> index into `routes`.
    names: HashMap<String, usize>,
    mount_prefix: String,
}

impl Router {
    /// Build a router mounted at `/`.
    pub fn new(routes: Vec<Route>) -> Result<Self, BuildError> {
        Self::with_mount_prefix(routes, "/")
    }

    /// Build a router whose paths live under `mount_prefix`.
    pub fn with_mount_prefix(routes: Vec<Route>, mount_prefix: &str) -> Result<Self, BuildError> {
        if !mount_prefix.starts_with('/') || !mount_prefix.ends_with('/') {
            return Err(BuildError::InvalidMountPrefix(mount_prefix.to_string()));
        }

        let mut names = HashMap::new();
        for (index, route) in routes.iter().enumerate() {
            if let Some(name) = route.name() {
                if names.insert(name.to_string(), index).is_some() {
                    return Err(BuildError::DuplicateName(name.to_string()));
                }
            }
        }

        Ok(Self {
            routes,
            names,
            mount_prefix: mount_prefix.to_string(),
        })
    }

    /// Build the router a configuration describes.
    ///
    /// Configured routes replace the built-in table when present.
    pub fn from_config(config: &ServerConfig) -> Result<Self, BuildError> {
        let routes = if config.routes.is_empty() {
            table::hitwalker_routes(&config.app)?
        } else {
            config
                .routes
                .iter()
                .map(Route::from_config)
                .collect::<Result<Vec<_>, _>>()?
        };

        Self::with_mount_prefix(routes, &config.app.mount_prefix)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn mount_prefix(&self) -> &str {
        &self.mount_prefix
    }

    /// Distinct handler ids referenced by the table.
    pub fn handler_ids(&self) -> BTreeSet<&str> {
        self.routes.iter().map(Route::handler).collect()
    }

    /// Find the first route matching the full request path.
    pub fn resolve(&self, path: &str) -> Result<Match, RoutingError> {
        let relative = path
            .strip_prefix(self.mount_prefix.as_str())
            .ok_or_else(|| RoutingError::NotFound(path.to_string()))?;

        self.routes
            .iter()
            .find_map(|route| route.try_match(relative))
            .ok_or_else(|| RoutingError::NotFound(path.to_string()))
    }

    /// Resolve a path and select the handler that serves it.
    pub fn dispatch<H>(&self, path: &str, handlers: &H) -> Result<(Arc<dyn Handler>, Match), RoutingError>
    where
        H: HandlerSet + ?Sized,
    {
        let matched = self.resolve(path)?;
        let handler = handlers
            .handler(&matched.handler)
            .ok_or_else(|| RoutingError::HandlerNotRegistered(matched.handler.clone()))?;
        Ok((handler, matched))
    }

    /// Generate the full path for a named route.
    pub fn reverse<I, K, V>(&self, name: &str, kwargs: I) -> Result<String, RoutingError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let index = self
            .names
            .get(name)
            .ok_or_else(|| RoutingError::UnknownName(name.to_string()))?;
        let kwargs: HashMap<String, String> = kwargs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let relative = self.routes[*index].pattern().reverse(name, &kwargs)?;
        Ok(format!("{}{}", self.mount_prefix, relative))
    }
}
