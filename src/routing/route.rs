//! Route descriptors.

use serde::Serialize;
use serde_json::Value;

use crate::config::RouteConfig;
use crate::routing::error::BuildError;
use crate::routing::params::Params;
use crate::routing::pattern::RoutePattern;

/// A binding from a path pattern to a handler.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: RoutePattern,
    handler: String,
    params: Params,
    name: Option<String>,
}

impl Route {
    /// Create a route with no static parameters and no name.
    pub fn new(pattern: &str, handler: impl Into<String>) -> Result<Self, BuildError> {
        let pattern = RoutePattern::new(pattern).map_err(|source| BuildError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self {
            pattern,
            handler: handler.into(),
            params: Params::new(),
            name: None,
        })
    }

    /// Build a route from its configuration entry.
    pub fn from_config(config: &RouteConfig) -> Result<Self, BuildError> {
        let mut route = Self::new(&config.pattern, config.handler.clone())?
            .with_params(Params::from(config.params.clone()));
        route.name = config.name.clone();
        Ok(route)
    }

    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Add one static parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Match a path already stripped of the mount prefix.
    pub fn try_match(&self, path: &str) -> Option<Match> {
        let caps = self.pattern.captures(path)?;

        Some(Match {
            route_name: self.name.clone(),
            handler: self.handler.clone(),
            pattern: self.pattern.source().to_string(),
            params: Params::merged(caps.named, &self.params),
            args: caps.positional,
        })
    }
}

/// The outcome of a successful lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Name of the matched route, if it has one.
    pub route_name: Option<String>,
    /// Handler id to dispatch to.
    pub handler: String,
    /// Source of the matched pattern.
    pub pattern: String,
    /// Captured named groups merged with static parameters.
    pub params: Params,
    /// Unnamed groups, for patterns without named groups.
    pub args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_match_merges_static_params() {
        let route = Route::new("^NoSample$", "index")
            .unwrap()
            .param("retry_message", "No Sample Specified")
            .named("indexNoSample");

        let matched = route.try_match("NoSample").unwrap();
        assert_eq!(matched.handler, "index");
        assert_eq!(matched.route_name.as_deref(), Some("indexNoSample"));
        assert_eq!(matched.params.get_str("retry_message"), Some("No Sample Specified"));
        assert!(route.try_match("NoSample/").is_none());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Route::new("^match_(?P<broken/$", "get_match").unwrap_err();
        assert!(matches!(err, BuildError::InvalidPattern { .. }));
    }

    #[test]
    fn test_from_config() {
        let mut params = serde_json::Map::new();
        params.insert("retry_message".into(), "Gone".into());
        let config = RouteConfig {
            pattern: "^gone/$".into(),
            handler: "index".into(),
            name: Some("gone".into()),
            params,
        };

        let route = Route::from_config(&config).unwrap();
        assert_eq!(route.name(), Some("gone"));
        assert_eq!(route.params().get_str("retry_message"), Some("Gone"));
    }
}
