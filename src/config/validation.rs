//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check every route pattern compiles and names are unique
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::RoutePattern;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_format '{0}' is not one of: pretty, compact")]
    UnknownLogFormat(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("app.mount_prefix '{0}' must start and end with '/'")]
    InvalidMountPrefix(String),

    #[error("routes[{index}]: pattern is empty")]
    EmptyPattern { index: usize },

    #[error("routes[{index}]: pattern '{pattern}' does not compile: {reason}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        reason: String,
    },

    #[error("routes[{index}]: handler is empty")]
    EmptyHandler { index: usize },

    #[error("route name '{0}' is declared more than once")]
    DuplicateRouteName(String),

    #[error("admin.api_key must be set when the admin API is enabled")]
    MissingAdminKey,
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let obs = &config.observability;
    if !matches!(obs.log_format.as_str(), "pretty" | "compact") {
        errors.push(ValidationError::UnknownLogFormat(obs.log_format.clone()));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }

    let prefix = &config.app.mount_prefix;
    if !prefix.starts_with('/') || !prefix.ends_with('/') {
        errors.push(ValidationError::InvalidMountPrefix(prefix.clone()));
    }

    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern { index });
        } else if let Err(e) = RoutePattern::new(route.pattern.as_str()) {
            errors.push(ValidationError::InvalidPattern {
                index,
                pattern: route.pattern.clone(),
                reason: e.to_string(),
            });
        }

        if route.handler.trim().is_empty() {
            errors.push(ValidationError::EmptyHandler { index });
        }

        if let Some(name) = &route.name {
            if !names.insert(name.as_str()) {
                errors.push(ValidationError::DuplicateRouteName(name.clone()));
            }
        }
    }

    if config.admin.enabled && config.admin.api_key.is_empty() {
        errors.push(ValidationError::MissingAdminKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RouteConfig;

    fn route(pattern: &str, handler: &str, name: Option<&str>) -> RouteConfig {
        RouteConfig {
            pattern: pattern.to_string(),
            handler: handler.to_string(),
            name: name.map(str::to_string),
            params: Default::default(),
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.observability.log_format = "json".into();
        config.app.mount_prefix = "HitWalker2".into();
        config.admin.enabled = true;
        config.admin.api_key.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors.contains(&ValidationError::MissingAdminKey));
    }

    #[test]
    fn test_route_errors() {
        let mut config = ServerConfig::default();
        config.routes = vec![
            route("", "index", None),
            route("^(unclosed$", "index", None),
            route("^a/$", " ", Some("a")),
            route("^b/$", "b", Some("a")),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyPattern { index: 0 },
                ValidationError::InvalidPattern {
                    index: 1,
                    pattern: "^(unclosed$".into(),
                    reason: match RoutePattern::new("^(unclosed$") {
                        Err(e) => e.to_string(),
                        Ok(_) => unreachable!(),
                    },
                },
                ValidationError::EmptyHandler { index: 2 },
                ValidationError::DuplicateRouteName("a".into()),
            ]
        );
    }
}
