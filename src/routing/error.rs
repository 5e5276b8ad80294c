//! Routing error types.

use thiserror::Error;

/// Errors produced while resolving, dispatching or reversing a path.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// No route pattern matches the requested path.
    #[error("no route matches path '{0}'")]
    NotFound(String),

    /// Reverse lookup for a name no route carries.
    #[error("no route is named '{0}'")]
    UnknownName(String),

    /// Reverse lookup without a value for one of the route's groups.
    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },

    /// Reverse lookup with a value the route has no group for.
    #[error("route '{route}' has no parameter '{param}'")]
    UnexpectedParam { route: String, param: String },

    /// Reverse lookup with a value its group would not match.
    #[error("value '{value}' for parameter '{param}' of route '{route}' does not match '{pattern}'")]
    InvalidParam {
        route: String,
        param: String,
        value: String,
        pattern: String,
    },

    /// The route pattern cannot be turned back into a path.
    #[error("route '{route}' cannot be reversed: {reason}")]
    NotReversible { route: String, reason: String },

    /// A route matched but no handler serves its handler id.
    #[error("handler '{0}' is not registered")]
    HandlerNotRegistered(String),
}

/// Errors produced while building a router.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The pattern does not compile.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Two routes share a name, making reverse lookup ambiguous.
    #[error("route name '{0}' is declared more than once")]
    DuplicateName(String),

    #[error("mount prefix '{0}' must start and end with '/'")]
    InvalidMountPrefix(String),
}
