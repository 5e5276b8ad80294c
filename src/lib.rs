//! HitWalker2 URL router.
//!
//! Maps request paths to handlers through an ordered table of regex routes,
//! the way the HitWalker2 network/pathway browser declares its views.

pub mod admin;
pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use handlers::{Handler, HandlerRegistry, HandlerSet};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Match, Params, Route, Router, RoutingError};
