//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (strip mount prefix, linear scan)
//!     → pattern.rs (full-match regex, extract captures)
//!     → params.rs (captures + static params)
//!     → Return: Match or NotFound
//!
//! Route Compilation (at startup and on reload):
//!     ServerConfig
//!     → table.rs (built-in HitWalker2 table) or [[routes]]
//!     → Compile patterns, index names
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - Static params override captured groups with the same name

pub mod error;
pub mod params;
pub mod pattern;
pub mod route;
pub mod router;
pub mod table;

pub use error::{BuildError, RoutingError};
pub use params::Params;
pub use pattern::RoutePattern;
pub use route::{Match, Route};
pub use router::Router;
