//! HitWalker2 URL router (v1)
//!
//! Serves the HitWalker2 route table over HTTP with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │               HITWALKER ROUTER               │
//!                         │                                              │
//!     Client Request      │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ────────────────────┼─▶│  http   │───▶│ routing  │───▶│ handler │  │
//!                         │  │ server  │    │  Router  │    │ registry│  │
//!                         │  └─────────┘    └──────────┘    └────┬────┘  │
//!                         │                                      │       │
//!     Client Response     │                                      ▼       │
//!     ◀───────────────────┼───────────────────────────────── Handler     │
//!                         │                                              │
//!                         │  ┌────────────────────────────────────────┐  │
//!                         │  │        Cross-Cutting Concerns          │  │
//!                         │  │  config + watcher │ observability      │  │
//!                         │  │  admin API        │ lifecycle          │  │
//!                         │  └────────────────────────────────────────┘  │
//!                         └──────────────────────────────────────────────┘
//! ```
//!
//! Views are served by the echo handler, which reports each dispatch.

use std::path::PathBuf;

use clap::Parser;
use hitwalker_router::handlers::HandlerRegistry;
use hitwalker_router::lifecycle::startup;

#[derive(Parser)]
#[command(name = "hitwalker-router")]
#[command(about = "Serve the HitWalker2 route table", long_about = None)]
struct Args {
    /// Path to a TOML config file. Watched for changes.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    startup::run(args.config, HandlerRegistry::echo()).await?;
    Ok(())
}
