//! Recommendation service for skillmatch
//!
//! Provides HTTP endpoints for:
//! - Skill-list job recommendations (`POST /api/recommend`)
//! - Catalog listing, curated postings first (`GET /api/jobs`)
//! - Liveness and engine state (`GET /health`)
//!
//! Design: Blocking HTTP microserver (no async/tokio). The engine is built
//! once at startup and shared read-only across connection threads; new
//! catalog data needs a restart.

mod internal;
pub(crate) mod microserver;

use anyhow::{Context, Result};
use skillmatch::{catalog, AppConfig, Recommender};

/// Options for the serve command
pub struct ServeOptions {
    /// Host to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to bind to (default: 8000)
    pub port: u16,
}

/// Snapshot the catalog, build the engine and start the service
pub fn execute(config: &AppConfig, options: ServeOptions) -> Result<()> {
    let store = super::open_store(config)?;
    let postings = catalog::list_postings(&store).context("Failed to list catalog postings")?;
    let engine = Recommender::from_source(&store, config.ranking.to_ranking_config())
        .context("Failed to load catalog for recommender")?;

    internal::run_server(options, engine, &postings)
}
