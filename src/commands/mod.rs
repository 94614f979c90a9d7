pub mod add_job;
pub mod jobs;
pub mod recommend;
pub mod seed;
pub mod serve;
pub mod skills;
pub mod stats;

use anyhow::{Context, Result};
use skillmatch::{AppConfig, CatalogStore, Recommender};

/// Open the configured catalog
pub(crate) fn open_store(config: &AppConfig) -> Result<CatalogStore> {
    let path = config.catalog_path()?;
    CatalogStore::open(&path).with_context(|| format!("Failed to open catalog {}", path.display()))
}

/// Load the catalog and build a fresh engine
pub(crate) fn build_engine(config: &AppConfig) -> Result<Recommender> {
    let store = open_store(config)?;
    Recommender::from_source(&store, config.ranking.to_ranking_config())
        .context("Failed to load catalog for recommender")
}
