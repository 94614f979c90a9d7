use anyhow::Result;

use skillmatch::seed::{seed_catalog, SeedOptions};
use skillmatch::AppConfig;

pub fn execute(config: &AppConfig, count: usize, seed: Option<u64>) -> Result<()> {
    let store = super::open_store(config)?;
    let report = seed_catalog(&store, &SeedOptions { count, seed })?;

    println!(
        "Seeded {} generated postings ({} skills registered) into {}",
        report.postings_inserted,
        report.skills_registered,
        config.catalog_path()?.display()
    );
    Ok(())
}
