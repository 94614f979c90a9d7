use anyhow::Result;
use serde_json::json;

use skillmatch::{AppConfig, Recommender};

pub fn execute(config: &AppConfig, json: bool) -> Result<()> {
    let store = super::open_store(config)?;
    let counts = store.counts()?;
    let ranking = config.ranking.to_ranking_config();
    let engine = Recommender::from_source(&store, ranking)?;

    if json {
        let output = json!({
            "catalog": config.catalog_path()?.display().to_string(),
            "counts": counts,
            "engine": {
                "active": engine.is_active(),
                "postings": engine.posting_count(),
                "vocabulary": engine.vocabulary_size(),
                "priority_tiers": ranking.priority_tiers,
                "limit": ranking.limit,
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Catalog: {}", config.catalog_path()?.display());
    println!("  skills:    {}", counts.skills);
    println!("  curated:   {}", counts.curated);
    println!("  generated: {}", counts.generated);
    println!(
        "Engine: {}",
        if engine.is_active() { "active" } else { "inactive" }
    );
    println!("  postings:   {}", engine.posting_count());
    println!("  vocabulary: {}", engine.vocabulary_size());
    println!(
        "  ranking:    priority_tiers={} limit={}",
        ranking.priority_tiers, ranking.limit
    );
    Ok(())
}
