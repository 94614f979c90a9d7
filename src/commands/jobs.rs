use anyhow::{Context, Result};
use colored::Colorize;
use serde_json::json;

use skillmatch::catalog;
use skillmatch::engine::to_listings;
use skillmatch::{AppConfig, SourcePriority};

/// List every posting, curated first, in catalog load order
pub fn execute(config: &AppConfig, json: bool) -> Result<()> {
    let store = super::open_store(config)?;
    let postings = catalog::list_postings(&store).context("Failed to list catalog postings")?;

    if json {
        let output = json!({ "count": postings.len(), "jobs": to_listings(&postings) });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if postings.is_empty() {
        println!("{}", "Catalog has no postings. Run `skillmatch seed` first.".yellow());
        return Ok(());
    }

    for job in &postings {
        let tier = match job.source_priority {
            SourcePriority::High => "curated".green(),
            SourcePriority::Low => "generated".dimmed(),
        };
        println!(
            "{}  {} at {} [{}]",
            job.id.dimmed(),
            job.category.bold(),
            job.company_name,
            tier
        );
        println!("     {}", job.skills_list.join(", ").cyan());
    }
    println!("\n{} jobs", postings.len());
    Ok(())
}
