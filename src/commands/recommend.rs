use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use skillmatch::engine::to_recommendations;
use skillmatch::{AppConfig, RankedResult, SourcePriority};

pub fn execute(config: &AppConfig, skills: &[String], json: bool) -> Result<()> {
    let engine = super::build_engine(config)?;
    let results = engine.recommend(skills);

    if json {
        let output = json!({ "recommendations": to_recommendations(&results) });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if !engine.is_active() {
        println!("{}", "Catalog is empty. Run `skillmatch seed` first.".yellow());
        return Ok(());
    }

    if results.is_empty() {
        println!("No matching jobs for: {}", skills.join(", "));
        return Ok(());
    }

    println!(
        "{} matches for {}\n",
        results.len(),
        skills.join(", ").bold()
    );
    for (rank, result) in results.iter().enumerate() {
        print_result(rank + 1, result);
    }

    Ok(())
}

fn print_result(rank: usize, result: &RankedResult<'_>) {
    let job = result.job;
    let tier = match job.source_priority {
        SourcePriority::High => "curated".green(),
        SourcePriority::Low => "generated".dimmed(),
    };

    println!(
        "{:>3}. {:.4}  {} at {} [{}]",
        rank,
        result.similarity,
        job.category.bold(),
        job.company_name,
        tier
    );
    println!(
        "     {} | {} | {}",
        job.workplace_type, job.location, job.employment_type
    );
    println!("     {}", job.skills_list.join(", ").cyan());
}
