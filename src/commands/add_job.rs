use anyhow::{bail, Context, Result};
use clap::Args;

use skillmatch::catalog::NewJob;
use skillmatch::{AppConfig, JobSource, SkillRegistry};

/// Fields of a curated posting
#[derive(Args, Debug)]
pub struct AddJobArgs {
    /// Hiring company
    #[arg(long)]
    pub company: String,

    /// Job category, shown as the title
    #[arg(long)]
    pub category: String,

    /// Required skills, comma separated
    #[arg(long, value_delimiter = ',', required = true)]
    pub skills: Vec<String>,

    /// Job description
    #[arg(long)]
    pub description: Option<String>,

    /// On-site, Remote or Hybrid
    #[arg(long)]
    pub workplace: Option<String>,

    /// City, state
    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    /// Full-time, Part-time, Contract, Internship
    #[arg(long = "type")]
    pub employment_type: Option<String>,
}

pub fn execute(config: &AppConfig, args: AddJobArgs) -> Result<()> {
    let skills: Vec<&str> = args
        .skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if skills.is_empty() {
        bail!("At least one non-empty skill is required");
    }

    let store = super::open_store(config)?;
    let skill_ids = SkillRegistry::new(&store)
        .resolve_all(&skills)
        .context("Failed to register skills")?;

    let job = NewJob {
        company_name: Some(args.company),
        description: args.description,
        category: Some(args.category),
        workplace_type: args.workplace,
        location: args.location,
        department: args.department,
        employment_type: args.employment_type,
        skill_ids,
    };

    let id = store
        .insert_job(JobSource::Curated, &job)
        .context("Failed to store curated posting")?;
    tracing::info!(job_id = %id, skills = skills.len(), "curated posting created");

    println!("Created curated posting {}", id);
    Ok(())
}
