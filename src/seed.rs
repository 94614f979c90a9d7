//! Synthetic catalog seeding
//!
//! Registers every pool skill through the registry, then replaces the
//! generated collection with `count` random postings. Curated postings are
//! never touched.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashMap;

use crate::catalog::{CatalogStore, NewJob, SkillId, SkillRegistry};

/// Skill pools per category; categories without a pool draw from `Generic`
const SKILL_POOLS: &[(&str, &[&str])] = &[
    (
        "Engineering",
        &["Python", "Java", "C++", "JavaScript", "SQL", "Git", "Docker"],
    ),
    (
        "Data Science",
        &[
            "Python",
            "R",
            "SQL",
            "Machine Learning",
            "Data Visualization",
            "Pandas",
            "TensorFlow",
        ],
    ),
    (
        "Marketing",
        &[
            "SEO",
            "Content Creation",
            "Social Media",
            "Email Marketing",
            "Google Analytics",
        ],
    ),
    (
        "Finance",
        &["Financial Modeling", "Excel", "Accounting", "Risk Management"],
    ),
    (
        "Human Resources",
        &["Recruitment", "Onboarding", "Employee Relations", "HRIS"],
    ),
];

const GENERIC_POOL: &[&str] = &[
    "Communication",
    "Problem-Solving",
    "Teamwork",
    "Project Management",
];

const GENERIC_SKILL_COUNT: usize = 2;

const CATEGORIES: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "Human Resources",
    "Finance",
    "Data Science",
    "Operations",
];

const WORKPLACES: &[&str] = &["On-site", "Remote", "Hybrid"];

const DEPARTMENTS: &[&str] = &[
    "Software Development",
    "Product Marketing",
    "Talent Acquisition",
    "Financial Planning",
    "Data Analytics",
    "Logistics",
];

const JOB_TYPES: &[&str] = &["Full-time", "Part-time", "Contract", "Internship"];

const COMPANY_STEMS: &[&str] = &[
    "Acme", "Globex", "Initech", "Umbrella", "Hooli", "Vandelay", "Soylent", "Tyrell", "Cyberdyne",
    "Wonka", "Stark", "Wayne", "Oscorp", "Massive", "Aperture", "Gringotts",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Group", "and Sons", "Ltd", "Partners", "PLC"];

const PITCH_VERBS: &[&str] = &[
    "streamline", "synergize", "orchestrate", "monetize", "reinvent", "deploy", "scale",
    "empower", "integrate", "transform",
];

const PITCH_ADJECTIVES: &[&str] = &[
    "scalable", "end-to-end", "real-time", "mission-critical", "cross-platform", "data-driven",
    "customer-centric", "seamless", "robust",
];

const PITCH_NOUNS: &[&str] = &[
    "platforms", "pipelines", "experiences", "supply chains", "architectures", "markets",
    "channels", "solutions", "workflows",
];

const CITIES: &[(&str, &str)] = &[
    ("Austin", "TX"),
    ("Denver", "CO"),
    ("Seattle", "WA"),
    ("Boston", "MA"),
    ("Chicago", "IL"),
    ("Portland", "OR"),
    ("Atlanta", "GA"),
    ("Phoenix", "AZ"),
    ("Raleigh", "NC"),
    ("Madison", "WI"),
    ("San Diego", "CA"),
    ("Columbus", "OH"),
];

/// Options for a seeding run
#[derive(Debug, Clone, Copy)]
pub struct SeedOptions {
    /// Number of postings to generate
    pub count: usize,
    /// RNG seed for reproducible catalogs (None = random)
    pub seed: Option<u64>,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            count: 1000,
            seed: None,
        }
    }
}

/// What a seeding run wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub skills_registered: usize,
    pub postings_inserted: usize,
}

/// Every distinct skill name across all pools
pub fn all_pool_skills() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SKILL_POOLS
        .iter()
        .flat_map(|(_, pool)| pool.iter().copied())
        .chain(GENERIC_POOL.iter().copied())
        .collect();
    names.sort_unstable();
    names.dedup();
    names
}

/// Skill pool for a category
pub fn pool_for(category: &str) -> Option<&'static [&'static str]> {
    SKILL_POOLS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, pool)| *pool)
}

/// Register pool skills and replace the generated collection
pub fn seed_catalog(store: &CatalogStore, options: &SeedOptions) -> Result<SeedReport> {
    let registry = SkillRegistry::new(store);
    let names = all_pool_skills();
    let ids = registry
        .resolve_all(&names)
        .context("Failed to register seed skills")?;
    let skill_ids: HashMap<&str, SkillId> = names.iter().copied().zip(ids).collect();
    tracing::info!(skills = skill_ids.len(), "seed skills registered");

    let mut rng = match options.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let jobs = generate_postings(&mut rng, options.count, &skill_ids);

    let inserted = store
        .replace_generated(&jobs)
        .context("Failed to replace generated postings")?;
    tracing::info!(postings = inserted, "generated collection replaced");

    Ok(SeedReport {
        skills_registered: skill_ids.len(),
        postings_inserted: inserted,
    })
}

/// Generate `count` random postings referencing `skill_ids`
pub fn generate_postings(
    rng: &mut fastrand::Rng,
    count: usize,
    skill_ids: &HashMap<&str, SkillId>,
) -> Vec<NewJob> {
    (0..count)
        .map(|_| {
            let category = pick(rng, CATEGORIES);
            let skills = match pool_for(category) {
                Some(pool) => {
                    let k = rng.usize(2..=pool.len());
                    sample(rng, pool, k)
                }
                None => sample(rng, GENERIC_POOL, GENERIC_SKILL_COUNT),
            };
            let (city, state) = CITIES[rng.usize(..CITIES.len())];

            NewJob {
                company_name: Some(format!(
                    "{} {}",
                    pick(rng, COMPANY_STEMS),
                    pick(rng, COMPANY_SUFFIXES)
                )),
                description: Some(format!(
                    "{} {} {}",
                    pick(rng, PITCH_VERBS),
                    pick(rng, PITCH_ADJECTIVES),
                    pick(rng, PITCH_NOUNS)
                )),
                category: Some(category.to_string()),
                workplace_type: Some(pick(rng, WORKPLACES).to_string()),
                location: Some(format!("{}, {}", city, state)),
                department: Some(pick(rng, DEPARTMENTS).to_string()),
                employment_type: Some(pick(rng, JOB_TYPES).to_string()),
                skill_ids: skills
                    .iter()
                    .filter_map(|name| skill_ids.get(name).copied())
                    .collect(),
            }
        })
        .collect()
}

fn pick<'a>(rng: &mut fastrand::Rng, items: &[&'a str]) -> &'a str {
    items[rng.usize(..items.len())]
}

/// `k` distinct items in random order
fn sample<'a>(rng: &mut fastrand::Rng, items: &[&'a str], k: usize) -> Vec<&'a str> {
    let mut shuffled = items.to_vec();
    rng.shuffle(&mut shuffled);
    shuffled.truncate(k);
    shuffled
}
