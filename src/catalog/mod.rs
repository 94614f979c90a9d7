//! Job catalog - skills, curated postings and generated postings
//!
//! Public interface:
//! - `CatalogStore` SQLite document store (the persistence collaborator)
//! - `SkillRegistry` case-insensitive find-or-create for skill names
//! - `load` / `LoadOutcome` merged, resolved snapshot for the engine
//! - `list_postings` the same snapshot for catalog listings
//! - `CatalogSource` trait the loader reads through

mod loader;
mod registry;
mod store;
mod types;

pub use loader::{list_postings, load, Catalog, CatalogSource, LoadOutcome};
pub use registry::{normalize_skill_name, SkillRegistry};
pub use store::{CatalogCounts, CatalogStore};
pub use types::{
    defaults, JobPosting, JobRecord, JobSource, NewJob, Skill, SkillId, SourcePriority,
};
