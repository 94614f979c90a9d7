pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod paths;
pub mod seed;

// Re-export commonly used types
pub use catalog::{CatalogStore, JobPosting, JobSource, SkillRegistry, SourcePriority};
pub use config::AppConfig;
pub use engine::{RankedResult, RankingConfig, Recommender};
pub use error::CatalogError;
