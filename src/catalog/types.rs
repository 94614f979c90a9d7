use serde::{Deserialize, Serialize};

/// Skill identifier (SQLite rowid of the `skills` table)
pub type SkillId = i64;

/// Sentinel values for display fields missing from a stored posting
pub mod defaults {
    pub const CATEGORY: &str = "Unknown";
    pub const COMPANY_NAME: &str = "Unknown Company";
    pub const WORKPLACE_TYPE: &str = "Not Specified";
    pub const LOCATION: &str = "Not Specified";
    pub const EMPLOYMENT_TYPE: &str = "Not Specified";
    pub const DEPARTMENT: &str = "Not Specified";
    pub const DESCRIPTION: &str = "";
}

/// A registered skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skill {
    pub id: SkillId,
    /// Name as first registered (trimmed)
    pub name: String,
    /// Lowercased identity key, unique across the registry
    pub normalized_name: String,
}

/// Which collection a posting was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobSource {
    /// Manually created postings (`created_jobs`)
    Curated,
    /// Synthetic postings written by the seeder (`jobs`)
    Generated,
}

impl JobSource {
    /// Load order: curated first
    pub const ALL: [JobSource; 2] = [JobSource::Curated, JobSource::Generated];

    pub fn table_name(&self) -> &'static str {
        match self {
            JobSource::Curated => "created_jobs",
            JobSource::Generated => "jobs",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobSource::Curated => "curated",
            JobSource::Generated => "generated",
        }
    }

    pub fn priority(&self) -> SourcePriority {
        match self {
            JobSource::Curated => SourcePriority::High,
            JobSource::Generated => SourcePriority::Low,
        }
    }
}

/// Coarse ranking tier applied before similarity
///
/// Declaration order gives `Low < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcePriority {
    Low,
    High,
}

/// Raw posting row as stored; any display field may be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobRecord {
    pub id: String,
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub workplace_type: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub employment_type: Option<String>,
    pub skill_ids: Vec<SkillId>,
}

/// Posting to insert into either collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewJob {
    pub company_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub workplace_type: Option<String>,
    pub location: Option<String>,
    pub department: Option<String>,
    pub employment_type: Option<String>,
    pub skill_ids: Vec<SkillId>,
}

/// Fully populated posting as seen by the engine
///
/// Built once by the loader; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPosting {
    pub id: String,
    pub company_name: String,
    pub description: String,
    pub category: String,
    pub workplace_type: String,
    pub location: String,
    pub department: String,
    pub employment_type: String,
    /// References as stored, dangling ids included
    pub required_skill_ids: Vec<SkillId>,
    /// Resolved skill names, dangling ids dropped
    pub skills_list: Vec<String>,
    pub source: JobSource,
    pub source_priority: SourcePriority,
}
