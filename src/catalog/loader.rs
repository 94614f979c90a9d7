//! Catalog loader - merged, fully resolved snapshot for the engine

use std::collections::HashMap;

use super::types::{defaults, JobPosting, JobRecord, JobSource, Skill, SkillId};
use crate::error::Result;

/// Read-only record source the loader pulls from
pub trait CatalogSource {
    /// All skill records
    fn skill_records(&self) -> Result<Vec<Skill>>;

    /// All posting records of one collection, in stored order
    fn job_records(&self, source: JobSource) -> Result<Vec<JobRecord>>;
}

/// Merged catalog snapshot
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Curated postings first, then generated, each in stored order
    pub postings: Vec<JobPosting>,
    /// Skill id -> display name
    pub skills: HashMap<SkillId, String>,
}

/// Result of a load attempt
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Catalog),
    /// No postings or no skills; the engine goes inactive
    NoData,
}

/// Load and resolve the whole catalog
///
/// Fails only when the source itself fails. Dangling skill ids are dropped
/// from `skills_list`; missing display fields get their sentinel defaults.
pub fn load<S: CatalogSource + ?Sized>(source: &S) -> Result<LoadOutcome> {
    let skills = skill_names(source)?;
    let records = ordered_records(source)?;

    if records.is_empty() || skills.is_empty() {
        return Ok(LoadOutcome::NoData);
    }

    let postings = resolve_records(records, &skills);
    Ok(LoadOutcome::Loaded(Catalog { postings, skills }))
}

/// Every posting, resolved the same way as `load`
///
/// Unlike `load` this never reports `NoData`: a catalog with postings but no
/// skills still lists its postings, with empty skill lists.
pub fn list_postings<S: CatalogSource + ?Sized>(source: &S) -> Result<Vec<JobPosting>> {
    let skills = skill_names(source)?;
    Ok(resolve_records(ordered_records(source)?, &skills))
}

fn skill_names<S: CatalogSource + ?Sized>(source: &S) -> Result<HashMap<SkillId, String>> {
    Ok(source
        .skill_records()?
        .into_iter()
        .map(|skill| (skill.id, skill.name))
        .collect())
}

/// Curated records first, then generated, each in stored order
fn ordered_records<S: CatalogSource + ?Sized>(source: &S) -> Result<Vec<(JobSource, JobRecord)>> {
    let mut records = Vec::new();
    for job_source in JobSource::ALL {
        records.extend(
            source
                .job_records(job_source)?
                .into_iter()
                .map(|record| (job_source, record)),
        );
    }
    Ok(records)
}

fn resolve_records(
    records: Vec<(JobSource, JobRecord)>,
    skills: &HashMap<SkillId, String>,
) -> Vec<JobPosting> {
    records
        .into_iter()
        .map(|(job_source, record)| resolve(record, job_source, skills))
        .collect()
}

fn resolve(record: JobRecord, source: JobSource, skills: &HashMap<SkillId, String>) -> JobPosting {
    let skills_list: Vec<String> = record
        .skill_ids
        .iter()
        .filter_map(|id| skills.get(id).cloned())
        .collect();

    let dropped = record.skill_ids.len() - skills_list.len();
    if dropped > 0 {
        tracing::debug!(job_id = %record.id, dropped, "dropped dangling skill references");
    }

    JobPosting {
        id: record.id,
        company_name: or_default(record.company_name, defaults::COMPANY_NAME),
        description: or_default(record.description, defaults::DESCRIPTION),
        category: or_default(record.category, defaults::CATEGORY),
        workplace_type: or_default(record.workplace_type, defaults::WORKPLACE_TYPE),
        location: or_default(record.location, defaults::LOCATION),
        department: or_default(record.department, defaults::DEPARTMENT),
        employment_type: or_default(record.employment_type, defaults::EMPLOYMENT_TYPE),
        required_skill_ids: record.skill_ids,
        skills_list,
        source,
        source_priority: source.priority(),
    }
}

/// Blank counts as missing
fn or_default(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SourcePriority;

    /// In-memory source for loader tests
    #[derive(Default)]
    struct FixtureSource {
        skills: Vec<Skill>,
        curated: Vec<JobRecord>,
        generated: Vec<JobRecord>,
    }

    impl CatalogSource for FixtureSource {
        fn skill_records(&self) -> Result<Vec<Skill>> {
            Ok(self.skills.clone())
        }

        fn job_records(&self, source: JobSource) -> Result<Vec<JobRecord>> {
            Ok(match source {
                JobSource::Curated => self.curated.clone(),
                JobSource::Generated => self.generated.clone(),
            })
        }
    }

    fn skill(id: SkillId, name: &str) -> Skill {
        Skill {
            id,
            name: name.to_string(),
            normalized_name: name.to_lowercase(),
        }
    }

    fn record(id: &str, skill_ids: Vec<SkillId>) -> JobRecord {
        JobRecord {
            id: id.to_string(),
            company_name: Some(format!("{} Corp", id)),
            skill_ids,
            ..Default::default()
        }
    }

    fn loaded(outcome: LoadOutcome) -> Catalog {
        match outcome {
            LoadOutcome::Loaded(catalog) => catalog,
            LoadOutcome::NoData => panic!("expected a loaded catalog"),
        }
    }

    #[test]
    fn test_curated_first_with_priority() {
        let source = FixtureSource {
            skills: vec![skill(1, "Python")],
            curated: vec![record("c1", vec![1])],
            generated: vec![record("g1", vec![1]), record("g2", vec![1])],
        };

        let catalog = loaded(load(&source).unwrap());
        let ids: Vec<_> = catalog.postings.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "g1", "g2"]);
        assert_eq!(catalog.postings[0].source_priority, SourcePriority::High);
        assert_eq!(catalog.postings[1].source_priority, SourcePriority::Low);
        assert_eq!(catalog.postings[2].source, JobSource::Generated);
    }

    #[test]
    fn test_dangling_references_dropped() {
        let source = FixtureSource {
            skills: vec![skill(1, "Python"), skill(2, "SQL")],
            generated: vec![record("g1", vec![1, 99, 2])],
            ..Default::default()
        };

        let catalog = loaded(load(&source).unwrap());
        let posting = &catalog.postings[0];
        assert_eq!(posting.skills_list, vec!["Python", "SQL"]);
        assert_eq!(posting.required_skill_ids, vec![1, 99, 2]);
    }

    #[test]
    fn test_missing_display_fields_defaulted() {
        let source = FixtureSource {
            skills: vec![skill(1, "Excel")],
            generated: vec![JobRecord {
                id: "bare".to_string(),
                location: Some("   ".to_string()),
                skill_ids: vec![1],
                ..Default::default()
            }],
            ..Default::default()
        };

        let catalog = loaded(load(&source).unwrap());
        let posting = &catalog.postings[0];
        assert_eq!(posting.category, "Unknown");
        assert_eq!(posting.company_name, "Unknown Company");
        assert_eq!(posting.workplace_type, "Not Specified");
        assert_eq!(posting.location, "Not Specified");
        assert_eq!(posting.employment_type, "Not Specified");
        assert_eq!(posting.department, "Not Specified");
        assert_eq!(posting.description, "");
    }

    #[test]
    fn test_no_postings_is_no_data() {
        let source = FixtureSource {
            skills: vec![skill(1, "Python")],
            ..Default::default()
        };
        assert!(matches!(load(&source).unwrap(), LoadOutcome::NoData));
    }

    #[test]
    fn test_no_skills_is_no_data() {
        let source = FixtureSource {
            curated: vec![record("c1", vec![1])],
            ..Default::default()
        };
        assert!(matches!(load(&source).unwrap(), LoadOutcome::NoData));
    }

    #[test]
    fn test_list_postings_without_skills() {
        let source = FixtureSource {
            curated: vec![record("c1", vec![7])],
            generated: vec![record("g1", Vec::new())],
            ..Default::default()
        };

        let postings = list_postings(&source).unwrap();
        let ids: Vec<_> = postings.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c1", "g1"]);
        assert!(postings[0].skills_list.is_empty());
        assert_eq!(postings[1].category, "Unknown");
    }

    #[test]
    fn test_list_postings_matches_load() {
        let source = FixtureSource {
            skills: vec![skill(1, "Rust"), skill(2, "Go")],
            curated: vec![record("c1", vec![2])],
            generated: vec![record("g1", vec![1, 2]), record("g2", vec![3])],
        };

        let listed = list_postings(&source).unwrap();
        let catalog = loaded(load(&source).unwrap());
        assert_eq!(listed, catalog.postings);
    }
}
