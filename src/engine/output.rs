//! JSON output shape for ranked results
//!
//! Field names match the public API of the recommender service.

use serde::Serialize;

use super::ranker::RankedResult;
use crate::catalog::JobPosting;

/// One posting as listed over the wire
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobListing {
    pub job_id: String,
    pub title: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub description: String,
    #[serde(rename = "Workplace")]
    pub workplace: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Department")]
    pub department: String,
    #[serde(rename = "Type")]
    pub employment_type: String,
    pub skills: Vec<String>,
    pub source: &'static str,
}

impl From<&JobPosting> for JobListing {
    fn from(job: &JobPosting) -> Self {
        Self {
            job_id: job.id.clone(),
            title: job.category.clone(),
            company_name: job.company_name.clone(),
            description: job.description.clone(),
            workplace: job.workplace_type.clone(),
            location: job.location.clone(),
            department: job.department.clone(),
            employment_type: job.employment_type.clone(),
            skills: job.skills_list.clone(),
            source: job.source.as_str(),
        }
    }
}

/// One recommendation: the listing plus its rounded score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub listing: JobListing,
    pub similarity: f64,
}

impl From<&RankedResult<'_>> for Recommendation {
    fn from(result: &RankedResult<'_>) -> Self {
        Self {
            listing: JobListing::from(result.job),
            similarity: round_similarity(result.similarity),
        }
    }
}

/// Round to 4 decimal places; non-finite becomes 0.0
pub fn round_similarity(score: f32) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    (f64::from(score) * 10_000.0).round() / 10_000.0
}

/// Convert a ranked list for serialization
pub fn to_recommendations(results: &[RankedResult<'_>]) -> Vec<Recommendation> {
    results.iter().map(Recommendation::from).collect()
}

/// Convert postings for a catalog listing, keeping their order
pub fn to_listings(postings: &[JobPosting]) -> Vec<JobListing> {
    postings.iter().map(JobListing::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::JobSource;

    fn posting() -> JobPosting {
        JobPosting {
            id: "6f1c".to_string(),
            company_name: "Globex LLC".to_string(),
            description: "streamline scalable platforms".to_string(),
            category: "Data Science".to_string(),
            workplace_type: "Hybrid".to_string(),
            location: "Denver, CO".to_string(),
            department: "Data Analytics".to_string(),
            employment_type: "Contract".to_string(),
            required_skill_ids: vec![1, 2],
            skills_list: vec!["Python".to_string(), "Pandas".to_string()],
            source: JobSource::Curated,
            source_priority: JobSource::Curated.priority(),
        }
    }

    #[test]
    fn test_round_similarity() {
        assert_eq!(round_similarity(0.70710677), 0.7071);
        assert_eq!(round_similarity(1.0), 1.0);
        assert_eq!(round_similarity(0.00004), 0.0);
        assert_eq!(round_similarity(f32::NAN), 0.0);
        assert_eq!(round_similarity(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_json_shape() {
        let job = posting();
        let result = RankedResult {
            job: &job,
            similarity: 0.83333,
        };

        let value = serde_json::to_value(Recommendation::from(&result)).unwrap();
        assert_eq!(value["job_id"], "6f1c");
        assert_eq!(value["title"], "Data Science");
        assert_eq!(value["companyName"], "Globex LLC");
        assert_eq!(value["Workplace"], "Hybrid");
        assert_eq!(value["Location"], "Denver, CO");
        assert_eq!(value["Department"], "Data Analytics");
        assert_eq!(value["Type"], "Contract");
        assert_eq!(value["skills"], serde_json::json!(["Python", "Pandas"]));
        assert_eq!(value["similarity"], 0.8333);
        assert_eq!(value["source"], "curated");

        // No nulls anywhere
        let object = value.as_object().unwrap();
        assert!(object.values().all(|v| !v.is_null()));
    }

    #[test]
    fn test_listing_has_no_similarity() {
        let job = posting();
        let value = serde_json::to_value(JobListing::from(&job)).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("similarity"));
        assert_eq!(value["job_id"], "6f1c");
        assert_eq!(value["Type"], "Contract");

        let ranked = serde_json::to_value(Recommendation::from(&RankedResult {
            job: &job,
            similarity: 0.5,
        }))
        .unwrap();
        let mut keys: Vec<_> = ranked.as_object().unwrap().keys().cloned().collect();
        keys.retain(|k| k != "similarity");
        let mut listing_keys: Vec<_> = object.keys().cloned().collect();
        keys.sort();
        listing_keys.sort();
        assert_eq!(keys, listing_keys);
    }
}
