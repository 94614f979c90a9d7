//! Recommender - frozen term space plus priority-aware cosine ranking

use rayon::prelude::*;
use std::cmp::Ordering;
use std::time::Instant;

use super::similarity::cosine_similarity;
use super::term_space::TermSpace;
use crate::catalog::{self, CatalogSource, JobPosting, LoadOutcome};
use crate::error::Result;

/// Ranking parameters
///
/// The ranking key is always `(priority, score, load order)`; with
/// `priority_tiers` off every posting sits in one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    /// Rank curated postings ahead of generated ones
    pub priority_tiers: bool,
    /// Maximum number of results
    pub limit: usize,
}

impl RankingConfig {
    /// Cutoff when curated and generated postings are tiered
    pub const TIERED_LIMIT: usize = 50;
    /// Cutoff for a single undifferentiated collection
    pub const SINGLE_TIER_LIMIT: usize = 10;

    pub fn tiered() -> Self {
        Self {
            priority_tiers: true,
            limit: Self::TIERED_LIMIT,
        }
    }

    pub fn single_tier() -> Self {
        Self {
            priority_tiers: false,
            limit: Self::SINGLE_TIER_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self::tiered()
    }
}

/// A posting with its term-space vector
#[derive(Debug, Clone)]
pub struct JobVector {
    pub posting: JobPosting,
    pub vector: Vec<f32>,
}

/// One ranked match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedResult<'a> {
    pub job: &'a JobPosting,
    pub similarity: f32,
}

#[derive(Debug)]
enum EngineState {
    /// Built from an empty catalog; every query returns nothing
    Inactive,
    Active {
        space: TermSpace,
        jobs: Vec<JobVector>,
    },
}

/// Immutable recommendation engine
///
/// Built once from a catalog snapshot. `recommend` only reads, so one
/// instance can be shared across threads behind an `Arc` without locking.
/// Picking up new catalog data means building a new instance.
#[derive(Debug)]
pub struct Recommender {
    state: EngineState,
    config: RankingConfig,
}

impl Recommender {
    /// Engine with no corpus
    pub fn inactive(config: RankingConfig) -> Self {
        Self {
            state: EngineState::Inactive,
            config,
        }
    }

    /// Load the catalog from `source` and build the engine
    ///
    /// Errors only if the source cannot be read.
    pub fn from_source<S: CatalogSource + ?Sized>(source: &S, config: RankingConfig) -> Result<Self> {
        Ok(Self::build(catalog::load(source)?, config))
    }

    /// Build the engine from a load outcome
    pub fn build(outcome: LoadOutcome, config: RankingConfig) -> Self {
        let catalog = match outcome {
            LoadOutcome::Loaded(catalog) => catalog,
            LoadOutcome::NoData => {
                tracing::warn!("no postings or skills in catalog, recommender inactive");
                return Self::inactive(config);
            }
        };
        Self::from_postings(catalog.postings, config)
    }

    /// Build the engine directly from resolved postings
    pub fn from_postings(postings: Vec<JobPosting>, config: RankingConfig) -> Self {
        if postings.is_empty() {
            tracing::warn!("empty posting set, recommender inactive");
            return Self::inactive(config);
        }

        let started = Instant::now();
        let corpus: Vec<Vec<&str>> = postings
            .iter()
            .map(|p| p.skills_list.iter().map(String::as_str).collect())
            .collect();
        let space = TermSpace::fit(&corpus);

        let jobs: Vec<JobVector> = postings
            .into_iter()
            .map(|posting| {
                let vector = space.project(&posting.skills_list);
                JobVector { posting, vector }
            })
            .collect();

        tracing::info!(
            postings = jobs.len(),
            vocabulary = space.dimension(),
            priority_tiers = config.priority_tiers,
            limit = config.limit,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "recommender built"
        );

        Self {
            state: EngineState::Active { space, jobs },
            config,
        }
    }

    /// Rank postings against a query skill list
    ///
    /// Only postings with similarity strictly above zero are returned, ordered
    /// by priority tier, then similarity, then load order.
    pub fn recommend<S: AsRef<str>>(&self, query_skills: &[S]) -> Vec<RankedResult<'_>> {
        let EngineState::Active { space, jobs } = &self.state else {
            return Vec::new();
        };

        let started = Instant::now();
        let query = space.project(query_skills);

        // Collect keeps index order, so the stable sort below still sees load order
        let mut scored: Vec<(usize, f32)> = jobs
            .par_iter()
            .enumerate()
            .map(|(i, job)| (i, cosine_similarity(&query, &job.vector)))
            .filter(|&(_, score)| score > 0.0)
            .collect();

        scored.sort_by(|a, b| {
            self.tier_order(&jobs[a.0], &jobs[b.0])
                .then_with(|| b.1.total_cmp(&a.1))
        });
        scored.truncate(self.config.limit);

        tracing::debug!(
            query_terms = query_skills.len(),
            results = scored.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "recommend"
        );

        scored
            .into_iter()
            .map(|(i, similarity)| RankedResult {
                job: &jobs[i].posting,
                similarity,
            })
            .collect()
    }

    /// Higher tier first; equal when tiers are disabled
    fn tier_order(&self, a: &JobVector, b: &JobVector) -> Ordering {
        if self.config.priority_tiers {
            b.posting.source_priority.cmp(&a.posting.source_priority)
        } else {
            Ordering::Equal
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EngineState::Active { .. })
    }

    /// Number of indexed postings (0 when inactive)
    pub fn posting_count(&self) -> usize {
        match &self.state {
            EngineState::Active { jobs, .. } => jobs.len(),
            EngineState::Inactive => 0,
        }
    }

    /// Vocabulary size (0 when inactive)
    pub fn vocabulary_size(&self) -> usize {
        match &self.state {
            EngineState::Active { space, .. } => space.dimension(),
            EngineState::Inactive => 0,
        }
    }

    pub fn config(&self) -> RankingConfig {
        self.config
    }
}
