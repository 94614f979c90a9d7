//! Recommendation engine - TF-IDF term space, cosine ranking, JSON output
//!
//! Public interface:
//! - `Recommender` built once per catalog snapshot, queried with `recommend`
//! - `RankingConfig` for tiering and cutoff
//! - `Recommendation` / `to_recommendations` and `JobListing` / `to_listings`
//!   for the wire format

mod output;
mod ranker;
mod similarity;
mod term_space;

pub use output::{round_similarity, to_listings, to_recommendations, JobListing, Recommendation};
pub use ranker::{JobVector, RankedResult, RankingConfig, Recommender};
pub use similarity::cosine_similarity;
pub use term_space::{join_skills, tokenize, TermSpace};
