//! TF-IDF term space over posting skill sets
//!
//! Each posting is one document; each full skill name is one token. Skill
//! lists are joined with [`SKILL_SEPARATOR`] and split back on
//! [`SKILL_DELIMITER`], so queries and postings tokenize identically and a
//! multi-word skill such as "machine learning" stays a single token.
//!
//! Weights use smoothed idf, `ln((1 + n) / (1 + df)) + 1`, and every vector is
//! L2-normalised. The vocabulary is frozen by [`TermSpace::fit`].

use std::collections::{BTreeSet, HashMap};

/// Token delimiter inside a joined skill document
pub const SKILL_DELIMITER: char = ',';

/// Separator used when joining a skill list into a document
pub const SKILL_SEPARATOR: &str = ", ";

/// Join skill names into one document
pub fn join_skills<S: AsRef<str>>(skills: &[S]) -> String {
    skills
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(SKILL_SEPARATOR)
}

/// Split a document into lowercased, trimmed, non-empty skill tokens
pub fn tokenize(document: &str) -> Vec<String> {
    document
        .to_lowercase()
        .split(SKILL_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Frozen vocabulary with per-term idf weights
#[derive(Debug, Clone)]
pub struct TermSpace {
    /// Sorted terms; position is the dimension index
    terms: Vec<String>,
    index: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TermSpace {
    /// Fit the vocabulary and idf weights on a corpus of skill lists
    pub fn fit<S: AsRef<str>>(corpus: &[Vec<S>]) -> Self {
        let documents: Vec<Vec<String>> = corpus
            .iter()
            .map(|skills| tokenize(&join_skills(skills)))
            .collect();

        let terms: Vec<String> = documents
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let index: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        let mut document_frequency = vec![0usize; terms.len()];
        for document in &documents {
            let unique: BTreeSet<usize> = document.iter().map(|t| index[t]).collect();
            for i in unique {
                document_frequency[i] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| (((1.0 + n) / (1.0 + df as f64)).ln() + 1.0) as f32)
            .collect();

        Self { terms, index, idf }
    }

    /// Project a skill list into the space
    ///
    /// Unknown skills contribute nothing; a list with no known skills maps to
    /// the zero vector.
    pub fn project<S: AsRef<str>>(&self, skills: &[S]) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.terms.len()];

        for token in tokenize(&join_skills(skills)) {
            if let Some(&i) = self.index.get(&token) {
                vector[i] += self.idf[i];
            }
        }

        let norm = vector.iter().map(|w| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for w in &mut vector {
                *w /= norm;
            }
        }
        vector
    }

    /// Number of dimensions
    pub fn dimension(&self) -> usize {
        self.terms.len()
    }

    /// Terms in dimension order
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Idf weight of a term, if it is in the vocabulary
    pub fn idf(&self, term: &str) -> Option<f32> {
        self.index
            .get(&term.trim().to_lowercase())
            .map(|&i| self.idf[i])
    }
}
