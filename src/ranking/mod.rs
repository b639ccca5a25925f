pub mod distance;
pub mod domain;
pub mod fuzzy;
pub mod keywords;
pub mod semantic;

use crate::core::Candidate;

pub use fuzzy::{FuzzyRanker, ScoringWeights};
pub use keywords::expand_keywords;
pub use semantic::{FallbackReason, GeminiRanker, SemanticOutcome, SemanticRanker};

/// Trait for local ranking implementations
pub trait Ranker: Send + Sync {
    /// Relevant candidates sorted by score (highest first). Candidates that
    /// do not match at all are left out.
    fn rank(&self, query: &str, candidates: &[Candidate]) -> Vec<RankedCandidate>;

    /// Get ranker name for logging
    fn name(&self) -> &str;

    /// Same ordering as [`Ranker::rank`] with the scores dropped
    fn search(&self, query: &str, candidates: &[Candidate]) -> Vec<Candidate> {
        self.rank(query, candidates)
            .into_iter()
            .map(|ranked| ranked.candidate)
            .collect()
    }
}

/// Candidate with its relevance score. The score only orders results and
/// never leaves the crate's responses.
#[derive(Debug, Clone)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub score: u32,
}

impl RankedCandidate {
    pub fn new(candidate: Candidate, score: u32) -> Self {
        Self { candidate, score }
    }
}
