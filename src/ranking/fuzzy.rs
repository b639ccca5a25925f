use std::collections::HashSet;

use crate::core::Candidate;
use crate::ranking::distance::similarity;
use crate::ranking::keywords::{expand_keywords, MIN_KEYWORD_LEN};
use crate::ranking::{RankedCandidate, Ranker};

/// Score contributions of the local ranker. The defaults are tunable,
/// not invariants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Full query found verbatim in the searchable text
    pub exact_phrase: u32,
    /// Keyword found anywhere in the searchable text
    pub keyword_hit: u32,
    /// Upper bound of the per-word typo bonus, scaled by similarity
    pub fuzzy_scale: u32,
    /// Word contains keyword, or keyword contains word
    pub containment: u32,
    /// Similarity must be strictly above this for the typo bonus
    pub fuzzy_threshold: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact_phrase: 100,
            keyword_hit: 10,
            fuzzy_scale: 8,
            containment: 5,
            fuzzy_threshold: 0.6,
        }
    }
}

/// Local domain/keyword/typo-tolerant ranker
#[derive(Debug, Clone, Default)]
pub struct FuzzyRanker {
    weights: ScoringWeights,
}

impl FuzzyRanker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Relevance of one candidate. `query_lower` is the trimmed lowercase
    /// query and `keywords` its expansion.
    ///
    /// The per-word pass (typo and containment bonuses) only pairs words and
    /// keywords of at least [`MIN_KEYWORD_LEN`] chars, so initials such as
    /// the "j" of "J Smith" never match by containment.
    pub fn score(&self, query_lower: &str, keywords: &HashSet<String>, candidate: &Candidate) -> u32 {
        let text = candidate.searchable_text();
        if text.is_empty() || query_lower.is_empty() {
            return 0;
        }

        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|w| w.chars().count() >= MIN_KEYWORD_LEN)
            .collect();

        let mut score = 0;

        if text.contains(query_lower) {
            score += self.weights.exact_phrase;
        }

        for keyword in keywords {
            if text.contains(keyword.as_str()) {
                score += self.weights.keyword_hit;
            }

            if keyword.chars().count() < MIN_KEYWORD_LEN {
                continue;
            }

            for word in &words {
                score += self.word_score(word, keyword);
            }
        }

        score
    }

    /// Typo bonus plus containment bonus for one (word, keyword) pair
    fn word_score(&self, word: &str, keyword: &str) -> u32 {
        let mut score = 0;

        let sim = similarity(word, keyword);
        if sim > self.weights.fuzzy_threshold {
            score += (sim * self.weights.fuzzy_scale as f64).floor() as u32;
        }

        if word.contains(keyword) || keyword.contains(word) {
            score += self.weights.containment;
        }

        score
    }
}

impl Ranker for FuzzyRanker {
    fn rank(&self, query: &str, candidates: &[Candidate]) -> Vec<RankedCandidate> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        let keywords = expand_keywords(&query_lower);
        tracing::debug!("Expanded '{}' into {} keywords", query_lower, keywords.len());

        let mut ranked: Vec<RankedCandidate> = candidates
            .iter()
            .filter_map(|candidate| {
                let score = self.score(&query_lower, &keywords, candidate);
                (score > 0).then(|| RankedCandidate::new(candidate.clone(), score))
            })
            .collect();

        // Stable: equal scores keep input order
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        ranked
    }

    fn name(&self) -> &str {
        "fuzzy"
    }
}
