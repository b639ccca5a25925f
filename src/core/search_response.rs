use serde::{Deserialize, Serialize};
use crate::core::Candidate;

/// Which strategy produced a result list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankingMethod {
    /// External language-understanding service
    Semantic,
    /// Local domain/fuzzy ranker
    Fuzzy,
}

impl RankingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RankingMethod::Semantic => "semantic",
            RankingMethod::Fuzzy => "fuzzy",
        }
    }
}

/// Body returned by the search entry point
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,

    /// Number of candidates in `data`
    pub count: usize,

    /// Ranked candidates, most relevant first
    pub data: Vec<Candidate>,

    /// Result came from the external semantic service
    pub ai_powered: bool,

    /// Result came from the local domain/fuzzy ranker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuzzy_match: Option<bool>,
}

impl SearchResponse {
    /// Create a successful response for the given strategy
    pub fn new(data: Vec<Candidate>, method: RankingMethod) -> Self {
        let (ai_powered, fuzzy_match) = match method {
            RankingMethod::Semantic => (true, None),
            RankingMethod::Fuzzy => (false, Some(true)),
        };

        Self {
            success: true,
            count: data.len(),
            data,
            ai_powered,
            fuzzy_match,
        }
    }

    /// Strategy that produced this response
    pub fn ranking_method(&self) -> RankingMethod {
        if self.ai_powered {
            RankingMethod::Semantic
        } else {
            RankingMethod::Fuzzy
        }
    }
}

/// Body returned by the public directory listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<Candidate>,
}

impl DirectoryResponse {
    pub fn new(data: Vec<Candidate>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

/// Body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
