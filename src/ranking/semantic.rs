use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

use crate::config::SemanticConfig;
use crate::core::Candidate;
use crate::error::{Result, SearchError};

/// Bracketed, comma-separated unsigned integers, e.g. `[0, 3, 7]`
static INDEX_ARRAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[[0-9,\s]*\]").expect("index array pattern is valid")
});

/// Why a semantic ranking attempt produced no usable ordering
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FallbackReason {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("response carried no text content")]
    MissingContent,

    #[error("no index array in reply")]
    NoIndexArray,

    #[error("timed out after {0} ms")]
    Timeout(u64),
}

/// Result of one semantic ranking attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SemanticOutcome {
    /// Candidate indices, most relevant first. Not yet bounds-checked.
    Ranked(Vec<usize>),
    /// Use the local ranker instead
    Fallback(FallbackReason),
}

/// External ranking service: candidates + query in, ordered indices out
#[async_trait]
pub trait SemanticRanker: Send + Sync {
    async fn rank(&self, query: &str, candidates: &[Candidate]) -> SemanticOutcome;

    /// Get ranker name for logging
    fn name(&self) -> &str;
}

/// Find the first index array in free text and parse it.
///
/// Integers too large for `usize` are dropped like any other out-of-range
/// index; the rest of the array is kept.
pub fn extract_indices(text: &str) -> std::result::Result<Vec<usize>, FallbackReason> {
    let found = INDEX_ARRAY.find(text).ok_or(FallbackReason::NoIndexArray)?;

    let numbers: Vec<serde_json::Number> = serde_json::from_str(found.as_str())
        .map_err(|e| FallbackReason::MalformedResponse(format!("{}: {}", found.as_str(), e)))?;

    Ok(numbers
        .iter()
        .filter_map(serde_json::Number::as_u64)
        .filter_map(|n| usize::try_from(n).ok())
        .collect())
}

/// Map indices to candidates in the given order, dropping indices outside
/// `[0, candidates.len())` and repeated indices.
pub fn resolve_indices(indices: &[usize], candidates: &[Candidate]) -> Vec<Candidate> {
    let mut seen = HashSet::new();

    indices
        .iter()
        .copied()
        .filter(|&idx| idx < candidates.len() && seen.insert(idx))
        .map(|idx| candidates[idx].clone())
        .collect()
}

/// Prompt asking the service for the `top_n` most relevant candidate indices
pub fn build_prompt(query: &str, candidates: &[Candidate], top_n: usize) -> String {
    let profiles: Vec<String> = candidates
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            format!(
                "{}. {} - {} at {}, {} graduate from {}, located in {}",
                idx,
                c.name.as_deref().unwrap_or("N/A"),
                c.field.as_deref().unwrap_or("N/A"),
                c.company.as_deref().unwrap_or("N/A"),
                c.branch.as_deref().unwrap_or("N/A"),
                c.graduation_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "N/A".to_string()),
                c.location().unwrap_or_else(|| "Unknown".to_string()),
            )
        })
        .collect();

    format!(
        "Search query: \"{query}\"\n\
         \n\
         Alumni profiles:\n\
         {profiles}\n\
         \n\
         Pick the alumni most relevant to the query. Queries can be broad, such as \
         \"chip design\", \"construction\", \"AI\" or \"web development\". Consider each \
         person's field of work, their company, and their branch (CSE for software, ECE \
         for electronics, ME for mechanical, CV for civil and construction).\n\
         \n\
         Reply with ONLY a JSON array of the profile numbers, most relevant first, at most \
         {top_n} entries, for example [0, 3, 7]. Reply [] if nobody matches.",
        query = query,
        profiles = profiles.join("\n"),
        top_n = top_n,
    )
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

/// Gemini `generateContent` client
pub struct GeminiRanker {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    timeout: Duration,
    top_n: usize,
}

impl GeminiRanker {
    /// Create new Gemini ranker
    pub fn new(config: &SemanticConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(SearchError::Config("semantic api key is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout.min(Duration::from_secs(3)))
            .build()
            .map_err(SearchError::HttpRequest)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
            top_n: config.top_n,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }

    /// Send the prompt and return the reply text
    async fn generate(&self, prompt: String) -> std::result::Result<String, FallbackReason> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        // Key in a header, never in the URL
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_failure(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FallbackReason::Status(status.as_u16()));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| FallbackReason::MalformedResponse(e.to_string()))?;

        body.into_text().ok_or(FallbackReason::MissingContent)
    }

    fn transport_failure(&self, e: reqwest::Error) -> FallbackReason {
        if e.is_timeout() {
            FallbackReason::Timeout(self.timeout.as_millis() as u64)
        } else {
            FallbackReason::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl SemanticRanker for GeminiRanker {
    async fn rank(&self, query: &str, candidates: &[Candidate]) -> SemanticOutcome {
        let prompt = build_prompt(query, candidates, self.top_n);

        let text = match self.generate(prompt).await {
            Ok(text) => text,
            Err(reason) => return SemanticOutcome::Fallback(reason),
        };
        tracing::debug!("Semantic reply: {}", text);

        match extract_indices(&text) {
            Ok(indices) => SemanticOutcome::Ranked(indices),
            Err(reason) => SemanticOutcome::Fallback(reason),
        }
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
