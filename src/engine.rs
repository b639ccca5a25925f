use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{Config, DEFAULT_SEMANTIC_TIMEOUT_MS};
use crate::core::{Candidate, DirectoryResponse, RankingMethod, SearchResponse};
use crate::error::{Result, SearchError};
use crate::ranking::semantic::resolve_indices;
use crate::ranking::{FallbackReason, FuzzyRanker, GeminiRanker, Ranker, SemanticOutcome, SemanticRanker};
use crate::store::{CandidateStore, DirectoryFilter, SqliteStore, StoreStats};

/// Search options/configuration
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Hard bound on a semantic ranking call; on expiry the call is dropped
    pub semantic_timeout: Duration,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            semantic_timeout: Duration::from_millis(DEFAULT_SEMANTIC_TIMEOUT_MS),
        }
    }
}

/// Main alumni search orchestrator
pub struct SearchEngine {
    store: Arc<dyn CandidateStore>,
    ranker: Arc<dyn Ranker>,
    semantic: Option<Arc<dyn SemanticRanker>>,
    options: SearchOptions,
}

impl SearchEngine {
    /// Engine over `store` with the local fuzzy ranker only
    pub fn new(store: Arc<dyn CandidateStore>) -> Self {
        Self {
            store,
            ranker: Arc::new(FuzzyRanker::new()),
            semantic: None,
            options: SearchOptions::default(),
        }
    }

    /// SQLite store at `config.db_path`, Gemini ranking when a key is configured
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(&config.db_path)?);
        let mut engine = Self::new(store);

        if let Some(semantic) = &config.semantic {
            let gemini = GeminiRanker::new(semantic)?;
            tracing::info!("✅ Semantic ranker initialized ({})", semantic.model);
            engine = engine
                .with_semantic_ranker(Arc::new(gemini))
                .with_options(SearchOptions {
                    semantic_timeout: semantic.timeout,
                });
        } else {
            tracing::info!("Semantic ranker disabled, using local fuzzy ranking");
        }

        Ok(engine)
    }

    pub fn with_ranker(mut self, ranker: Arc<dyn Ranker>) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_semantic_ranker(mut self, ranker: Arc<dyn SemanticRanker>) -> Self {
        self.semantic = Some(ranker);
        self
    }

    pub fn with_options(mut self, options: SearchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn is_semantic_enabled(&self) -> bool {
        self.semantic.is_some()
    }

    /// Rank verified alumni against `query`.
    ///
    /// Uses the semantic ranker when one is configured and it produces an
    /// ordering; otherwise, and on any semantic failure, the local ranker.
    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        let query = validate_query(query)?;
        let start = Instant::now();

        let candidates = self.fetch_candidates().await?;

        let response = match self.rank_semantically(query, &candidates).await {
            Some(ranked) => SearchResponse::new(ranked, RankingMethod::Semantic),
            None => self.rank_locally(query, &candidates),
        };

        tracing::info!(
            "🔍 '{}' → {} of {} alumni [{}] ({:.2}ms)",
            query,
            response.count,
            candidates.len(),
            response.ranking_method().as_str(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(response)
    }

    /// Same as [`SearchEngine::search`] but never calls the semantic ranker
    pub async fn search_local(&self, query: &str) -> Result<SearchResponse> {
        let query = validate_query(query)?;
        let candidates = self.fetch_candidates().await?;
        Ok(self.rank_locally(query, &candidates))
    }

    /// Public directory listing
    pub async fn directory(&self, filter: &DirectoryFilter) -> Result<DirectoryResponse> {
        let alumni = self.store.directory(filter).await?;
        Ok(DirectoryResponse::new(alumni))
    }

    /// Set the verification flag of one alumni record
    pub async fn verify(&self, id: i64, verified: bool) -> Result<()> {
        if !self.store.set_verified(id, verified).await? {
            return Err(SearchError::NotFound(id.to_string()));
        }

        tracing::info!("Alumni {} {}", id, if verified { "verified" } else { "unverified" });
        Ok(())
    }

    /// Insert or replace records; returns how many were written
    pub async fn import(&self, alumni: &[Candidate]) -> Result<usize> {
        for alumnus in alumni {
            self.store.upsert(alumnus).await?;
        }
        Ok(alumni.len())
    }

    /// Get store statistics
    pub async fn stats(&self) -> Result<StoreStats> {
        self.store.stats().await
    }

    /// Verified candidates; a failed fetch is retried once before giving up
    async fn fetch_candidates(&self) -> Result<Vec<Candidate>> {
        match self.store.verified_candidates().await {
            Ok(candidates) => Ok(candidates),
            Err(e) => {
                tracing::warn!("⚠️ Candidate fetch failed, retrying once: {}", e);
                self.store.verified_candidates().await.map_err(|e| {
                    tracing::error!("❌ Candidate fetch failed again: {}", e);
                    e
                })
            }
        }
    }

    /// Ordered candidates from the semantic ranker, or None to fall back
    async fn rank_semantically(&self, query: &str, candidates: &[Candidate]) -> Option<Vec<Candidate>> {
        let semantic = self.semantic.as_ref()?;
        if candidates.is_empty() {
            return None;
        }

        let timeout = self.options.semantic_timeout;
        let outcome = tokio::time::timeout(timeout, semantic.rank(query, candidates))
            .await
            .unwrap_or_else(|_| {
                SemanticOutcome::Fallback(FallbackReason::Timeout(timeout.as_millis() as u64))
            });

        match outcome {
            SemanticOutcome::Ranked(indices) => {
                let ranked = resolve_indices(&indices, candidates);
                tracing::debug!(
                    "{} returned {} indices, {} usable",
                    semantic.name(),
                    indices.len(),
                    ranked.len()
                );
                Some(ranked)
            }
            SemanticOutcome::Fallback(reason) => {
                tracing::warn!(
                    "⚠️ {} unavailable, using {} ranker: {}",
                    semantic.name(),
                    self.ranker.name(),
                    reason
                );
                None
            }
        }
    }

    fn rank_locally(&self, query: &str, candidates: &[Candidate]) -> SearchResponse {
        SearchResponse::new(self.ranker.search(query, candidates), RankingMethod::Fuzzy)
    }
}

/// Trimmed query, or `EmptyQuery` when nothing is left
fn validate_query(query: &str) -> Result<&str> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(SearchError::EmptyQuery);
    }
    Ok(trimmed)
}
