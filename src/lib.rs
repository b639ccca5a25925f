//! # Alumni Search Engine
//!
//! Free-text search over verified alumni records with:
//! - Semantic ranking delegated to an external LLM service (Gemini)
//! - Local fallback ranking: domain-keyword expansion, exact/substring
//!   matching and Levenshtein typo tolerance
//! - SQLite candidate store (verification, public directory, stats)
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! The local ranker is used whenever the semantic service is not configured,
//! fails, times out or replies with something unusable. Those failures are
//! logged, never returned.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use alumni_search_engine::{Config, SearchEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = SearchEngine::from_config(&Config::from_env()?)?;
//!
//!     let response = engine.search("chip design").await?;
//!
//!     for alumnus in &response.data {
//!         println!("{}", alumnus.display_name());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod store;

// Re-export primary types
pub use config::{Config, SemanticConfig};
pub use core::{Candidate, DirectoryResponse, ErrorResponse, RankingMethod, SearchResponse};
pub use engine::{SearchEngine, SearchOptions};
pub use error::{Result, SearchError};
pub use ranking::{FuzzyRanker, Ranker, SemanticOutcome, SemanticRanker};
pub use store::{CandidateStore, DirectoryFilter, SqliteStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
