pub mod sqlite;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Candidate;
use crate::error::Result;

pub use sqlite::SqliteStore;

/// Trait for alumni record sources
#[async_trait]
pub trait CandidateStore: Send + Sync {
    /// Verified alumni with location, newest graduates first, then by name
    async fn verified_candidates(&self) -> Result<Vec<Candidate>>;

    /// Public directory: verified alumni narrowed by `filter`, same ordering
    async fn directory(&self, filter: &DirectoryFilter) -> Result<Vec<Candidate>>;

    /// Insert or replace an alumni record and its location
    async fn upsert(&self, candidate: &Candidate) -> Result<()>;

    /// Set the verification flag. Returns false if the id is unknown.
    async fn set_verified(&self, id: i64, verified: bool) -> Result<bool>;

    /// Get store statistics
    async fn stats(&self) -> Result<StoreStats>;
}

/// Directory listing filters; `None` means "any"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    /// Exact branch
    #[serde(default)]
    pub branch: Option<String>,
    /// Substring of field
    #[serde(default)]
    pub field: Option<String>,
    /// Substring of city
    #[serde(default)]
    pub city: Option<String>,
    /// Exact graduation year
    #[serde(default, deserialize_with = "crate::core::candidate::deserialize_year")]
    pub graduation_year: Option<i32>,
}

/// Store statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreStats {
    pub total: u64,
    pub verified: u64,
    pub pending: u64,
    /// Verified alumni per branch, largest first
    pub by_branch: Vec<BranchCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCount {
    pub branch: String,
    pub count: u64,
}
