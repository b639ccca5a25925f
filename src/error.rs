use thiserror::Error;

/// Main error type for the alumni search engine
#[derive(Error, Debug)]
pub enum SearchError {
    /// Empty or whitespace-only query
    #[error("Search query is required")]
    EmptyQuery,

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid or missing configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Candidate store errors that are not plain SQL failures
    #[error("Store error: {0}")]
    Store(String),

    /// Unknown alumni id
    #[error("Alumni not found: {0}")]
    NotFound(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl SearchError {
    /// True for errors caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::EmptyQuery | SearchError::NotFound(_))
    }
}

impl From<String> for SearchError {
    fn from(s: String) -> Self {
        SearchError::Other(s)
    }
}

impl From<&str> for SearchError {
    fn from(s: &str) -> Self {
        SearchError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, SearchError>;
