//! Environment-driven configuration.
//!
//! | Variable | Default |
//! |---|---|
//! | `DB_PATH` | `alumni.db` |
//! | `PORT` | `3000` |
//! | `GOOGLE_AI_API_KEY` | unset: semantic ranking disabled |
//! | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
//! | `GEMINI_MODEL` | `gemini-pro` |
//! | `SEMANTIC_TIMEOUT_MS` | `8000` |
//! | `SEMANTIC_TOP_N` | `10` |

use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{debug, info};

use crate::error::{Result, SearchError};

pub const DEFAULT_DB_PATH: &str = "alumni.db";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_SEMANTIC_TIMEOUT_MS: u64 = 8000;
pub const DEFAULT_SEMANTIC_TOP_N: usize = 10;

/// External semantic service settings
#[derive(Debug, Clone, PartialEq)]
pub struct SemanticConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Upper bound on one ranking call, connection included
    pub timeout: Duration,
    /// How many indices to ask for
    pub top_n: usize,
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            timeout: Duration::from_millis(DEFAULT_SEMANTIC_TIMEOUT_MS),
            top_n: DEFAULT_SEMANTIC_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    /// None when no api key is configured
    pub semantic: Option<SemanticConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            port: DEFAULT_PORT,
            semantic: None,
        }
    }
}

impl Config {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from any key -> value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let semantic = match lookup("GOOGLE_AI_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(api_key) => {
                let timeout_ms: u64 =
                    try_load(&lookup, "SEMANTIC_TIMEOUT_MS", DEFAULT_SEMANTIC_TIMEOUT_MS)?;
                if timeout_ms == 0 {
                    return Err(SearchError::Config(
                        "SEMANTIC_TIMEOUT_MS must be positive".to_string(),
                    ));
                }

                Some(SemanticConfig {
                    api_key: api_key.trim().to_string(),
                    base_url: lookup("GEMINI_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                    model: lookup("GEMINI_MODEL")
                        .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                    timeout: Duration::from_millis(timeout_ms),
                    top_n: try_load(&lookup, "SEMANTIC_TOP_N", DEFAULT_SEMANTIC_TOP_N)?,
                })
            }
            None => {
                info!("GOOGLE_AI_API_KEY not set, semantic ranking disabled");
                None
            }
        };

        Ok(Self {
            db_path: lookup("DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            port: try_load(&lookup, "PORT", DEFAULT_PORT)?,
            semantic,
        })
    }
}

fn try_load<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SearchError::Config(format!("Invalid {key} value '{raw}': {e}"))),
        None => {
            debug!("{key} not set, using default: {default}");
            Ok(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.semantic.is_none());
    }

    #[test]
    fn test_semantic_enabled_by_key() {
        let config = load(&[
            ("GOOGLE_AI_API_KEY", "secret"),
            ("SEMANTIC_TIMEOUT_MS", "2500"),
            ("SEMANTIC_TOP_N", "20"),
            ("GEMINI_MODEL", "gemini-1.5-flash"),
        ])
        .unwrap();

        let semantic = config.semantic.unwrap();
        assert_eq!(semantic.api_key, "secret");
        assert_eq!(semantic.timeout, Duration::from_millis(2500));
        assert_eq!(semantic.top_n, 20);
        assert_eq!(semantic.model, "gemini-1.5-flash");
        assert_eq!(semantic.base_url, DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn test_blank_key_disables_semantic() {
        let config = load(&[("GOOGLE_AI_API_KEY", "   ")]).unwrap();
        assert!(config.semantic.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(load(&[("PORT", "http")]), Err(SearchError::Config(_))));
        assert!(matches!(
            load(&[("GOOGLE_AI_API_KEY", "k"), ("SEMANTIC_TIMEOUT_MS", "0")]),
            Err(SearchError::Config(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[("DB_PATH", "/tmp/a.db"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.db_path, "/tmp/a.db");
        assert_eq!(config.port, 8080);
    }
}
