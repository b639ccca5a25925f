use std::collections::HashSet;

use crate::ranking::domain;

/// Shortest word kept as a keyword; single characters are noise
pub const MIN_KEYWORD_LEN: usize = 2;

/// Expand a query into the lowercase keyword set used for scoring.
///
/// The set holds the full query, each of its words with at least
/// [`MIN_KEYWORD_LEN`] characters, and the key plus synonyms of every domain
/// entry the query triggers. An empty query yields an empty set.
pub fn expand_keywords(query: &str) -> HashSet<String> {
    let query_lower = query.trim().to_lowercase();
    let mut keywords = HashSet::new();

    if query_lower.is_empty() {
        return keywords;
    }

    keywords.extend(domain::related_terms(&query_lower).into_iter().map(str::to_string));

    keywords.extend(
        query_lower
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
            .map(str::to_string),
    );

    keywords.insert(query_lower);
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_includes_full_query_and_words() {
        let keywords = expand_keywords("Web Development");
        assert!(keywords.contains("web development"));
        assert!(keywords.contains("web"));
        assert!(keywords.contains("development"));
        // "web" key triggered by containment
        assert!(keywords.contains("frontend"));
    }

    #[test]
    fn test_drops_single_character_words() {
        let keywords = expand_keywords("x ray");
        assert!(keywords.contains("x ray"));
        assert!(keywords.contains("ray"));
        assert!(!keywords.contains("x"));
    }

    #[test]
    fn test_single_character_query_kept_whole() {
        let keywords = expand_keywords("q");
        assert!(keywords.contains("q"));
    }

    #[test]
    fn test_domain_expansion() {
        let keywords = expand_keywords("chip design");
        for expected in ["chip", "design", "chip design", "vlsi", "ece", "semiconductor"] {
            assert!(keywords.contains(expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_deduplicated() {
        // "vlsi" and "chip" both list each other
        let keywords = expand_keywords("vlsi chip");
        assert_eq!(keywords.iter().filter(|k| k.as_str() == "vlsi").count(), 1);
        assert_eq!(keywords.iter().filter(|k| k.as_str() == "chip").count(), 1);
    }

    #[test]
    fn test_empty_query() {
        assert!(expand_keywords("   ").is_empty());
    }
}
