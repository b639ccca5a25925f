//! Field-of-study and industry vocabulary used to widen a query.
//!
//! Entries are matched by substring containment in both directions: an entry
//! fires when the query contains its key, or when its key contains the query.
//! The table is a plain constant, so concurrent readers need no coordination.

/// One canonical keyword and the terms it pulls in
pub type DomainEntry = (&'static str, &'static [&'static str]);

/// Canonical keyword -> related keywords. All lowercase.
pub static DOMAIN_MAPPING: &[DomainEntry] = &[
    // Electronics
    ("vlsi", &["chip", "ic", "semiconductor", "ece", "electronics", "asic", "fpga", "verilog", "hardware"]),
    ("chip", &["vlsi", "semiconductor", "ic", "ece", "electronics", "hardware", "asic"]),
    ("semiconductor", &["chip", "vlsi", "ic", "ece", "electronics", "fab"]),
    ("hardware", &["electronics", "embedded", "ece", "eee", "chip", "vlsi", "circuit"]),
    ("embedded", &["firmware", "microcontroller", "iot", "ece", "hardware"]),
    ("electronics", &["ece", "eee", "vlsi", "embedded", "hardware", "circuit"]),
    // Software
    ("software", &["developer", "sde", "programming", "cse", "ise", "coding"]),
    ("web", &["frontend", "backend", "full stack", "fullstack", "javascript", "react", "cse"]),
    ("cloud", &["aws", "azure", "gcp", "devops", "infrastructure"]),
    // Data and AI
    ("ai", &["artificial intelligence", "machine learning", "ml", "deep learning", "data science", "nlp", "computer vision"]),
    ("machine learning", &["ai", "ml", "deep learning", "data science", "data scientist", "artificial intelligence"]),
    ("data", &["analytics", "data science", "data scientist", "data engineer", "analyst", "ml"]),
    // Civil
    ("construction", &["civil", "cv", "structural", "infrastructure", "building"]),
    ("civil", &["construction", "cv", "structural", "infrastructure"]),
    // Mechanical
    ("mechanical", &["me", "automotive", "manufacturing", "cad", "thermal"]),
    ("automotive", &["mechanical", "me", "ev", "vehicle"]),
    // Business
    ("finance", &["banking", "fintech", "investment", "analyst"]),
];

/// Keys and synonyms of every entry triggered by `query_lower`.
///
/// `query_lower` must already be lowercase. An empty query triggers nothing.
pub fn related_terms(query_lower: &str) -> Vec<&'static str> {
    if query_lower.is_empty() {
        return Vec::new();
    }

    DOMAIN_MAPPING
        .iter()
        .filter(|(key, _)| query_lower.contains(key) || key.contains(query_lower))
        .flat_map(|(key, synonyms)| std::iter::once(*key).chain(synonyms.iter().copied()))
        .collect()
}
