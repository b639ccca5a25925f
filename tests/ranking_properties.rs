use alumni_search_engine::ranking::semantic::resolve_indices;
use alumni_search_engine::{Candidate, FuzzyRanker, Ranker};
use proptest::prelude::*;
use std::collections::HashSet;

const WORDS: &[&str] = &[
    "vlsi", "chip", "software", "engineer", "civil", "google", "intel", "ece", "cse",
    "bengaluru", "data", "analyst", "design", "structural", "mysuru", "softwere", "ml",
];

fn text() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::collection::vec(prop::sample::select(WORDS), 1..3).prop_map(|w| w.join(" ")))
}

fn candidates() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((text(), text(), text(), text()), 0..12).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, field, company, city))| Candidate {
                id: i as i64,
                name,
                field,
                company,
                city,
                ..Candidate::default()
            })
            .collect()
    })
}

fn query() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(WORDS).prop_map(str::to_string),
        "[a-z]{1,10}( [a-z]{1,8})?",
    ]
}

proptest! {
    #[test]
    fn ranking_is_idempotent(q in query(), c in candidates()) {
        let ranker = FuzzyRanker::new();
        prop_assert_eq!(ranker.search(&q, &c), ranker.search(&q, &c));
    }

    #[test]
    fn output_is_unique_subset_of_input(q in query(), c in candidates()) {
        let ranker = FuzzyRanker::new();
        let found = ranker.search(&q, &c);

        let mut seen = HashSet::new();
        for candidate in &found {
            prop_assert!(c.contains(candidate));
            prop_assert!(seen.insert(candidate.id));
        }
    }

    #[test]
    fn scores_positive_and_descending(q in query(), c in candidates()) {
        let ranked = FuzzyRanker::new().rank(&q, &c);

        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
            // ties keep input order (ids are input positions)
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].candidate.id < pair[1].candidate.id);
            }
        }
        prop_assert!(ranked.iter().all(|r| r.score > 0));
    }

    #[test]
    fn literal_match_always_included(c in candidates(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!c.is_empty());
        let target = &c[pick.index(c.len())];
        let text = target.searchable_text();
        prop_assume!(!text.is_empty());

        let found = FuzzyRanker::new().search(&text, &c);
        prop_assert!(found.iter().any(|f| f.id == target.id));
    }

    #[test]
    fn resolved_indices_are_unique_and_in_range(
        indices in prop::collection::vec(0usize..20, 0..30),
        c in candidates(),
    ) {
        let resolved = resolve_indices(&indices, &c);
        let ids: HashSet<i64> = resolved.iter().map(|r| r.id).collect();
        prop_assert_eq!(ids.len(), resolved.len());
        prop_assert!(resolved.len() <= c.len());
    }
}
