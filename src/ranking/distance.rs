use rapidfuzz::distance::levenshtein;

/// Levenshtein distance over characters (insert, delete, substitute, each cost 1)
pub fn edit_distance(a: &str, b: &str) -> usize {
    levenshtein::distance(a.chars(), b.chars())
}

/// `1 - distance / max(len(a), len(b))`, lengths in characters.
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    1.0 - edit_distance(a, b) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Full (len(a)+1) x (len(b)+1) table, edges seeded with their index
    fn reference_distance(a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let mut table = vec![vec![0usize; b.len() + 1]; a.len() + 1];

        for (i, row) in table.iter_mut().enumerate() {
            row[0] = i;
        }
        for j in 0..=b.len() {
            table[0][j] = j;
        }

        for i in 1..=a.len() {
            for j in 1..=b.len() {
                let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
                table[i][j] = (table[i - 1][j] + 1)
                    .min(table[i][j - 1] + 1)
                    .min(table[i - 1][j - 1] + cost);
            }
        }

        table[a.len()][b.len()]
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("abc", "abc"), 0);
        assert_eq!(edit_distance("softwere", "software"), 1);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(edit_distance("café", "cafe"), 1);
        assert_eq!(similarity("café", "cafe"), 0.75);
    }

    #[test]
    fn test_similarity() {
        assert_eq!(similarity("softwere", "software"), 0.875);
        assert_eq!(similarity("abc", "abc"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", "xyz"), 0.0);
    }

    proptest! {
        #[test]
        fn matches_reference_table(a in "[a-z ]{0,12}", b in "[a-z ]{0,12}") {
            prop_assert_eq!(edit_distance(&a, &b), reference_distance(&a, &b));
        }

        #[test]
        fn symmetric_and_bounded(a in "\\PC{0,10}", b in "\\PC{0,10}") {
            let d = edit_distance(&a, &b);
            prop_assert_eq!(d, edit_distance(&b, &a));
            prop_assert!(d <= a.chars().count().max(b.chars().count()));
            let s = similarity(&a, &b);
            prop_assert!((0.0..=1.0).contains(&s));
        }
    }
}
