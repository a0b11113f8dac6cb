//! Edit-distance based fuzzy matching for note titles.

/// Minimum similarity for a title to count as a match.
pub const TITLE_MATCH_THRESHOLD: f64 = 0.6;

/// Levenshtein distance over Unicode scalar values.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `(len(longer) - distance) / len(longer)`, case-insensitive.
///
/// Two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    let distance = levenshtein(&a, &b);
    (longest - distance) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
        assert_eq!(levenshtein("קניות", "קנייה"), 2);
    }

    #[test]
    fn test_similarity_is_case_insensitive() {
        assert_eq!(similarity("Groceries", "groceries"), 1.0);
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_near_titles_pass_threshold() {
        // "grocery" vs "groceries": distance 3 over 9 chars
        let s = similarity("grocery", "groceries");
        assert!((s - 6.0 / 9.0).abs() < 1e-9);
        assert!(s >= TITLE_MATCH_THRESHOLD);
        assert!(similarity("grocery", "taxes") < TITLE_MATCH_THRESHOLD);
    }
}
