//! "Did you mean" suggestions (§7): Damerau-Levenshtein distance over the
//! fixed vocabulary of command words, declaration keywords, and config
//! keys, with a cutoff of 2 edits.

/// Optimal-string-alignment Damerau-Levenshtein distance: insertions,
/// deletions, substitutions, and adjacent transpositions, each costing 1.
/// (OSA rather than true Damerau-Levenshtein — it disallows touching an
/// already-transposed pair again — which is the distinction that matters
/// for the short, mostly-distinct keywords this table holds.)
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (la, lb) = (a.len(), b.len());
    if la == 0 {
        return lb;
    }
    if lb == 0 {
        return la;
    }

    let mut d = vec![vec![0usize; lb + 1]; la + 1];
    for i in 0..=la {
        d[i][0] = i;
    }
    for j in 0..=lb {
        d[0][j] = j;
    }
    for i in 1..=la {
        for j in 1..=lb {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            d[i][j] = (d[i - 1][j] + 1).min(d[i][j - 1] + 1).min(d[i - 1][j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + 1);
            }
        }
    }
    d[la][lb]
}

/// The cutoff past which a suggestion is considered too far to be useful
/// (§7: "suggestions offered up to edit distance 2").
pub const CUTOFF: usize = 2;

/// Finds the closest word in `candidates` to `word`, if any is within
/// [`CUTOFF`] edits. Ties go to the earliest candidate in iteration order.
pub fn find_similar<'a>(word: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .into_iter()
        .map(|c| (c, distance(word, c)))
        .filter(|(_, d)| *d <= CUTOFF && *d > 0)
        .min_by_key(|(_, d)| *d)
        .map(|(c, _)| c)
}

/// Top-level command words (§6).
pub const COMMAND_WORDS: &[&str] =
    &["declare", "cast", "explain", "define", "typedef", "show", "set", "help", "exit", "quit", "q"];

/// Persisted config keys (§6).
pub const CONFIG_KEYS: &[&str] = &[
    "alt-tokens", "color", "debug", "digraphs", "trigraphs", "east-const", "echo-commands",
    "english-types", "explicit-ecsu", "explicit-int", "graphs", "language", "prompt", "semicolon",
    "using",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_words_have_zero_distance() {
        assert_eq!(distance("declare", "declare"), 0);
    }

    #[test]
    fn adjacent_transposition_costs_one() {
        assert_eq!(distance("cats", "cast"), 1);
    }

    #[test]
    fn typo_suggests_the_right_command() {
        assert_eq!(find_similar("delcare", COMMAND_WORDS), Some("declare"));
    }

    #[test]
    fn wildly_different_word_suggests_nothing() {
        assert_eq!(find_similar("xyzzy", COMMAND_WORDS), None);
    }
}
