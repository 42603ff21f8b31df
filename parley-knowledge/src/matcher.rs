//! Keyword-overlap matching of user utterances against the corpus.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// A match must share at least this many distinct tokens with the utterance.
pub const MIN_OVERLAP: usize = 3;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Lowercase word-token set of a text. Repeated words count once.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Find the stored sentence sharing the most tokens with the utterance.
///
/// The first sentence (in corpus insertion order) with the strictly highest
/// overlap wins; later ties never replace it. Returns `None` when the best
/// overlap is below [`MIN_OVERLAP`].
pub fn best_match<'a>(utterance: &str, corpus: &'a [String]) -> Option<&'a str> {
    let user_words = tokenize(utterance);

    let mut best: Option<&'a str> = None;
    let mut best_score = 0;
    for sentence in corpus {
        let overlap = tokenize(sentence).intersection(&user_words).count();
        if overlap > best_score {
            best_score = overlap;
            best = Some(sentence);
        }
    }

    if best_score >= MIN_OVERLAP { best } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(sentences: &[&str]) -> Vec<String> {
        sentences.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tokenize_lowercases_and_dedups() {
        let tokens = tokenize("The cat, the CAT, the hat!");
        assert_eq!(tokens.len(), 3);
        assert!(tokens.contains("cat"));
        assert!(tokens.contains("hat"));
        assert!(tokens.contains("the"));
    }

    #[test]
    fn test_threshold_boundary() {
        let corpus = corpus(&["The quick brown fox jumps."]);
        // Two shared tokens: no match.
        assert_eq!(best_match("quick brown dog", &corpus), None);
        // Three shared tokens: match.
        assert_eq!(
            best_match("quick brown fox", &corpus),
            Some("The quick brown fox jumps.")
        );
    }

    #[test]
    fn test_first_highest_wins_on_tie() {
        let corpus = corpus(&[
            "Rust compiles fast native code.",
            "Rust compiles fast safe binaries.",
        ]);
        // Both share the same three tokens; insertion order breaks the tie.
        assert_eq!(
            best_match("rust compiles fast", &corpus),
            Some("Rust compiles fast native code.")
        );
    }

    #[test]
    fn test_higher_overlap_replaces_earlier_match() {
        let corpus = corpus(&[
            "The sky is blue today.",
            "The sky is very blue and clear today.",
        ]);
        assert_eq!(
            best_match("is the sky blue and clear", &corpus),
            Some("The sky is very blue and clear today.")
        );
    }

    #[test]
    fn test_multiplicity_is_ignored() {
        let corpus = corpus(&["Dogs bark loudly."]);
        // Repeating a word does not inflate the overlap past the threshold.
        assert_eq!(best_match("dogs dogs dogs bark", &corpus), None);
    }

    #[test]
    fn test_empty_corpus_never_matches() {
        assert_eq!(best_match("anything at all here", &[]), None);
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let corpus = corpus(&[
            "Alpha beta gamma delta.",
            "Alpha beta gamma epsilon.",
        ]);
        let first = best_match("alpha beta gamma", &corpus);
        for _ in 0..10 {
            assert_eq!(best_match("alpha beta gamma", &corpus), first);
        }
    }
}
