//! Sentence segmentation.

use std::sync::LazyLock;

use regex::Regex;

/// Trimmed candidates at or under this many characters are discarded.
///
/// Heuristic threshold carried over from the corpus format; it will drop
/// short-but-valid sentences like "Ok?" along with stray fragments.
pub const MIN_SENTENCE_CHARS: usize = 5;

// A boundary is a terminator followed by spaces. Matching the terminator
// itself (instead of a lookbehind, which the regex crate does not support)
// and cutting after it keeps it attached to the preceding sentence.
static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?] +").unwrap());

/// Split normalized text into candidate sentences.
///
/// Splits after `.`, `!` or `?` when followed by spaces; the terminator
/// stays with the preceding sentence. Candidates are trimmed and fragments
/// of [`MIN_SENTENCE_CHARS`] or fewer characters are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for boundary in BOUNDARY_RE.find_iter(text) {
        // The terminator is a single ASCII byte.
        push_candidate(&text[start..boundary.start() + 1], &mut sentences);
        start = boundary.end();
    }
    push_candidate(&text[start..], &mut sentences);

    sentences
}

fn push_candidate(raw: &str, out: &mut Vec<String>) {
    let trimmed = raw.trim();
    if trimmed.chars().count() > MIN_SENTENCE_CHARS {
        out.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminator_stays_attached() {
        let sentences = split_sentences("Hello world. This is fine! Really fine?");
        assert_eq!(
            sentences,
            vec!["Hello world.", "This is fine!", "Really fine?"]
        );
    }

    #[test]
    fn test_short_fragments_are_dropped() {
        // "Ok?" (3 chars) is under the threshold, "Okay??" (6 chars) is over.
        let sentences = split_sentences("Hello world. Ok? Okay?? Yes.");
        assert_eq!(sentences, vec!["Hello world.", "Okay??"]);
    }

    #[test]
    fn test_exact_threshold_is_dropped() {
        // Exactly 5 characters is still a fragment; 6 crosses the boundary.
        assert!(split_sentences("Hiya.").is_empty());
        assert_eq!(split_sentences("Hi ya."), vec!["Hi ya."]);
    }

    #[test]
    fn test_ellipsis_splits_after_last_dot() {
        let sentences = split_sentences("Wait for it... Here it comes.");
        assert_eq!(sentences, vec!["Wait for it...", "Here it comes."]);
    }

    #[test]
    fn test_no_terminator_yields_single_candidate() {
        assert_eq!(
            split_sentences("a sentence without an ending"),
            vec!["a sentence without an ending"]
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // Five chars but nine bytes: still a fragment under char counting.
        assert!(split_sentences("éééé.").is_empty());
        assert_eq!(split_sentences("héllo."), vec!["héllo."]);
    }
}
