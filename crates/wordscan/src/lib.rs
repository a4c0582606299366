//! Word scanning over extracted document text.
//!
//! Two pure functions over `&str`: [`word_index`] derives the deduplicated,
//! sorted list of lookup candidates from a document, and [`context_window`]
//! returns the lines surrounding the first occurrence of a word. Both are
//! independent of where the text came from, so they work the same on PDF
//! extractions and on plain strings in tests.
//!
//! # Example
//! ```
//! let text = "The quick brown fox.\nThe fox jumps.\nOver the lazy dog.";
//!
//! let words = wordscan::word_index(text);
//! assert_eq!(words.len(), 8);
//! assert_eq!(words[0], "brown");
//!
//! let context = wordscan::context_window(text, "jumps", 3).unwrap();
//! assert!(context.contains("fox jumps"));
//! ```

/// Number of context lines returned to callers that do not override it.
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Collect the distinct alphabetic tokens of `text`, lowercased and sorted.
///
/// A token is a maximal run of ASCII letters; digits, punctuation, and
/// non-ASCII characters end the current run, so `"word123"` contributes
/// `"word"`. The result is sorted in byte order and free of duplicates,
/// which makes it identical across calls for identical input.
pub fn word_index(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            current.push(c.to_ascii_lowercase());
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.sort();
    words.dedup();
    words
}

/// Return up to `num_lines` lines of context around the first line containing
/// `word`, matched case-insensitively as a substring.
///
/// The window is the matching line plus its immediate neighbours, clipped at
/// the document edges and then truncated to `num_lines`; later matches are
/// ignored. Returns `None` when no line matches, when `word` is empty, or
/// when `num_lines` is zero.
pub fn context_window(text: &str, word: &str, num_lines: usize) -> Option<String> {
    if word.is_empty() || num_lines == 0 {
        return None;
    }
    let needle = word.to_lowercase();
    let lines: Vec<&str> = text.lines().collect();
    let hit = lines
        .iter()
        .position(|line| line.to_lowercase().contains(&needle))?;
    let start = hit.saturating_sub(1);
    let end = (hit + 1).min(lines.len() - 1);
    let mut window = lines[start..=end].to_vec();
    window.truncate(num_lines);
    Some(window.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox.\nThe fox jumps.\nOver the lazy dog.";

    #[test]
    fn index_is_sorted_and_unique() {
        assert_eq!(
            word_index(FOX),
            ["brown", "dog", "fox", "jumps", "lazy", "over", "quick", "the"]
        );
    }

    #[test]
    fn index_splits_on_anything_but_letters() {
        assert_eq!(word_index("word123 42 foo_bar"), ["bar", "foo", "word"]);
        assert_eq!(word_index("semi-detached, really!"), ["detached", "really", "semi"]);
    }

    #[test]
    fn index_breaks_runs_at_non_ascii() {
        assert_eq!(word_index("naïve"), ["na", "ve"]);
    }

    #[test]
    fn index_of_empty_or_symbol_only_input_is_empty() {
        assert!(word_index("").is_empty());
        assert!(word_index("123 !!! \n\t").is_empty());
    }

    #[test]
    fn index_lowercases_and_merges_case_variants() {
        let words = word_index("Zebra apple zebra APPLE banana2banana");
        assert_eq!(words, ["apple", "banana", "zebra"]);
        assert!(words.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn index_is_deterministic() {
        assert_eq!(word_index(FOX), word_index(FOX));
    }

    #[test]
    fn context_covers_both_neighbours_for_a_middle_match() {
        assert_eq!(context_window(FOX, "jumps", 3).as_deref(), Some(FOX));
    }

    #[test]
    fn context_uses_the_first_match_only() {
        assert_eq!(
            context_window("cat\ndog\ncat\nbird", "cat", 3).as_deref(),
            Some("cat\ndog")
        );
    }

    #[test]
    fn context_clips_at_document_edges() {
        assert_eq!(
            context_window(FOX, "lazy", 3).as_deref(),
            Some("The fox jumps.\nOver the lazy dog.")
        );
        assert_eq!(
            context_window("only line", "only", 3).as_deref(),
            Some("only line")
        );
    }

    #[test]
    fn context_matches_substrings_case_insensitively() {
        let text = "Categories of errors.\nSecond line.";
        assert_eq!(
            context_window(text, "CAT", 3).as_deref(),
            Some("Categories of errors.\nSecond line.")
        );
    }

    #[test]
    fn context_for_an_absent_word_is_none() {
        assert_eq!(context_window(FOX, "zebra", 3), None);
        assert_eq!(context_window("", "fox", 3), None);
    }

    #[test]
    fn context_truncates_to_num_lines_from_the_window_start() {
        assert_eq!(
            context_window(FOX, "jumps", 1).as_deref(),
            Some("The quick brown fox.")
        );
        assert_eq!(
            context_window(FOX, "jumps", 2).as_deref(),
            Some("The quick brown fox.\nThe fox jumps.")
        );
    }

    #[test]
    fn context_rejects_degenerate_arguments() {
        assert_eq!(context_window(FOX, "", 3), None);
        assert_eq!(context_window(FOX, "jumps", 0), None);
    }
}
