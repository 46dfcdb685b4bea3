//! Word list loading utilities
//!
//! Normalizes raw dictionary lines into words.

use crate::core::Word;

/// Normalize one raw dictionary line into a Word
///
/// Trims whitespace, strips a trailing `/annotation` (as found in affix
/// dictionaries), lowercases and validates. Returns `None` for blank lines and
/// for entries that are too short or contain non-letters.
///
/// # Examples
/// ```
/// use lexicon_engine::corpus::loader::normalize_entry;
///
/// assert_eq!(normalize_entry(" Honey/SM ", 2).unwrap().text(), "honey");
/// assert!(normalize_entry("a", 2).is_none());
/// assert!(normalize_entry("can't", 2).is_none());
/// ```
#[must_use]
pub fn normalize_entry(line: &str, min_length: usize) -> Option<Word> {
    let entry = line.trim();
    let entry = entry.split_once('/').map_or(entry, |(stem, _)| stem).trim();
    if entry.is_empty() {
        return None;
    }
    Word::with_min_length(entry, min_length).ok()
}

/// Convert an embedded string slice to normalized words
///
/// Invalid entries are skipped; duplicates are kept (see [`Corpus::from_words`](super::Corpus::from_words)).
#[must_use]
pub fn words_from_slice(slice: &[&str], min_length: usize) -> Vec<Word> {
    slice
        .iter()
        .filter_map(|&s| normalize_entry(s, min_length))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_annotation() {
        assert_eq!(normalize_entry("walk/GDS", 2).unwrap().text(), "walk");
        assert_eq!(normalize_entry("walk / x", 2).unwrap().text(), "walk");
        assert!(normalize_entry("/GDS", 2).is_none());
    }

    #[test]
    fn normalize_rejects_inner_whitespace() {
        assert!(normalize_entry("ice cream", 2).is_none());
    }

    #[test]
    fn words_from_slice_skips_invalid() {
        let input = &["crane", "x", "b4", "slate", "Crane"];
        let words = words_from_slice(input, 2);

        let texts: Vec<&str> = words.iter().map(Word::text).collect();
        assert_eq!(texts, ["crane", "slate", "crane"]);
    }

    #[test]
    fn words_from_slice_empty() {
        let input: &[&str] = &[];
        assert!(words_from_slice(input, 2).is_empty());
    }
}
