//! Phrase anagram check
//!
//! Independent of any corpus: two phrases are anagrams when they use exactly
//! the same letters, ignoring case, spacing and punctuation.

use crate::core::letters::sorted_letters;

/// Whether two phrases are anagrams of each other
///
/// Phrases without any letters are never anagrams.
///
/// # Examples
/// ```
/// use lexicon_engine::engine::are_anagrams;
///
/// assert!(are_anagrams("Listen", "Silent"));
/// assert!(are_anagrams("Dormitory", "dirty room!"));
/// assert!(!are_anagrams("cat", "cats"));
/// ```
#[must_use]
pub fn are_anagrams(first: &str, second: &str) -> bool {
    let letters = sorted_letters(first);
    !letters.is_empty() && letters == sorted_letters(second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anagrams_ignore_case_and_punctuation() {
        assert!(are_anagrams("The eyes", "They see"));
        assert!(are_anagrams("A gentleman", "Elegant man"));
        assert!(are_anagrams("tac", "CAT"));
    }

    #[test]
    fn different_multiplicity_is_not_anagram() {
        assert!(!are_anagrams("aab", "abb"));
        assert!(!are_anagrams("cat", "act!s"));
    }

    #[test]
    fn empty_phrases_are_not_anagrams() {
        assert!(!are_anagrams("", ""));
        assert!(!are_anagrams("123", "321"));
    }
}
