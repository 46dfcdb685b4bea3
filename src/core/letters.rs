//! Letter-list parsing shared by the query types
//!
//! User input names letters loosely ("r,s", "R S", "rs"). These helpers fold
//! case, skip separators and reject anything that is not a letter.

use rustc_hash::FxHashSet;

/// Lowercase a single letter
///
/// Letters whose lowercase form expands to several characters are kept as-is.
#[inline]
#[must_use]
pub fn fold(letter: char) -> char {
    let mut lower = letter.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => letter,
    }
}

#[inline]
const fn is_separator(ch: char) -> bool {
    ch == ',' || ch.is_ascii_whitespace()
}

/// Parse a letter list, keeping order and duplicates
///
/// Commas and whitespace separate letters and are skipped.
///
/// # Errors
/// Returns the first character that is neither a letter nor a separator.
///
/// # Examples
/// ```
/// use lexicon_engine::core::letters::parse_letters;
///
/// assert_eq!(parse_letters("R, s t").unwrap(), vec!['r', 's', 't']);
/// assert_eq!(parse_letters("a1"), Err('1'));
/// ```
pub fn parse_letters(input: &str) -> Result<Vec<char>, char> {
    input
        .chars()
        .filter(|&ch| !is_separator(ch))
        .map(|ch| if ch.is_alphabetic() { Ok(fold(ch)) } else { Err(ch) })
        .collect()
}

/// Parse a letter list into a set
///
/// # Errors
/// Returns the first character that is neither a letter nor a separator.
pub fn letter_set(input: &str) -> Result<FxHashSet<char>, char> {
    Ok(parse_letters(input)?.into_iter().collect())
}

/// Sorted, case-folded letters of a phrase, ignoring everything else
#[must_use]
pub fn sorted_letters(phrase: &str) -> Vec<char> {
    let mut letters: Vec<char> = phrase
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .map(fold)
        .collect();
    letters.sort_unstable();
    letters
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_lowercases() {
        assert_eq!(fold('A'), 'a');
        assert_eq!(fold('z'), 'z');
        assert_eq!(fold('É'), 'é');
    }

    #[test]
    fn parse_letters_skips_separators() {
        assert_eq!(parse_letters("m,o").unwrap(), vec!['m', 'o']);
        assert_eq!(parse_letters("  m  o ").unwrap(), vec!['m', 'o']);
        assert_eq!(parse_letters("").unwrap(), Vec::<char>::new());
    }

    #[test]
    fn parse_letters_keeps_duplicates() {
        assert_eq!(parse_letters("aab").unwrap(), vec!['a', 'a', 'b']);
    }

    #[test]
    fn parse_letters_rejects_symbols() {
        assert_eq!(parse_letters("ab?"), Err('?'));
        assert_eq!(parse_letters("a-b"), Err('-'));
    }

    #[test]
    fn letter_set_dedups() {
        let set = letter_set("h,o,n,E,y,p,p").unwrap();
        assert_eq!(set.len(), 6);
        assert!(set.contains(&'e'));
    }

    #[test]
    fn sorted_letters_ignores_non_letters() {
        assert_eq!(sorted_letters("Dormitory!"), sorted_letters("dirty room"));
        assert_eq!(sorted_letters("b a"), vec!['a', 'b']);
        assert!(sorted_letters("123").is_empty());
    }
}
