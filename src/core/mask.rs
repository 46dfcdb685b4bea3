//! Positional letter masks
//!
//! A mask is a fixed-length sequence of slots. Each slot is either a literal
//! letter or a wildcard that accepts any single letter. Masks drive both
//! pattern queries (`c_m_u_e`) and the fixed positions of constraint solving
//! (`_r_t_`).

use super::Word;
use super::letters::fold;
use crate::config::MASK_WILDCARDS;
use std::fmt;

/// A parsed positional mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask(Box<[Option<char>]>);

impl Mask {
    /// Parse a mask like `"h_llo"` or `"c.m.u.e"`
    ///
    /// Accepts:
    /// - any letter (case-folded) for a fixed slot
    /// - `_` or `.` for a wildcard slot
    ///
    /// # Errors
    /// Returns the first character that is neither a letter nor a wildcard.
    ///
    /// # Examples
    /// ```
    /// use lexicon_engine::core::Mask;
    ///
    /// let mask = Mask::parse("H_llo").unwrap();
    /// assert_eq!(mask.len(), 5);
    /// assert_eq!(mask.to_string(), "h_llo");
    ///
    /// assert_eq!(Mask::parse("h*llo"), Err('*'));
    /// ```
    pub fn parse(s: &str) -> Result<Self, char> {
        s.chars()
            .map(|ch| {
                if MASK_WILDCARDS.contains(&ch) {
                    Ok(None)
                } else if ch.is_alphabetic() {
                    Ok(Some(fold(ch)))
                } else {
                    Err(ch)
                }
            })
            .collect::<Result<Box<[_]>, _>>()
            .map(Self)
    }

    /// A mask of `len` wildcard slots
    #[must_use]
    pub fn blank(len: usize) -> Self {
        Self(vec![None; len].into_boxed_slice())
    }

    /// Number of slots
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fixed slots as `(position, letter)` pairs
    pub fn fixed(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|letter| (i, letter)))
    }

    /// Every fixed slot equals the word's letter at that position
    ///
    /// Length is not checked; positions past the end of the word never agree.
    #[inline]
    #[must_use]
    pub fn agrees_with(&self, word: &Word) -> bool {
        self.fixed()
            .all(|(position, letter)| word.char_at(position) == Some(letter))
    }

    /// Exact-length, position-wise match
    #[inline]
    #[must_use]
    pub fn matches(&self, word: &Word) -> bool {
        word.letter_count() == self.len()
            && self
                .0
                .iter()
                .zip(word.letters())
                .all(|(slot, &letter)| slot.is_none_or(|fixed| fixed == letter))
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.0 {
            write!(f, "{}", slot.unwrap_or(MASK_WILDCARDS[0]))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    #[test]
    fn mask_parse_both_wildcards() {
        let underscores = Mask::parse("c_m_u_e").unwrap();
        let dots = Mask::parse("c.m.u.e").unwrap();
        assert_eq!(underscores, dots);
        assert_eq!(underscores.len(), 7);
        assert_eq!(underscores.fixed().count(), 4);
    }

    #[test]
    fn mask_parse_invalid() {
        assert_eq!(Mask::parse("ab1"), Err('1'));
        assert_eq!(Mask::parse("a b"), Err(' '));
        assert_eq!(Mask::parse("a?b"), Err('?'));
    }

    #[test]
    fn mask_matches_exact_length() {
        let mask = Mask::parse("h_llo").unwrap();
        assert!(mask.matches(&word("hello")));
        assert!(mask.matches(&word("hxllo")));
        assert!(!mask.matches(&word("hells")));
        assert!(!mask.matches(&word("helloo")));
        assert!(!mask.matches(&word("hell")));
    }

    #[test]
    fn mask_agrees_ignores_length() {
        let mask = Mask::parse("_r_t_").unwrap();
        assert!(mask.agrees_with(&word("grate")));
        assert!(mask.agrees_with(&word("grates")));
        assert!(!mask.agrees_with(&word("crane")));
        assert!(!mask.agrees_with(&word("or")));
    }

    #[test]
    fn mask_all_wildcards() {
        assert_eq!(Mask::blank(3), Mask::parse("...").unwrap());
        assert_eq!(Mask::parse("___").unwrap().fixed().count(), 0);
        assert_eq!(Mask::parse("_a_").unwrap().fixed().collect::<Vec<_>>(), [(1, 'a')]);
    }

    #[test]
    fn mask_display_normalizes() {
        let mask = Mask::parse("C.M.U.E").unwrap();
        assert_eq!(mask.to_string(), "c_m_u_e");
    }
}
