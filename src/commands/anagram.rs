//! Anagram command

use crate::core::SubsetQuery;
use crate::core::letters::sorted_letters;
use crate::dispatch::{CorpusSource, Dispatcher};
use crate::engine::{OrderBy, QueryRequest, ScoredWord, are_anagrams};
use anyhow::{Context, Result, bail};

/// Outcome of comparing two phrases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnagramCheck {
    pub first: String,
    pub second: String,
    /// Sorted letters of the first phrase
    pub letters: String,
    pub is_anagram: bool,
}

#[must_use]
pub fn check_anagrams(first: &str, second: &str) -> AnagramCheck {
    AnagramCheck {
        first: first.to_string(),
        second: second.to_string(),
        letters: sorted_letters(first).into_iter().collect(),
        is_anagram: are_anagrams(first, second),
    }
}

/// Words in the corpus that use exactly the letters of `phrase`
///
/// # Errors
/// Fails if `phrase` has no letters or the word list cannot be loaded.
pub async fn find_anagrams<S: CorpusSource>(
    dispatcher: &Dispatcher<S>,
    language: &str,
    phrase: &str,
) -> Result<Vec<ScoredWord>> {
    let letters: String = sorted_letters(phrase).into_iter().collect();
    if letters.is_empty() {
        bail!("`{phrase}` contains no letters");
    }

    dispatcher
        .load(language)
        .await
        .with_context(|| format!("loading word list `{language}`"))?;
    // Subset matches include shorter words, so the limit applies after filtering
    let request = QueryRequest::new(SubsetQuery::new(letters.as_str()))
        .with_order(OrderBy::Alphabetical)
        .with_limit(Some(usize::MAX));
    let output = dispatcher.query(request).await?;

    let limit = dispatcher.engine().config().limit.unwrap_or(usize::MAX);
    Ok(output
        .results
        .into_iter()
        .filter(|result| are_anagrams(result.word.text(), &letters))
        .take(limit)
        .collect())
}
