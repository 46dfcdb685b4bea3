//! Formatting utilities for terminal output

use crate::engine::ScoredWord;
use std::collections::BTreeMap;
use std::time::Duration;

/// Human-readable duration: microseconds, milliseconds or seconds
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    if micros < 1_000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.2}ms", elapsed.as_secs_f64() * 1000.0)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Lay words out in left-aligned columns fitting `width`
#[must_use]
pub fn columns(words: &[&str], width: usize) -> Vec<String> {
    let Some(longest) = words.iter().map(|w| w.chars().count()).max() else {
        return Vec::new();
    };
    let cell = longest + 2;
    let per_row = (width / cell).max(1);

    words
        .chunks(per_row)
        .map(|row| {
            row.iter()
                .map(|w| format!("{w:<cell$}"))
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// Group results by word length, longest group first, keeping result order inside each group
#[must_use]
pub fn group_by_length(results: &[ScoredWord]) -> Vec<(usize, Vec<&ScoredWord>)> {
    let mut groups: BTreeMap<usize, Vec<&ScoredWord>> = BTreeMap::new();
    for result in results {
        groups
            .entry(result.word.letter_count())
            .or_default()
            .push(result);
    }
    groups.into_iter().rev().collect()
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;

    #[test]
    fn elapsed_units() {
        assert_eq!(format_elapsed(Duration::from_micros(250)), "250µs");
        assert_eq!(format_elapsed(Duration::from_micros(1_500)), "1.50ms");
        assert_eq!(format_elapsed(Duration::from_millis(2_250)), "2.25s");
    }

    #[test]
    fn columns_wrap_to_width() {
        let rows = columns(&["cat", "act", "tac", "cats"], 12);
        assert_eq!(rows, ["cat   act", "tac   cats"]);
    }

    #[test]
    fn columns_never_empty_rows() {
        assert!(columns(&[], 80).is_empty());
        assert_eq!(columns(&["extraordinary"], 4), ["extraordinary"]);
    }

    #[test]
    fn groups_longest_first() {
        let results: Vec<ScoredWord> = ["cats", "act", "cat"]
            .into_iter()
            .map(|t| ScoredWord::new(Word::new(t).unwrap(), 0))
            .collect();
        let groups = group_by_length(&results);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 4);
        let threes: Vec<&str> = groups[1].1.iter().map(|r| r.word.text()).collect();
        assert_eq!(threes, ["act", "cat"]);
    }

    #[test]
    fn progress_bar_fills() {
        assert_eq!(create_progress_bar(0.0, 100.0, 4), "░░░░");
        assert_eq!(create_progress_bar(50.0, 100.0, 4), "██░░");
        assert_eq!(create_progress_bar(150.0, 100.0, 4), "████");
        assert_eq!(create_progress_bar(1.0, 0.0, 2), "░░");
    }
}
