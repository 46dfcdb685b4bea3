//! Display functions for command results

use super::formatters::{columns, create_progress_bar, format_elapsed, group_by_length};
use crate::commands::{AnagramCheck, BenchmarkResult, LookupResult};
use crate::core::Query;
use crate::engine::ScoredWord;
use colored::Colorize;

const RULE_WIDTH: usize = 60;

fn header(title: &str, subject: &str) {
    println!("\n{}", "═".repeat(RULE_WIDTH).cyan());
    println!(
        " {} {} ",
        title.bright_cyan().bold(),
        subject.bright_yellow().bold()
    );
    println!("{}", "═".repeat(RULE_WIDTH).cyan());
}

fn print_words(results: &[&ScoredWord], verbose: bool) {
    if verbose {
        for result in results {
            println!(
                "   {:<16} {}",
                result.word.text(),
                result.score.to_string().bright_black()
            );
        }
    } else {
        let words: Vec<&str> = results.iter().map(|r| r.word.text()).collect();
        for row in columns(&words, RULE_WIDTH - 3) {
            println!("   {row}");
        }
    }
}

/// Print the result of a lookup
///
/// Subset results are grouped by word length; other modes print in result order.
/// `verbose` adds each word's score.
pub fn print_lookup_result(result: &LookupResult, verbose: bool) {
    header("QUERY", &result.query.to_string());

    println!(
        "\n📚 {} ({} words{})",
        result.load.language.bright_cyan(),
        result.load.word_count,
        if result.load.cached { ", cached" } else { "" }
    );

    let output = &result.output;
    if output.results.is_empty() {
        println!("\n{}", "No matching words".yellow());
    } else if matches!(result.query, Query::Subset(_)) {
        for (length, group) in group_by_length(&output.results) {
            println!("\n{}", format!("{length} letters").bright_cyan().bold());
            print_words(&group, verbose);
        }
    } else {
        println!();
        let all: Vec<&ScoredWord> = output.results.iter().collect();
        print_words(&all, verbose);
    }

    println!();
    let shown = output.results.len();
    let summary = if output.is_truncated() {
        format!("{shown} of {} matches", output.total)
    } else {
        format!("{} matches", output.total)
    };
    println!(
        "{} in {}",
        summary.green().bold(),
        format_elapsed(output.elapsed)
    );
}

/// Print the result of comparing two phrases
pub fn print_anagram_check(check: &AnagramCheck) {
    header("ANAGRAM", &format!("{} / {}", check.first, check.second));
    println!("\n   Letters: {}", check.letters.bright_yellow());
    if check.is_anagram {
        println!("\n{}", "✅ These phrases are anagrams".green().bold());
    } else {
        println!("\n{}", "❌ These phrases are not anagrams".red().bold());
    }
}

/// Print corpus words that are anagrams of `phrase`
pub fn print_anagram_matches(phrase: &str, matches: &[ScoredWord]) {
    header("ANAGRAMS OF", phrase);
    if matches.is_empty() {
        println!("\n{}", "No anagrams in this word list".yellow());
        return;
    }
    println!();
    let all: Vec<&ScoredWord> = matches.iter().collect();
    print_words(&all, false);
}

/// Print the result of a benchmark
pub fn print_benchmark_result(result: &BenchmarkResult) {
    header("BENCHMARK RESULTS", &result.language);

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Word list size:   {}", result.corpus_size);
    println!("   Queries run:      {}", result.total_queries);
    println!("   Total matches:    {}", result.total_matches);
    println!(
        "   Time taken:       {}",
        format_elapsed(result.duration).bright_yellow().bold()
    );
    println!("   Queries/second:   {:.1}", result.queries_per_second);
    if let Some((query, elapsed)) = &result.slowest {
        println!("   Slowest:          {query} ({})", format_elapsed(*elapsed));
    }

    println!("\n📈 {}", "By mode:".bright_cyan().bold());
    let busiest = result
        .by_mode
        .values()
        .map(|stats| stats.queries)
        .max()
        .unwrap_or(0);
    for (mode, stats) in &result.by_mode {
        let bar = create_progress_bar(stats.queries as f64, busiest as f64, 20);
        println!(
            "   {mode:<17} {} {:4} queries  avg {:.3}ms",
            bar.green(),
            stats.queries,
            stats.average_ms()
        );
    }
}
