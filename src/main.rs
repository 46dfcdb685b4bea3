//! Lexicon - CLI
//!
//! Unscramble, pattern, Wordle and Spelling Bee lookups over a word list,
//! plus a JSON-lines server speaking the dispatch protocol.

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, Subcommand};
use lexicon_engine::{
    commands::{check_anagrams, find_anagrams, run_benchmark, run_lookup, run_serve},
    config::{DEFAULT_MIN_WORD_LENGTH, EngineConfig},
    core::{ConstraintQuery, KeysetQuery, PatternQuery, Query, SubsetQuery},
    corpus::SAMPLE_LANGUAGE,
    dispatch::{CorpusSource, Dispatcher, FileSource, StaticSource},
    engine::{KeysetScoring, OrderBy, QueryRequest},
    output::{
        print_anagram_check, print_anagram_matches, print_benchmark_result, print_lookup_result,
    },
};
use std::path::{Path, PathBuf};
use tokio::io::BufReader;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "lexicon",
    about = "Word search over a word list: unscramble, patterns, Wordle and Spelling Bee",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Word list: 'sample' (default, built in), a file, or a directory of <language>.txt files
    #[arg(short = 'w', long, global = true, default_value = "sample")]
    wordlist: String,

    /// Language tag (required with a directory word list)
    #[arg(short = 'l', long, global = true)]
    language: Option<String>,

    /// Shortest word kept when loading a word list
    #[arg(long, global = true, default_value_t = DEFAULT_MIN_WORD_LENGTH)]
    min_length: usize,

    /// Maximum wildcards allowed in an unscramble query
    #[arg(long, global = true)]
    wildcard_cap: Option<usize>,

    /// Show at most this many results
    #[arg(short = 'n', long, global = true)]
    limit: Option<usize>,

    /// Ordering: by-score (default), by-length, alphabetical
    #[arg(short, long, global = true, value_parser = parse_order)]
    sort: Option<OrderBy>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); also shows scores
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Words that can be built from a rack of letters
    Unscramble {
        /// Available letters; each '?' is a blank tile
        letters: String,

        /// Extra blank tiles
        #[arg(long, default_value_t = 0)]
        wildcards: usize,

        /// Required word start
        #[arg(long)]
        prefix: Option<String>,

        /// Required word end
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Words matching a positional mask such as h_ll_
    Pattern {
        /// Letters and '_' or '.' wildcards
        mask: String,
    },

    /// Solve a Wordle position
    Wordle {
        /// Known letters in place, blanks as '_' (e.g. cr_n_)
        #[arg(default_value = "_____")]
        green: String,

        /// Letters known to be in the word
        #[arg(short, long, default_value = "")]
        yellow: String,

        /// Letters known to be absent
        #[arg(short, long, default_value = "")]
        gray: String,

        /// Word length (default 5)
        #[arg(long)]
        length: Option<usize>,
    },

    /// Solve a Spelling Bee puzzle
    Bee {
        /// Letter every word must contain
        center: char,

        /// The other allowed letters
        outer: String,

        /// Shortest accepted word (default 4)
        #[arg(short, long)]
        minimum: Option<usize>,

        /// Scoring: bee (default) or letter-values
        #[arg(long, value_parser = parse_scoring)]
        scoring: Option<KeysetScoring>,
    },

    /// Check two phrases, or find word-list anagrams of one
    Anagram {
        first: String,
        second: Option<String>,
    },

    /// Serve the dispatch protocol as JSON lines on stdin/stdout
    Serve,

    /// Time random queries against the word list
    Benchmark {
        /// Number of random queries
        #[arg(short = 'c', long, default_value = "200")]
        count: usize,

        /// Seed for query generation
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

fn parse_order(name: &str) -> Result<OrderBy, String> {
    OrderBy::from_name(name)
        .ok_or_else(|| format!("unknown ordering `{name}` (by-score, by-length, alphabetical)"))
}

fn parse_scoring(name: &str) -> Result<KeysetScoring, String> {
    KeysetScoring::from_name(name)
        .ok_or_else(|| format!("unknown scoring `{name}` (bee, letter-values)"))
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Where words come from, resolved from `--wordlist`
enum Wordlist {
    Sample,
    Files { source: FileSource, language: String },
}

fn resolve_wordlist(wordlist: &str, language: Option<&str>) -> Result<Wordlist> {
    if wordlist == SAMPLE_LANGUAGE {
        return Ok(Wordlist::Sample);
    }

    let path = PathBuf::from(wordlist);
    if path.is_dir() {
        let language = language.context("--language is required with a word list directory")?;
        return Ok(Wordlist::Files {
            source: FileSource::directory(path),
            language: language.to_string(),
        });
    }
    if !path.is_file() {
        bail!("word list `{wordlist}` is neither 'sample' nor an existing file or directory");
    }

    let language = language
        .map(str::to_string)
        .or_else(|| file_stem(&path))
        .unwrap_or_else(|| "custom".to_string());
    Ok(Wordlist::Files {
        source: FileSource::new().with_file(language.clone(), path),
        language,
    })
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}

fn engine_config(cli: &Cli) -> EngineConfig {
    let mut config = EngineConfig::default()
        .with_min_word_length(cli.min_length)
        .with_wildcard_cap(cli.wildcard_cap)
        .with_limit(cli.limit);
    if let Commands::Bee {
        scoring: Some(scoring),
        ..
    } = &cli.command
    {
        config = config.with_keyset_scoring(*scoring);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = engine_config(&cli);

    match resolve_wordlist(&cli.wordlist, cli.language.as_deref())? {
        Wordlist::Sample => run_with(StaticSource::embedded(), SAMPLE_LANGUAGE, config, &cli).await,
        Wordlist::Files { source, language } => run_with(source, &language, config, &cli).await,
    }
}

async fn run_with<S: CorpusSource>(
    source: S,
    language: &str,
    config: EngineConfig,
    cli: &Cli,
) -> Result<()> {
    let dispatcher = Dispatcher::new(source, config);

    let query: Query = match &cli.command {
        Commands::Unscramble {
            letters,
            wildcards,
            prefix,
            suffix,
        } => {
            let mut query = SubsetQuery::new(letters.as_str()).with_wildcards(*wildcards);
            if let Some(prefix) = prefix {
                query = query.with_prefix(prefix.as_str());
            }
            if let Some(suffix) = suffix {
                query = query.with_suffix(suffix.as_str());
            }
            query.into()
        }
        Commands::Pattern { mask } => PatternQuery::new(mask.as_str()).into(),
        Commands::Wordle {
            green,
            yellow,
            gray,
            length,
        } => {
            let mut query = ConstraintQuery::new(green.as_str())
                .with_required(yellow.as_str())
                .with_excluded(gray.as_str());
            if let Some(length) = length {
                query = query.with_length(*length);
            }
            query.into()
        }
        Commands::Bee {
            center,
            outer,
            minimum,
            ..
        } => {
            let mut query = KeysetQuery::new(*center, outer.as_str());
            if let Some(minimum) = minimum {
                query = query.with_min_length(*minimum);
            }
            query.into()
        }
        Commands::Anagram { first, second } => {
            return run_anagram(&dispatcher, language, first, second.as_deref()).await;
        }
        Commands::Serve => {
            let stats = run_serve(
                dispatcher,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await?;
            tracing::info!(
                requests = stats.requests,
                responses = stats.responses,
                malformed = stats.malformed,
                "serve session ended"
            );
            return Ok(());
        }
        Commands::Benchmark { count, seed } => {
            println!("Running benchmark on {count} random queries...");
            let result = run_benchmark(&dispatcher, language, *count, *seed, true).await?;
            print_benchmark_result(&result);
            return Ok(());
        }
    };

    let request = QueryRequest::new(query).with_order(cli.sort.unwrap_or_default());
    let result = run_lookup(&dispatcher, language, request).await?;
    print_lookup_result(&result, cli.verbose > 0);
    Ok(())
}

async fn run_anagram<S: CorpusSource>(
    dispatcher: &Dispatcher<S>,
    language: &str,
    first: &str,
    second: Option<&str>,
) -> Result<()> {
    if let Some(second) = second {
        print_anagram_check(&check_anagrams(first, second));
    } else {
        let matches = find_anagrams(dispatcher, language, first).await?;
        print_anagram_matches(first, &matches);
    }
    Ok(())
}
