//! Corpus sources
//!
//! A source turns a language tag into raw word-list text. Where the text
//! comes from (memory, disk, network) is the source's business; the
//! dispatcher only normalizes what it returns.

use crate::corpus::{SAMPLE, SAMPLE_LANGUAGE};
use crate::errors::EngineError;
use rustc_hash::FxHashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

/// Supplier of raw word-list text per language
pub trait CorpusSource: Send + Sync + 'static {
    /// Fetch newline-delimited raw text for `language`
    ///
    /// Implementations return [`EngineError::Load`] when the list is missing
    /// or unreadable.
    fn fetch(&self, language: &str) -> impl Future<Output = Result<String, EngineError>> + Send;
}

/// In-memory word lists keyed by language
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    lists: FxHashMap<String, Arc<str>>,
}

impl StaticSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in sample list, registered as `sample`
    #[must_use]
    pub fn embedded() -> Self {
        Self::new().with_language(SAMPLE_LANGUAGE, SAMPLE.join("\n"))
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.lists.insert(language.into(), Arc::from(text.into()));
        self
    }
}

impl CorpusSource for StaticSource {
    async fn fetch(&self, language: &str) -> Result<String, EngineError> {
        self.lists
            .get(language)
            .map(|text| text.to_string())
            .ok_or_else(|| EngineError::load(language, "no word list registered"))
    }
}

/// Word lists read from disk
///
/// Languages map to explicit files first; otherwise, when a directory is set,
/// `<directory>/<language>.txt` is used.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    files: FxHashMap<String, PathBuf>,
    directory: Option<PathBuf>,
}

impl FileSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve unknown languages to `<directory>/<language>.txt`
    #[must_use]
    pub fn directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            files: FxHashMap::default(),
            directory: Some(directory.into()),
        }
    }

    #[must_use]
    pub fn with_file(mut self, language: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.insert(language.into(), path.into());
        self
    }

    fn resolve(&self, language: &str) -> Result<PathBuf, EngineError> {
        if let Some(path) = self.files.get(language) {
            return Ok(path.clone());
        }
        let Some(directory) = &self.directory else {
            return Err(EngineError::load(language, "no word list registered"));
        };
        let valid_tag = !language.is_empty()
            && language
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_tag {
            return Err(EngineError::load(language, "invalid language tag"));
        }
        Ok(directory.join(format!("{language}.txt")))
    }
}

impl CorpusSource for FileSource {
    async fn fetch(&self, language: &str) -> Result<String, EngineError> {
        let path = self.resolve(language)?;
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| EngineError::load(language, format!("{}: {e}", path.display())))
    }
}
