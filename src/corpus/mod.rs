//! Corpus sources
//!
//! The analysis core only needs an ordered list of `(handle, content)`
//! documents. Where they come from is up to the [`CorpusSource`] handed to it.

pub mod local;
pub mod synthetic;

pub use local::DirectoryCorpus;
pub use synthetic::{generate, write_to_dir, SyntheticConfig};

use crate::error::AnalysisResult;

/// One raw document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// `<optional-prefix>/<digits>.<ext>`
    pub handle: String,
    pub content: String,
}

impl Document {
    pub fn new(handle: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            content: content.into(),
        }
    }
}

/// Supplies a snapshot of the corpus
pub trait CorpusSource {
    fn documents(&self) -> AnalysisResult<Vec<Document>>;
}

/// A corpus held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCorpus {
    documents: Vec<Document>,
}

impl InMemoryCorpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

impl FromIterator<Document> for InMemoryCorpus {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl CorpusSource for InMemoryCorpus {
    fn documents(&self) -> AnalysisResult<Vec<Document>> {
        Ok(self.documents.clone())
    }
}
