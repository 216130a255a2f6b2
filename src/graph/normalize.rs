//! Identifier normalization
//!
//! Document handles (`files/12.html`) and link targets (`12.html`) go through
//! the same function so a document resolves to one id whichever form named it.

use super::DocumentId;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult};

/// Maps raw handles and link targets to dense document ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalizer {
    root: String,
    extension: String,
}

impl Normalizer {
    pub fn new(root: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.corpus_root.clone(), config.extension.clone())
    }

    /// Strip the corpus root and extension, then parse the rest as a base-10 id
    pub fn normalize(&self, raw: &str) -> AnalysisResult<DocumentId> {
        let mut rest = raw;
        if !self.root.is_empty() {
            if let Some(stripped) = rest.strip_prefix(self.root.as_str()) {
                rest = stripped.strip_prefix('/').unwrap_or(stripped);
            }
        }
        if !self.extension.is_empty() {
            rest = rest.strip_suffix(self.extension.as_str()).unwrap_or(rest);
        }

        if rest.is_empty() {
            return Err(parse_error(raw, "no digits left after stripping"));
        }
        if !rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_error(raw, format!("'{}' is not a non-negative integer", rest)));
        }

        rest.parse::<DocumentId>()
            .map_err(|e| parse_error(raw, e.to_string()))
    }
}

fn parse_error(input: &str, reason: impl Into<String>) -> AnalysisError {
    AnalysisError::Parse {
        input: input.to_string(),
        reason: reason.into(),
    }
}
