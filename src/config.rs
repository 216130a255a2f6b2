//! Analysis configuration
//!
//! Loaded from YAML or JSON; every field has a default so partial files work.

use crate::error::{AnalysisError, AnalysisResult};
use linkrank_graph_algorithms::PageRankConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a link token that does not resolve to a document in the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Drop the offending link, count it, keep building
    #[default]
    Skip,
    /// Fail the whole build on the first offending link
    Abort,
}

/// Configuration for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Prefix stripped from handles and link targets, e.g. `files/`
    pub corpus_root: String,
    /// Suffix stripped from handles and link targets
    pub extension: String,
    pub link_policy: LinkPolicy,
    /// Worker pool size for graph construction (None = available parallelism)
    pub workers: Option<usize>,
    /// Entries kept in each ranked list of the report
    pub top_k: usize,
    /// Include the full rank vector in the report
    pub include_scores: bool,
    pub pagerank: PageRankConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            corpus_root: String::new(),
            extension: ".html".to_string(),
            link_policy: LinkPolicy::Skip,
            workers: None,
            top_k: 5,
            include_scores: false,
            pagerank: PageRankConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a `.yaml`/`.yml` or `.json` file
    pub fn from_file(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::io(path, e))?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text)
                .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?,
            _ => {
                return Err(AnalysisError::Config(format!(
                    "unsupported config format: {}",
                    path.display()
                )))
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AnalysisResult<()> {
        self.pagerank.validate()?;
        if self.workers == Some(0) {
            return Err(AnalysisError::Config("workers must be at least 1".to_string()));
        }
        Ok(())
    }
}
