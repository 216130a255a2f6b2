//! Deterministic synthetic corpus
//!
//! Produces small HTML pages of filler text, each carrying a random number of
//! links to uniformly chosen pages of the same corpus. The same seed always
//! yields the same corpus.

use super::Document;
use crate::error::{AnalysisError, AnalysisResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::info;

const FILLER: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad\n\
minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea \
commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse\n\
cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non \
proident, sunt in culpa qui officia deserunt mollit anim id est laborum.\n<p>\n";

/// Shape of a generated corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticConfig {
    pub num_files: usize,
    /// Exclusive upper bound on links per page
    pub max_refs: usize,
    pub seed: u64,
    pub extension: String,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            num_files: 10_000,
            max_refs: 250,
            seed: 0,
            extension: ".html".to_string(),
        }
    }
}

/// Generate the corpus in memory
pub fn generate(config: &SyntheticConfig) -> Vec<Document> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    (0..config.num_files)
        .map(|idx| {
            let mut content = String::from("<!DOCTYPE html>\n<html>\n<body>\n");
            let num_refs = if config.max_refs == 0 {
                0
            } else {
                rng.gen_range(0..config.max_refs)
            };
            for _ in 0..num_refs {
                content.push_str(FILLER);
                let target = rng.gen_range(0..config.num_files);
                let _ = write!(
                    content,
                    "<a HREF=\"{}{}\"> This is a link </a>\n<p>\n",
                    target, config.extension
                );
            }
            content.push_str("</body>\n</html>\n");

            Document {
                handle: format!("{}{}", idx, config.extension),
                content,
            }
        })
        .collect()
}

/// Write documents to `dir`, one file per handle
pub fn write_to_dir(dir: impl AsRef<Path>, documents: &[Document]) -> AnalysisResult<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| AnalysisError::io(dir, e))?;

    for doc in documents {
        let path = dir.join(&doc.handle);
        fs::write(&path, &doc.content).map_err(|e| AnalysisError::io(&path, e))?;
    }

    info!("Wrote {} documents to {:?}", documents.len(), dir);
    Ok(())
}
