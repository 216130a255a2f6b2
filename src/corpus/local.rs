//! Corpus read from a local directory

use super::{CorpusSource, Document};
use crate::error::{AnalysisError, AnalysisResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Every regular file in `dir` whose name ends with `extension`.
///
/// Handles are bare file names, sorted so the listing order is stable.
#[derive(Debug, Clone)]
pub struct DirectoryCorpus {
    dir: PathBuf,
    extension: String,
}

impl DirectoryCorpus {
    pub fn new(dir: impl AsRef<Path>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: extension.into(),
        }
    }
}

impl CorpusSource for DirectoryCorpus {
    fn documents(&self) -> AnalysisResult<Vec<Document>> {
        info!("Reading corpus from {:?}", self.dir);

        let entries = fs::read_dir(&self.dir).map_err(|e| AnalysisError::io(&self.dir, e))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AnalysisError::io(&self.dir, e))?;
            let path = entry.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.ends_with(self.extension.as_str()));
            if matches && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = fs::read_to_string(&path).map_err(|e| AnalysisError::io(&path, e))?;
            let handle = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            documents.push(Document { handle, content });
        }

        debug!("Read {} documents", documents.len());
        Ok(documents)
    }
}
