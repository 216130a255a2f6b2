//! Error taxonomy for corpus analysis

use crate::graph::DocumentId;
use linkrank_graph_algorithms::AlgoError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, building or ranking a corpus
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("corpus is empty")]
    EmptyGraph,

    #[error("cannot parse '{input}' as a document id: {reason}")]
    Parse { input: String, reason: String },

    #[error("document id {id} is outside [0, {len})")]
    IndexOutOfBounds { id: DocumentId, len: usize },

    #[error("document id {id} is claimed by both '{first}' and '{second}'")]
    DuplicateDocument {
        id: DocumentId,
        first: String,
        second: String,
    },

    #[error("PageRank did not converge after {iterations} iterations (last delta {delta})")]
    NotConverged { iterations: usize, delta: f64 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("algorithm error: {0}")]
    Algorithm(AlgoError),
}

impl From<AlgoError> for AnalysisError {
    fn from(err: AlgoError) -> Self {
        match err {
            AlgoError::EmptyGraph => AnalysisError::EmptyGraph,
            AlgoError::NotConverged { iterations, delta } => {
                AnalysisError::NotConverged { iterations, delta }
            }
            AlgoError::IndexOutOfBounds { index, len } => {
                AnalysisError::IndexOutOfBounds { id: index, len }
            }
            other => AnalysisError::Algorithm(other),
        }
    }
}

impl AnalysisError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalysisError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
