//! Errors raised by the graph algorithms

use thiserror::Error;

/// Errors that can occur while constructing a matrix or running an algorithm
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("adjacency matrix must be square, got {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("node index {index} is outside [0, {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("damping factor must lie in (0, 1), got {0}")]
    InvalidDampingFactor(f64),

    #[error("convergence tolerance must be positive, got {0}")]
    InvalidTolerance(f64),

    #[error("iteration cap must be at least 1")]
    InvalidIterationCap,

    #[error("PageRank did not converge after {iterations} iterations (last delta {delta})")]
    NotConverged { iterations: usize, delta: f64 },
}

pub type AlgoResult<T> = Result<T, AlgoError>;
