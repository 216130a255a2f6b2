//! Graph algorithms over document link graphs
//!
//! Pure topology: adjacency matrices, CSR views, degree statistics and
//! PageRank. No I/O happens in this crate.

pub mod common;
pub mod degree;
pub mod error;
pub mod pagerank;

pub use common::{AdjacencyMatrix, GraphView, NodeId};
pub use degree::{degree_statistics, percentile, DegreeReport, DegreeStatistics, QUINTILES};
pub use error::{AlgoError, AlgoResult};
pub use pagerank::{page_rank, Convergence, PageRankConfig, PageRankResult};
