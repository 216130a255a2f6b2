//! Linkrank
//!
//! Link graph analysis for corpora of hyperlinked documents: builds a directed
//! adjacency matrix from raw HTML, summarizes in/out-degree distributions and
//! ranks documents with PageRank.
//!
//! # Architecture
//!
//! - `graph`: link extraction, identifier normalization, parallel matrix construction
//! - `linkrank-graph-algorithms`: matrix and CSR types, degree statistics, PageRank
//! - `corpus`: where documents come from (memory, a local directory, a generator)
//! - `analysis` / `report`: the pipeline and its output record
//!
//! ## Example Usage
//!
//! ```rust
//! use linkrank::{analyze, AnalysisConfig, Document, InMemoryCorpus};
//!
//! let corpus = InMemoryCorpus::new(vec![
//!     Document::new("0.html", r#"<a HREF="1.html">next</a>"#),
//!     Document::new("1.html", r#"<a HREF="2.html">next</a>"#),
//!     Document::new("2.html", r#"<a HREF="0.html">next</a>"#),
//! ]);
//!
//! let report = analyze(&corpus, &AnalysisConfig::default()).unwrap();
//! assert_eq!(report.documents, 3);
//! assert_eq!(report.links, 3);
//! assert!(report.pagerank.converged);
//! ```

#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod graph;
pub mod report;

// Re-export main types for convenience
pub use analysis::{analyze, Analyzer};
pub use config::{AnalysisConfig, LinkPolicy};
pub use corpus::{CorpusSource, DirectoryCorpus, Document, InMemoryCorpus, SyntheticConfig};
pub use error::{AnalysisError, AnalysisResult};
pub use graph::{
    extract_links, DocumentId, GraphBuilder, LinkGraph, Links, Normalizer, SkippedLink,
};
pub use report::{AnalysisReport, DegreeEntry, PageRankSummary, RankedDocument, ReportOptions};

pub use linkrank_graph_algorithms::{
    AdjacencyMatrix, Convergence, DegreeReport, DegreeStatistics, GraphView, PageRankConfig,
    PageRankResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
