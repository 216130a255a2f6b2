//! End-to-end corpus analysis
//!
//! corpus → adjacency matrix → {degree statistics, PageRank} → report.
//! Statistics and PageRank only read the finished matrix and run side by side.

use crate::config::AnalysisConfig;
use crate::corpus::CorpusSource;
use crate::error::AnalysisResult;
use crate::graph::{GraphBuilder, LinkGraph};
use crate::report::{AnalysisReport, ReportOptions};
use linkrank_graph_algorithms::{degree_statistics, page_rank, GraphView};
use std::time::Instant;
use tracing::{info, warn};

/// Runs analyses with one validated configuration
pub struct Analyzer {
    config: AnalysisConfig,
    builder: GraphBuilder,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        let builder = GraphBuilder::from_config(&config)?;
        Ok(Self { config, builder })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load the corpus from `source` and analyze it
    pub fn run(&self, source: &dyn CorpusSource) -> AnalysisResult<AnalysisReport> {
        let started = Instant::now();

        let documents = source.documents()?;
        info!("Loaded {} documents", documents.len());

        let graph = self.builder.build(&documents)?;
        self.analyze_graph(&graph, started)
    }

    /// Statistics, PageRank and report for an already built graph
    pub fn analyze_graph(&self, graph: &LinkGraph, started: Instant) -> AnalysisResult<AnalysisReport> {
        let view = GraphView::from_matrix(&graph.matrix);
        let solver = &self.config.pagerank;

        let (degrees, ranks) = self.builder.install(|| {
            rayon::join(
                || degree_statistics(&graph.matrix),
                || page_rank(&view, solver),
            )
        });
        let degrees = degrees?;
        let ranks = ranks?;

        if ranks.converged() {
            info!("PageRank converged after {} iterations", ranks.iterations);
        } else {
            warn!(
                "PageRank stopped at the iteration cap ({}) with delta {}",
                ranks.iterations, ranks.delta
            );
        }

        let options = ReportOptions {
            top_k: self.config.top_k,
            include_scores: self.config.include_scores,
        };
        Ok(AnalysisReport::new(graph, degrees, ranks, solver, options, started.elapsed()))
    }
}

/// One-shot analysis with `config`
pub fn analyze(source: &dyn CorpusSource, config: &AnalysisConfig) -> AnalysisResult<AnalysisReport> {
    Analyzer::new(config.clone())?.run(source)
}
