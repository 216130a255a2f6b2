//! Analysis report
//!
//! Collects degree statistics and ranked lists into one serializable record
//! and renders it as plain text.

use crate::graph::{DocumentId, LinkGraph};
use linkrank_graph_algorithms::{
    DegreeReport, DegreeStatistics, PageRankConfig, PageRankResult,
};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// A document and its PageRank score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDocument {
    pub id: DocumentId,
    pub handle: String,
    pub score: f64,
}

/// A document and one of its degrees
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub id: DocumentId,
    pub handle: String,
    pub degree: usize,
}

/// How the solver run ended
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRankSummary {
    pub iterations: usize,
    pub converged: bool,
    pub delta: f64,
    pub damping_factor: f64,
    pub tolerance: f64,
    pub max_iterations: usize,
}

/// Everything one analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub documents: usize,
    /// Distinct links in the matrix
    pub links: usize,
    /// Links dropped under the skip policy
    pub skipped_links: usize,
    pub incoming: DegreeStatistics,
    pub outgoing: DegreeStatistics,
    pub pagerank: PageRankSummary,
    pub top_pages: Vec<RankedDocument>,
    pub top_incoming: Vec<DegreeEntry>,
    pub top_outgoing: Vec<DegreeEntry>,
    /// Full rank vector, indexed by document id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<f64>>,
    pub elapsed_ms: u64,
}

/// Parameters that shape a report but not the analysis itself
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub top_k: usize,
    pub include_scores: bool,
}

impl AnalysisReport {
    pub fn new(
        graph: &LinkGraph,
        degrees: DegreeReport,
        ranks: PageRankResult,
        solver: &PageRankConfig,
        options: ReportOptions,
        elapsed: Duration,
    ) -> Self {
        let handle = |id: DocumentId| graph.handles.get(id).cloned().unwrap_or_default();
        let degree_entries = |degrees: Vec<usize>| {
            top_by_degree(&degrees, options.top_k)
                .into_iter()
                .map(|(id, degree)| DegreeEntry {
                    id,
                    handle: handle(id),
                    degree,
                })
                .collect::<Vec<_>>()
        };

        let top_pages = ranks
            .top_k(options.top_k)
            .into_iter()
            .map(|(id, score)| RankedDocument {
                id,
                handle: handle(id),
                score,
            })
            .collect();

        Self {
            documents: graph.document_count(),
            links: graph.matrix.edge_count(),
            skipped_links: graph.skipped.len(),
            incoming: degrees.incoming,
            outgoing: degrees.outgoing,
            pagerank: PageRankSummary {
                iterations: ranks.iterations,
                converged: ranks.converged(),
                delta: ranks.delta,
                damping_factor: solver.damping_factor,
                tolerance: solver.tolerance,
                max_iterations: solver.max_iterations,
            },
            top_pages,
            top_incoming: degree_entries(graph.matrix.in_degrees()),
            top_outgoing: degree_entries(graph.matrix.out_degrees()),
            scores: options.include_scores.then_some(ranks.scores),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// The `k` highest degrees, descending, ties by ascending id
pub fn top_by_degree(degrees: &[usize], k: usize) -> Vec<(DocumentId, usize)> {
    let mut ranked: Vec<(DocumentId, usize)> = degrees.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(k);
    ranked
}

fn write_statistics(f: &mut fmt::Formatter<'_>, title: &str, stats: &DegreeStatistics) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(f, "{}", "-".repeat(title.len()))?;
    writeln!(f, "Average: {}", stats.mean)?;
    writeln!(f, "Median: {}", stats.median)?;
    writeln!(f, "Max: {}", stats.max)?;
    writeln!(f, "Min: {}", stats.min)?;
    writeln!(f, "Quintiles: {:?}", stats.quintiles)?;
    writeln!(f)
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Documents: {}, links: {}, skipped links: {}", self.documents, self.links, self.skipped_links)?;
        writeln!(f)?;
        write_statistics(f, "Incoming Links Statistics:", &self.incoming)?;
        write_statistics(f, "Outgoing Links Statistics:", &self.outgoing)?;

        let title = format!("PageRank Scores (Top {}):", self.top_pages.len());
        writeln!(f, "{}", title)?;
        writeln!(f, "{}", "-".repeat(title.len()))?;
        for page in &self.top_pages {
            writeln!(f, "Page: {}, Score: {}", page.id, page.score)?;
        }
        if !self.pagerank.converged {
            writeln!(
                f,
                "warning: not converged after {} iterations (delta {})",
                self.pagerank.iterations, self.pagerank.delta
            )?;
        }

        writeln!(f)?;
        write!(f, "Time Elapsed: {:.2} seconds", self.elapsed_ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_by_degree_orders_ties_by_id() {
        assert_eq!(
            top_by_degree(&[2, 5, 2, 5, 0], 4),
            vec![(1, 5), (3, 5), (0, 2), (2, 2)]
        );
        assert!(top_by_degree(&[1, 2], 0).is_empty());
        assert_eq!(top_by_degree(&[1], 10), vec![(0, 1)]);
    }
}
