//! PageRank algorithm implementation
//!
//! Power iteration over a [`GraphView`]:
//!
//! `rank'[i] = (1 - d) + d * Σ_{j → i} rank[j] / out[j]`
//!
//! Dangling nodes (`out[j] == 0`) contribute nothing to any other node. The
//! loop stops when the Euclidean distance between successive vectors drops
//! below the tolerance, or when the iteration cap is hit. The returned vector
//! is normalized to sum to 1.

use super::common::{GraphView, NodeId};
use crate::error::{AlgoError, AlgoResult};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Node count above which one pass is spread across the rayon pool
const PARALLEL_THRESHOLD: usize = 4096;

/// PageRank configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageRankConfig {
    /// Damping factor (usually 0.85), must lie in (0, 1)
    pub damping_factor: f64,
    /// Maximum Euclidean distance between successive passes to stop
    pub tolerance: f64,
    /// Hard cap on the number of passes
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            tolerance: 0.005,
            max_iterations: 100,
        }
    }
}

impl PageRankConfig {
    pub fn validate(&self) -> AlgoResult<()> {
        let d = self.damping_factor;
        if !(d > 0.0 && d < 1.0) {
            return Err(AlgoError::InvalidDampingFactor(d));
        }
        if !(self.tolerance > 0.0) {
            return Err(AlgoError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(AlgoError::InvalidIterationCap);
        }
        Ok(())
    }
}

/// Terminal state of a solver run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Convergence {
    Converged,
    IterationLimitReached,
}

/// Result of a PageRank run
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankResult {
    /// One score per node, non-negative, summing to 1
    pub scores: Vec<f64>,
    /// Passes executed
    pub iterations: usize,
    /// Euclidean distance between the last two passes
    pub delta: f64,
    pub status: Convergence,
}

impl PageRankResult {
    pub fn converged(&self) -> bool {
        self.status == Convergence::Converged
    }

    /// Turn an iteration-limited result into [`AlgoError::NotConverged`]
    pub fn into_converged(self) -> AlgoResult<Self> {
        match self.status {
            Convergence::Converged => Ok(self),
            Convergence::IterationLimitReached => Err(AlgoError::NotConverged {
                iterations: self.iterations,
                delta: self.delta,
            }),
        }
    }

    /// The `k` highest-scoring nodes, descending by score, ties by ascending id
    pub fn top_k(&self, k: usize) -> Vec<(NodeId, f64)> {
        let mut ranked: Vec<(NodeId, f64)> = self.scores.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(k);
        ranked
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: &PageRankConfig) -> AlgoResult<PageRankResult> {
    let n = view.node_count;

    if n == 0 {
        return Err(AlgoError::EmptyGraph);
    }
    config.validate()?;

    // 1. Initialize scores uniformly
    let mut scores = vec![1.0 / n as f64; n];
    let mut next_scores = vec![0.0; n];

    let d = config.damping_factor;
    let base_score = 1.0 - d;

    // 2. Iterate until the vector settles or the cap is reached
    let mut iterations = 0;
    let mut delta = f64::INFINITY;
    let mut status = Convergence::IterationLimitReached;

    while iterations < config.max_iterations {
        iterations += 1;

        let update = |i: usize| {
            let mut sum_incoming = 0.0;
            for &source_idx in view.predecessors(i) {
                let out_degree = view.out_degree(source_idx);
                if out_degree > 0 {
                    sum_incoming += scores[source_idx] / out_degree as f64;
                }
            }
            base_score + d * sum_incoming
        };

        if n >= PARALLEL_THRESHOLD {
            next_scores
                .par_iter_mut()
                .enumerate()
                .for_each(|(i, slot)| *slot = update(i));
        } else {
            for (i, slot) in next_scores.iter_mut().enumerate() {
                *slot = update(i);
            }
        }

        delta = euclidean_distance(&next_scores, &scores);
        std::mem::swap(&mut scores, &mut next_scores);
        debug!(iteration = iterations, delta, "pagerank pass");

        if delta < config.tolerance {
            status = Convergence::Converged;
            break;
        }
    }

    if status == Convergence::IterationLimitReached {
        warn!(iterations, delta, "pagerank hit its iteration cap before converging");
    }

    // 3. Normalize. Every entry is at least 1 - d > 0, so the sum is positive.
    let total: f64 = scores.iter().sum();
    for score in scores.iter_mut() {
        *score /= total;
    }

    Ok(PageRankResult {
        scores,
        iterations,
        delta,
        status,
    })
}

fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AdjacencyMatrix;

    fn view_of(node_count: usize, edges: &[(usize, usize)]) -> GraphView {
        let matrix = AdjacencyMatrix::from_edges(node_count, edges.iter().copied()).unwrap();
        GraphView::from_matrix(&matrix)
    }

    fn assert_distribution(scores: &[f64]) {
        let total: f64 = scores.iter().sum();
        assert!((total - 1.0).abs() < 1e-9, "scores sum to {}", total);
        assert!(scores.iter().all(|&s| s >= 0.0 && s.is_finite()));
    }

    #[test]
    fn test_cycle_converges_to_uniform() {
        let view = view_of(3, &[(0, 1), (1, 2), (2, 0)]);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        assert!(result.converged());
        assert_distribution(&result.scores);
        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_single_isolated_node() {
        let view = view_of(1, &[]);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        assert!(result.converged());
        assert_eq!(result.scores, vec![1.0]);
    }

    #[test]
    fn test_star_with_dangling_leaves() {
        let view = view_of(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        assert!(result.converged());
        assert_distribution(&result.scores);
        // Leaves are fed by the hub; the hub has no incoming links
        for leaf in 1..5 {
            assert!(result.scores[leaf] > result.scores[0]);
            assert!((result.scores[leaf] - result.scores[1]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_all_dangling_graph() {
        let view = view_of(4, &[]);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        assert_distribution(&result.scores);
        assert!(result.scores.iter().all(|&s| (s - 0.25).abs() < 1e-12));
    }

    #[test]
    fn test_disconnected_components() {
        // Two separate 2-cycles plus a self-loop
        let view = view_of(5, &[(0, 1), (1, 0), (2, 3), (3, 2), (4, 4)]);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        assert!(result.converged());
        assert_distribution(&result.scores);
        for score in &result.scores {
            assert!((score - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_deterministic_across_runs() {
        let edges = [(0, 1), (0, 2), (1, 2), (2, 0), (3, 2), (4, 3), (4, 0)];
        let view = view_of(5, &edges);
        let config = PageRankConfig::default();

        let first = page_rank(&view, &config).unwrap();
        let second = page_rank(&view, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_iteration_cap_reports_not_converged() {
        let view = view_of(3, &[(0, 1), (1, 0), (2, 0)]);
        let config = PageRankConfig {
            damping_factor: 0.99,
            tolerance: 1e-12,
            max_iterations: 3,
        };

        let result = page_rank(&view, &config).unwrap();
        assert_eq!(result.status, Convergence::IterationLimitReached);
        assert_eq!(result.iterations, 3);
        assert!(result.delta >= config.tolerance);
        assert_distribution(&result.scores);

        match result.into_converged() {
            Err(AlgoError::NotConverged { iterations, .. }) => assert_eq!(iterations, 3),
            other => panic!("expected NotConverged, got {:?}", other),
        }
    }

    #[test]
    fn test_hub_ranks_highest() {
        // Everyone links to node 2
        let view = view_of(4, &[(0, 2), (1, 2), (3, 2), (2, 0)]);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        let top = result.top_k(2);
        assert_eq!(top[0].0, 2);
        assert_eq!(top[1].0, 0);
    }

    #[test]
    fn test_top_k_breaks_ties_by_id() {
        let result = PageRankResult {
            scores: vec![0.2, 0.3, 0.2, 0.3],
            iterations: 1,
            delta: 0.0,
            status: Convergence::Converged,
        };
        let ids: Vec<NodeId> = result.top_k(10).into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_large_ring_uses_parallel_pass() {
        let n = PARALLEL_THRESHOLD + 10;
        let edges: Vec<(usize, usize)> = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let view = view_of(n, &edges);
        let result = page_rank(&view, &PageRankConfig::default()).unwrap();

        assert!(result.converged());
        assert_distribution(&result.scores);
        assert!(result.scores.iter().all(|&s| (s - 1.0 / n as f64).abs() < 1e-12));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let view = view_of(2, &[(0, 1)]);

        let config = PageRankConfig { damping_factor: 1.0, ..Default::default() };
        assert_eq!(page_rank(&view, &config), Err(AlgoError::InvalidDampingFactor(1.0)));

        let config = PageRankConfig { tolerance: 0.0, ..Default::default() };
        assert_eq!(page_rank(&view, &config), Err(AlgoError::InvalidTolerance(0.0)));

        let config = PageRankConfig { max_iterations: 0, ..Default::default() };
        assert_eq!(page_rank(&view, &config), Err(AlgoError::InvalidIterationCap));
    }

    #[test]
    fn test_empty_graph_rejected() {
        let view = view_of(0, &[]);
        assert_eq!(
            page_rank(&view, &PageRankConfig::default()),
            Err(AlgoError::EmptyGraph)
        );
    }
}
