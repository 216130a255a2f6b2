//! Degree distribution statistics
//!
//! Summarizes the in-degree and out-degree distributions of an adjacency
//! matrix: mean, median, extremes and quintiles.

use super::common::AdjacencyMatrix;
use crate::error::{AlgoError, AlgoResult};

/// Quantile levels reported for every distribution
pub const QUINTILES: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];

/// Summary of one degree distribution
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeStatistics {
    pub mean: f64,
    pub median: f64,
    pub max: usize,
    pub min: usize,
    /// Values at the 20/40/60/80/100th percentiles
    pub quintiles: [f64; 5],
}

/// In-degree and out-degree statistics of one graph
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DegreeReport {
    pub incoming: DegreeStatistics,
    pub outgoing: DegreeStatistics,
}

impl DegreeStatistics {
    /// Summarize a list of degrees. Fails on an empty list.
    pub fn from_degrees(degrees: &[usize]) -> AlgoResult<Self> {
        let mut sorted = degrees.to_vec();
        sorted.sort_unstable();

        let (min, max) = match (sorted.first(), sorted.last()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Err(AlgoError::EmptyGraph),
        };

        let values: Vec<f64> = sorted.iter().map(|&d| d as f64).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;

        Ok(Self {
            mean,
            median: percentile(&values, 0.5),
            max,
            min,
            quintiles: QUINTILES.map(|q| percentile(&values, q)),
        })
    }
}

/// Linear interpolation between order statistics.
///
/// For `n` sorted values the rank is `h = (n - 1) * q`; the result is
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
/// `sorted` must be non-empty and ascending; `q` is clamped to `[0, 1]`.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    sorted[lower] + (h - lower as f64) * (sorted[upper] - sorted[lower])
}

/// Compute in-degree and out-degree statistics for the matrix
pub fn degree_statistics(matrix: &AdjacencyMatrix) -> AlgoResult<DegreeReport> {
    if matrix.is_empty() {
        return Err(AlgoError::EmptyGraph);
    }

    Ok(DegreeReport {
        incoming: DegreeStatistics::from_degrees(&matrix.in_degrees())?,
        outgoing: DegreeStatistics::from_degrees(&matrix.out_degrees())?,
    })
}
