//! Shared graph representations
//!
//! Provides the dense adjacency matrix produced from a document corpus and a
//! read-only, CSR-encoded view of its topology for algorithm execution.

use crate::error::{AlgoError, AlgoResult};
use ndarray::{Array2, ArrayView2, Axis};

/// Node Identifier type: a dense document index in `[0, N)`
pub type NodeId = usize;

/// An N×N 0/1 matrix where `M[i][j] == 1` iff node `i` links to node `j`.
///
/// The dimension is fixed at construction. Self-loops are allowed; repeated
/// links collapse to a single cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    cells: Array2<u8>,
}

impl AdjacencyMatrix {
    /// Create an N×N matrix with no links
    pub fn zeros(node_count: usize) -> Self {
        Self {
            cells: Array2::zeros((node_count, node_count)),
        }
    }

    /// Wrap an existing array. Any non-zero cell is treated as a link.
    pub fn from_array(cells: Array2<u8>) -> AlgoResult<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols {
            return Err(AlgoError::NotSquare { rows, cols });
        }
        Ok(Self {
            cells: cells.mapv_into(|c| u8::from(c != 0)),
        })
    }

    /// Build a matrix from `(source, target)` pairs (test and embedding support)
    pub fn from_edges(
        node_count: usize,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> AlgoResult<Self> {
        let mut cells = Array2::zeros((node_count, node_count));
        for (source, target) in edges {
            for index in [source, target] {
                if index >= node_count {
                    return Err(AlgoError::IndexOutOfBounds { index, len: node_count });
                }
            }
            cells[[source, target]] = 1;
        }
        Ok(Self { cells })
    }

    /// Number of nodes (the matrix dimension)
    pub fn node_count(&self) -> usize {
        self.cells.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Whether the link `source -> target` exists
    pub fn contains(&self, source: NodeId, target: NodeId) -> bool {
        self.cells
            .get((source, target))
            .map_or(false, |&c| c != 0)
    }

    /// Number of distinct links
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// `out[i] = sum_j M[i][j]`
    pub fn out_degrees(&self) -> Vec<usize> {
        self.cells
            .axis_iter(Axis(0))
            .map(|row| row.iter().filter(|&&c| c != 0).count())
            .collect()
    }

    /// `in[i] = sum_j M[j][i]`
    pub fn in_degrees(&self) -> Vec<usize> {
        self.cells
            .axis_iter(Axis(1))
            .map(|col| col.iter().filter(|&&c| c != 0).count())
            .collect()
    }

    /// Raw cell view
    pub fn cells(&self) -> ArrayView2<'_, u8> {
        self.cells.view()
    }
}

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
}

impl GraphView {
    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Nodes with no outgoing links
    pub fn dangling_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_count).filter(move |&idx| self.out_degree(idx) == 0)
    }

    /// Build the CSR view from an adjacency matrix.
    ///
    /// Neighbor lists come out sorted ascending, so iteration order over
    /// predecessors is fixed for a given matrix.
    pub fn from_matrix(matrix: &AdjacencyMatrix) -> Self {
        let node_count = matrix.node_count();
        let cells = matrix.cells();

        let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for ((source, target), &cell) in cells.indexed_iter() {
            if cell != 0 {
                outgoing[source].push(target);
                incoming[target].push(source);
            }
        }

        Self::from_adjacency_list(node_count, outgoing, incoming)
    }

    /// Helper to create GraphView from adjacency lists
    pub fn from_adjacency_list(
        node_count: usize,
        outgoing: Vec<Vec<usize>>,
        incoming: Vec<Vec<usize>>,
    ) -> Self {
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();

        out_offsets.push(0);
        for neighbors in outgoing {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());
        }

        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        GraphView {
            node_count,
            out_offsets,
            out_targets,
            in_offsets,
            in_sources,
        }
    }
}
