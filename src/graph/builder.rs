//! Adjacency matrix construction from a corpus
//!
//! Each document's normalized handle picks its matrix row. Rows are filled in
//! parallel and every worker writes only the row of the document it owns, so
//! the matrix needs no locking.

use super::extract::extract_links;
use super::normalize::Normalizer;
use super::DocumentId;
use crate::config::{AnalysisConfig, LinkPolicy};
use crate::corpus::Document;
use crate::error::{AnalysisError, AnalysisResult};
use linkrank_graph_algorithms::AdjacencyMatrix;
use ndarray::parallel::prelude::*;
use ndarray::{Array2, ArrayViewMut1, Axis};
use serde::Serialize;
use tracing::{debug, info, warn};

/// A link dropped under [`LinkPolicy::Skip`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLink {
    pub source: DocumentId,
    pub token: String,
    pub reason: String,
}

/// Output of a successful build
#[derive(Debug, Clone)]
pub struct LinkGraph {
    pub matrix: AdjacencyMatrix,
    /// Handle of the document owning each row
    pub handles: Vec<String>,
    /// Links dropped under the skip policy, ordered by source row
    pub skipped: Vec<SkippedLink>,
}

impl LinkGraph {
    pub fn document_count(&self) -> usize {
        self.matrix.node_count()
    }
}

/// Builds adjacency matrices on a bounded worker pool
pub struct GraphBuilder {
    normalizer: Normalizer,
    policy: LinkPolicy,
    /// Dedicated pool; the global rayon pool is used when absent
    pool: Option<rayon::ThreadPool>,
}

impl GraphBuilder {
    pub fn new(normalizer: Normalizer, policy: LinkPolicy) -> Self {
        Self {
            normalizer,
            policy,
            pool: None,
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> AnalysisResult<Self> {
        let builder = Self::new(Normalizer::from_config(config), config.link_policy);
        match config.workers {
            Some(workers) => builder.with_workers(workers),
            None => Ok(builder),
        }
    }

    /// Run on a dedicated pool of `workers` threads
    pub fn with_workers(mut self, workers: usize) -> AnalysisResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("linkrank-build-{}", i))
            .build()
            .map_err(|e| AnalysisError::Config(format!("cannot start worker pool: {}", e)))?;
        self.pool = Some(pool);
        Ok(self)
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn policy(&self) -> LinkPolicy {
        self.policy
    }

    /// Run `op` inside this builder's pool
    pub fn install<R, F>(&self, op: F) -> R
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }

    /// Build the N×N matrix for `documents`
    pub fn build(&self, documents: &[Document]) -> AnalysisResult<LinkGraph> {
        let n = documents.len();
        if n == 0 {
            return Err(AnalysisError::EmptyGraph);
        }

        let owners = self.assign_rows(documents)?;
        debug!("Assigned {} documents to matrix rows", n);

        let mut cells = Array2::<u8>::zeros((n, n));
        let outcomes: Vec<AnalysisResult<Vec<SkippedLink>>> = self.install(|| {
            cells
                .axis_iter_mut(Axis(0))
                .into_par_iter()
                .enumerate()
                .map(|(source, row)| self.fill_row(source, &documents[owners[source]].content, row))
                .collect()
        });

        // First failure in row order, whatever order the workers finished in
        let mut skipped = Vec::new();
        for outcome in outcomes {
            skipped.extend(outcome?);
        }

        let matrix = AdjacencyMatrix::from_array(cells)?;
        info!(
            documents = n,
            links = matrix.edge_count(),
            skipped = skipped.len(),
            "Adjacency matrix built"
        );
        if !skipped.is_empty() {
            warn!("Skipped {} links that do not resolve to a document", skipped.len());
        }

        let handles = owners.iter().map(|&pos| documents[pos].handle.clone()).collect();
        Ok(LinkGraph {
            matrix,
            handles,
            skipped,
        })
    }

    /// Map each row index to the position of the document that owns it.
    ///
    /// Handles are validated strictly regardless of policy: a document without
    /// a valid, unique id in `[0, N)` has no row to own.
    fn assign_rows(&self, documents: &[Document]) -> AnalysisResult<Vec<usize>> {
        let n = documents.len();
        let mut owners: Vec<Option<usize>> = vec![None; n];

        for (pos, doc) in documents.iter().enumerate() {
            let id = self.normalizer.normalize(&doc.handle)?;
            let slot = owners
                .get_mut(id)
                .ok_or(AnalysisError::IndexOutOfBounds { id, len: n })?;
            if let Some(first) = *slot {
                return Err(AnalysisError::DuplicateDocument {
                    id,
                    first: documents[first].handle.clone(),
                    second: doc.handle.clone(),
                });
            }
            *slot = Some(pos);
        }

        // n distinct ids in [0, n) cover every row
        Ok(owners.into_iter().flatten().collect())
    }

    fn fill_row(
        &self,
        source: DocumentId,
        text: &str,
        mut row: ArrayViewMut1<'_, u8>,
    ) -> AnalysisResult<Vec<SkippedLink>> {
        let n = row.len();
        let mut skipped = Vec::new();

        for token in extract_links(text) {
            let resolved = self.normalizer.normalize(token).and_then(|target| {
                if target < n {
                    Ok(target)
                } else {
                    Err(AnalysisError::IndexOutOfBounds { id: target, len: n })
                }
            });

            match (resolved, self.policy) {
                (Ok(target), _) => row[target] = 1,
                (Err(err), LinkPolicy::Abort) => return Err(err),
                (Err(err), LinkPolicy::Skip) => {
                    debug!(source, token, "skipping link: {}", err);
                    skipped.push(SkippedLink {
                        source,
                        token: token.to_string(),
                        reason: err.to_string(),
                    });
                }
            }
        }

        Ok(skipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(handle: &str, links: &[&str]) -> Document {
        let content: String = links
            .iter()
            .map(|l| format!("text <a HREF=\"{}\"> link </a>\n", l))
            .collect();
        Document::new(handle, content)
    }

    fn builder(policy: LinkPolicy) -> GraphBuilder {
        GraphBuilder::new(Normalizer::new("files/", ".html"), policy)
    }

    #[test]
    fn test_rows_follow_handles_not_positions() {
        let docs = vec![
            doc("files/2.html", &["0.html"]),
            doc("files/0.html", &["1.html", "1.html"]),
            doc("files/1.html", &["1.html", "2.html"]),
        ];
        let graph = builder(LinkPolicy::Skip).build(&docs).unwrap();

        let expected = AdjacencyMatrix::from_edges(3, [(2, 0), (0, 1), (1, 1), (1, 2)]).unwrap();
        assert_eq!(graph.matrix, expected);
        assert_eq!(graph.handles, vec!["files/0.html", "files/1.html", "files/2.html"]);
        assert!(graph.skipped.is_empty());
    }

    #[test]
    fn test_empty_corpus() {
        assert!(matches!(
            builder(LinkPolicy::Skip).build(&[]),
            Err(AnalysisError::EmptyGraph)
        ));
    }

    #[test]
    fn test_skip_policy_records_bad_links() {
        let docs = vec![
            doc("files/0.html", &["1.html", "9.html", "bogus.html"]),
            doc("files/1.html", &["0.html"]),
        ];
        let graph = builder(LinkPolicy::Skip).build(&docs).unwrap();

        assert_eq!(graph.matrix.edge_count(), 2);
        assert_eq!(graph.skipped.len(), 2);
        assert_eq!(graph.skipped[0].source, 0);
        assert_eq!(graph.skipped[0].token, "9.html");
        assert_eq!(graph.skipped[1].token, "bogus.html");
    }

    #[test]
    fn test_abort_policy_reports_first_row() {
        let docs = vec![
            doc("files/1.html", &["bogus.html"]),
            doc("files/0.html", &["7.html"]),
        ];
        let err = builder(LinkPolicy::Abort).build(&docs).unwrap_err();
        // Row 0 fails before row 1 even though it comes second in the listing
        assert!(matches!(err, AnalysisError::IndexOutOfBounds { id: 7, len: 2 }));
    }

    #[test]
    fn test_bad_handles_abort_under_any_policy() {
        let out_of_range = vec![doc("files/0.html", &[]), doc("files/5.html", &[])];
        assert!(matches!(
            builder(LinkPolicy::Skip).build(&out_of_range),
            Err(AnalysisError::IndexOutOfBounds { id: 5, len: 2 })
        ));

        let unparsable = vec![doc("files/zero.html", &[])];
        assert!(matches!(
            builder(LinkPolicy::Skip).build(&unparsable),
            Err(AnalysisError::Parse { .. })
        ));

        let duplicate = vec![doc("files/0.html", &[]), doc("0.html", &[])];
        assert!(matches!(
            builder(LinkPolicy::Skip).build(&duplicate),
            Err(AnalysisError::DuplicateDocument { id: 0, .. })
        ));
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let docs: Vec<Document> = (0..50)
            .map(|i| {
                let targets: Vec<String> = (0..i % 7).map(|k| format!("{}.html", (i * 3 + k) % 50)).collect();
                let refs: Vec<&str> = targets.iter().map(String::as_str).collect();
                doc(&format!("files/{}.html", i), &refs)
            })
            .collect();

        let global = builder(LinkPolicy::Skip).build(&docs).unwrap();
        let pooled = builder(LinkPolicy::Skip).with_workers(3).unwrap().build(&docs).unwrap();
        assert_eq!(global.matrix, pooled.matrix);
    }
}
