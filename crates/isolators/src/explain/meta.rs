//! Aggregation of sample decision paths into per-node and per-path tables.

use serde::Serialize;

use crate::data::SamplesView;
use crate::explain::ExplainError;
use crate::repr::{ForestView, NodeId, TreeView};

// ============================================================================
// Verdict
// ============================================================================

/// Prediction label for one sample: `+1` normal, `-1` anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Normal,
    Anomaly,
}

impl Verdict {
    /// Convert from the conventional `+1` / `-1` integer label.
    ///
    /// Returns `None` for any other value.
    pub fn from_label(label: i32) -> Option<Self> {
        match label {
            1 => Some(Verdict::Normal),
            -1 => Some(Verdict::Anomaly),
            _ => None,
        }
    }

    /// The conventional integer label: `+1` normal, `-1` anomaly.
    pub fn label(self) -> i32 {
        match self {
            Verdict::Normal => 1,
            Verdict::Anomaly => -1,
        }
    }

    /// Whether this is the anomaly label.
    #[inline]
    pub fn is_anomaly(self) -> bool {
        matches!(self, Verdict::Anomaly)
    }
}

// ============================================================================
// NodeMeta / PathMeta
// ============================================================================

/// Aggregate verdict counts for one tree node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeMeta {
    /// Samples predicted normal whose path includes this node.
    pub normal_count: u32,
    /// Samples predicted anomalous whose path includes this node.
    pub anomaly_count: u32,
    /// Verdict stamped when this node is some sample's terminal leaf.
    /// `None` on nodes that are internal for every sample.
    pub verdict: Option<Verdict>,
}

impl NodeMeta {
    /// Total samples whose path includes this node.
    pub fn samples(&self) -> u32 {
        self.normal_count + self.anomaly_count
    }

    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Normal => self.normal_count += 1,
            Verdict::Anomaly => self.anomaly_count += 1,
        }
    }
}

/// Ordered split conditions along one anomalous decision path.
///
/// The three sequences are parallel and ordered root to leaf; the final
/// entries describe the terminal leaf itself, whose split slots carry no
/// meaningful values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PathMeta {
    pub thresholds: Vec<f32>,
    pub features: Vec<u32>,
    /// True when the node at this position immediately follows the
    /// previously visited node in index order, i.e. it was reached by the
    /// left branch.
    pub directions: Vec<bool>,
}

impl PathMeta {
    /// Number of nodes on the path.
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    /// Whether the path holds no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }
}

// ============================================================================
// TreeMetaData
// ============================================================================

/// Derived per-node and per-anomalous-leaf tables for the first tree of an
/// ensemble.
///
/// Built once from a single pass over the samples' decision paths and
/// immutable afterwards; it exists only as renderer input and is never
/// persisted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeMetaData {
    /// Indexed by node; `None` marks nodes no sample ever reached.
    nodes: Vec<Option<NodeMeta>>,
    /// Keyed by anomalous leaf, in insertion order.
    paths: Vec<(NodeId, PathMeta)>,
}

impl TreeMetaData {
    /// Aggregate decision-path statistics for the first tree of `forest`.
    ///
    /// For every sample, walks the node indices from the root up to its
    /// terminal leaf and folds the sample's verdict into the per-node
    /// counts; the verdict itself is stamped on the terminal leaf. For
    /// every anomalous sample, additionally records the root-to-leaf
    /// sequences of split thresholds, feature indices and branch
    /// directions. The first anomalous sample reaching a given leaf wins;
    /// later ones only contribute counts.
    ///
    /// Only the first tree is ever consulted, regardless of ensemble size.
    ///
    /// # Errors
    ///
    /// - [`ExplainError::EmptyEnsemble`] if the forest has no trees.
    /// - [`ExplainError::PredictionLengthMismatch`] if `predictions` is not
    ///   aligned with `samples`.
    pub fn collect<F: ForestView>(
        forest: &F,
        samples: SamplesView<'_>,
        predictions: &[Verdict],
    ) -> Result<Self, ExplainError> {
        let tree = forest.first_tree().ok_or(ExplainError::EmptyEnsemble)?;
        if predictions.len() != samples.n_samples() {
            return Err(ExplainError::PredictionLengthMismatch {
                samples: samples.n_samples(),
                predictions: predictions.len(),
            });
        }

        let mut nodes: Vec<Option<NodeMeta>> = vec![None; tree.n_nodes()];
        let mut paths: Vec<(NodeId, PathMeta)> = Vec::new();
        let mut recorded = vec![false; tree.n_nodes()];

        for (row, &verdict) in predictions.iter().enumerate() {
            let path = tree.decision_path(&samples.sample(row));
            let leaf = path.leaf();

            for node in 0..=leaf {
                if !path.visited(node) {
                    continue;
                }

                let meta = nodes[node as usize].get_or_insert_with(NodeMeta::default);
                meta.record(verdict);

                if node == leaf {
                    meta.verdict = Some(verdict);
                }
            }

            if !verdict.is_anomaly() || recorded[leaf as usize] {
                continue;
            }
            recorded[leaf as usize] = true;

            let mut meta = PathMeta::default();
            let mut previous: Option<NodeId> = None;

            for node in 0..=leaf {
                if !path.visited(node) {
                    continue;
                }

                meta.thresholds.push(tree.split_threshold(node));
                meta.features.push(tree.split_index(node));
                // Left children directly follow their parent in index
                // order; anything else was reached by the right branch.
                meta.directions.push(previous.is_some_and(|p| p + 1 == node));
                previous = Some(node);
            }

            paths.push((leaf, meta));
        }

        Ok(Self { nodes, paths })
    }

    /// Meta-data for `node`, or `None` if no sample ever reached it.
    pub fn node(&self, node: NodeId) -> Option<&NodeMeta> {
        self.nodes.get(node as usize).and_then(|m| m.as_ref())
    }

    /// Size of the node table (= node count of the aggregated tree).
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Recorded anomaly paths, keyed by leaf, in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = (NodeId, &PathMeta)> {
        self.paths.iter().map(|(leaf, meta)| (*leaf, meta))
    }

    /// Path meta-data for one anomalous leaf, if recorded.
    pub fn path(&self, leaf: NodeId) -> Option<&PathMeta> {
        self.paths
            .iter()
            .find(|(l, _)| *l == leaf)
            .map(|(_, meta)| meta)
    }

    /// Number of recorded anomaly paths.
    pub fn n_paths(&self) -> usize {
        self.paths.len()
    }
}
