//! Canonical tree representation (SoA) and read-only tree interface.
//!
//! This module provides:
//! - [`Tree`]: Immutable SoA tree storage for efficient traversal
//! - [`TreeView`]: Read-only trait for unified tree access
//! - [`DecisionPath`]: Node membership of one sample's root-to-leaf walk
//! - [`TreeValidationError`]: Structural validation errors

use crate::data::{Sample, SamplesView};

use super::{NodeId, TREE_LEAF};

// ============================================================================
// TreeView Trait
// ============================================================================

/// Read-only view of a tree for traversal and export.
///
/// Provides the minimal structural interface the explanation layer needs:
/// the four parallel node arrays, the leaf sentinel convention, and the
/// impurity criterion name. Any tree-like provider can implement this to
/// have its verdicts explained; [`Tree`] is the canonical implementation.
///
/// Split semantics are numeric: a sample goes left iff
/// `value <= threshold`. `NaN` feature values compare false and go right.
///
/// # Example
///
/// ```
/// use isolators::repr::TreeView;
/// use isolators::testing::{leaf, split};
///
/// let tree = isolators::tree! {
///     0 => split(0, 0.5, 1, 2),
///     1 => leaf(),
///     2 => leaf(),
/// };
/// let n_leaves = (0..tree.n_nodes() as u32).filter(|&n| tree.is_leaf(n)).count();
/// assert_eq!(n_leaves, 2);
/// ```
pub trait TreeView {
    /// Number of nodes in the tree.
    fn n_nodes(&self) -> usize;

    /// Get the feature index tested at a split node.
    ///
    /// The stored value for a leaf node is unspecified.
    fn split_index(&self, node: NodeId) -> u32;

    /// Get the split threshold at a split node.
    ///
    /// The stored value for a leaf node is unspecified.
    fn split_threshold(&self, node: NodeId) -> f32;

    /// Get the left child node index, or [`TREE_LEAF`] for leaves.
    fn left_child(&self, node: NodeId) -> NodeId;

    /// Get the right child node index, or [`TREE_LEAF`] for leaves.
    fn right_child(&self, node: NodeId) -> NodeId;

    /// Name of the impurity criterion the tree was grown with.
    fn criterion(&self) -> &str;

    /// Check if a node is a leaf.
    #[inline]
    fn is_leaf(&self, node: NodeId) -> bool {
        self.left_child(node) == TREE_LEAF
    }

    /// Traverse the tree to find the terminal leaf for a sample.
    ///
    /// # Panics
    ///
    /// May panic on structurally invalid trees (empty, or with
    /// out-of-bounds child pointers); run [`Tree::validate`] on trees
    /// assembled from untrusted model dumps first.
    ///
    /// # Example
    ///
    /// ```
    /// use isolators::repr::TreeView;
    /// use isolators::testing::{leaf, split};
    ///
    /// let tree = isolators::tree! {
    ///     0 => split(0, 0.5, 1, 2),
    ///     1 => leaf(),
    ///     2 => leaf(),
    /// };
    /// let features: &[f32] = &[0.3];
    /// assert_eq!(tree.apply(&features), 1);
    /// ```
    #[inline]
    fn apply<S: Sample>(&self, sample: &S) -> NodeId {
        let mut node: NodeId = 0;

        while !self.is_leaf(node) {
            let value = sample.feature(self.split_index(node) as usize);
            node = if value <= self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
        }

        node
    }

    /// Walk the tree for a sample and record which nodes it passed through.
    ///
    /// Panics on structurally invalid trees, like [`apply`](Self::apply).
    fn decision_path<S: Sample>(&self, sample: &S) -> DecisionPath {
        let mut visited = vec![false; self.n_nodes()];
        let mut node: NodeId = 0;
        visited[node as usize] = true;

        while !self.is_leaf(node) {
            let value = sample.feature(self.split_index(node) as usize);
            node = if value <= self.split_threshold(node) {
                self.left_child(node)
            } else {
                self.right_child(node)
            };
            visited[node as usize] = true;
        }

        DecisionPath { visited, leaf: node }
    }

    /// Terminal leaf index for every sample in the batch.
    fn apply_batch(&self, samples: SamplesView<'_>) -> Vec<NodeId> {
        (0..samples.n_samples())
            .map(|row| self.apply(&samples.sample(row)))
            .collect()
    }

    /// Decision path for every sample in the batch, one entry per row.
    fn decision_paths(&self, samples: SamplesView<'_>) -> Vec<DecisionPath> {
        (0..samples.n_samples())
            .map(|row| self.decision_path(&samples.sample(row)))
            .collect()
    }
}

// ============================================================================
// DecisionPath
// ============================================================================

/// Node membership of one sample's walk from root to terminal leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionPath {
    visited: Vec<bool>,
    leaf: NodeId,
}

impl DecisionPath {
    /// Terminal leaf index of the walk.
    #[inline]
    pub fn leaf(&self) -> NodeId {
        self.leaf
    }

    /// Whether the sample passed through `node`.
    #[inline]
    pub fn visited(&self, node: NodeId) -> bool {
        self.visited.get(node as usize).copied().unwrap_or(false)
    }

    /// Number of nodes in the tree the path was computed against.
    #[inline]
    pub fn n_nodes(&self) -> usize {
        self.visited.len()
    }

    /// Number of nodes on the root-to-leaf walk.
    pub fn depth(&self) -> usize {
        self.visited.iter().filter(|&&v| v).count()
    }
}

// ============================================================================
// TreeValidationError
// ============================================================================

/// Structural validation errors for [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeValidationError {
    /// Tree has no nodes.
    #[error("tree has no nodes")]
    EmptyTree,
    /// A child pointer references an out-of-bounds node.
    #[error("{side} child {child} of node {node} is out of bounds for {n_nodes} nodes")]
    ChildOutOfBounds {
        node: NodeId,
        side: &'static str,
        child: NodeId,
        n_nodes: usize,
    },
    /// Exactly one of a node's children carries the leaf sentinel.
    #[error("node {node} has exactly one leaf-sentinel child")]
    HalfLeaf { node: NodeId },
    /// A node references itself as a child.
    #[error("node {node} references itself as a child")]
    SelfLoop { node: NodeId },
    /// A node was reached by more than one path (DAG shape).
    #[error("node {node} is reachable by more than one path")]
    DuplicateVisit { node: NodeId },
    /// A cycle was detected during traversal.
    #[error("cycle detected at node {node}")]
    CycleDetected { node: NodeId },
    /// A node exists in storage but is unreachable from the root.
    #[error("node {node} is unreachable from the root")]
    UnreachableNode { node: NodeId },
}

// ============================================================================
// Tree
// ============================================================================

/// Structure-of-Arrays tree storage.
///
/// Stores tree nodes in flat arrays indexed by [`NodeId`]. Child indices
/// are local to this tree (0 = root); both child slots of a leaf hold
/// [`TREE_LEAF`] and the split slots of a leaf are unused.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    split_indices: Box<[u32]>,
    split_thresholds: Box<[f32]>,
    left_children: Box<[NodeId]>,
    right_children: Box<[NodeId]>,
    criterion: Box<str>,
}

impl Tree {
    /// Create a new tree from parallel arrays.
    ///
    /// All arrays must have the same length (number of nodes). Leaves are
    /// marked by [`TREE_LEAF`] in both child arrays; their entries in the
    /// split arrays are ignored.
    ///
    /// The criterion name defaults to `"mse"`; override it with
    /// [`with_criterion`](Self::with_criterion).
    pub fn new(
        split_indices: Vec<u32>,
        split_thresholds: Vec<f32>,
        left_children: Vec<NodeId>,
        right_children: Vec<NodeId>,
    ) -> Self {
        let n_nodes = split_indices.len();
        debug_assert_eq!(n_nodes, split_thresholds.len());
        debug_assert_eq!(n_nodes, left_children.len());
        debug_assert_eq!(n_nodes, right_children.len());

        Self {
            split_indices: split_indices.into_boxed_slice(),
            split_thresholds: split_thresholds.into_boxed_slice(),
            left_children: left_children.into_boxed_slice(),
            right_children: right_children.into_boxed_slice(),
            criterion: Box::from("mse"),
        }
    }

    /// Set the impurity criterion name (builder pattern).
    pub fn with_criterion(mut self, name: impl Into<Box<str>>) -> Self {
        self.criterion = name.into();
        self
    }

    /// Validate basic structural invariants for this tree.
    ///
    /// Intended for debug checks and for callers assembling trees from
    /// external model dumps.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let n_nodes = self.n_nodes();
        if n_nodes == 0 {
            return Err(TreeValidationError::EmptyTree);
        }

        // Iterative DFS with color marking.
        // 0 = unvisited, 1 = visiting, 2 = done
        let mut color = vec![0u8; n_nodes];
        let mut stack: Vec<(NodeId, u8)> = vec![(0, 0)];

        while let Some((node, phase)) = stack.pop() {
            let node_usize = node as usize;

            match phase {
                0 => {
                    match color[node_usize] {
                        0 => {}
                        1 => return Err(TreeValidationError::CycleDetected { node }),
                        2 => return Err(TreeValidationError::DuplicateVisit { node }),
                        _ => unreachable!(),
                    }

                    color[node_usize] = 1;
                    stack.push((node, 1));

                    let left = self.left_child(node);
                    let right = self.right_child(node);

                    if (left == TREE_LEAF) != (right == TREE_LEAF) {
                        return Err(TreeValidationError::HalfLeaf { node });
                    }
                    if left == TREE_LEAF {
                        continue;
                    }

                    if left == node || right == node {
                        return Err(TreeValidationError::SelfLoop { node });
                    }

                    for (side, child) in [("left", left), ("right", right)] {
                        if child as usize >= n_nodes {
                            return Err(TreeValidationError::ChildOutOfBounds {
                                node,
                                side,
                                child,
                                n_nodes,
                            });
                        }
                    }

                    // Visit children
                    stack.push((right, 0));
                    stack.push((left, 0));
                }
                1 => {
                    color[node_usize] = 2;
                }
                _ => unreachable!(),
            }
        }

        for (i, &c) in color.iter().enumerate() {
            if c == 0 {
                return Err(TreeValidationError::UnreachableNode { node: i as NodeId });
            }
        }

        Ok(())
    }
}

impl TreeView for Tree {
    #[inline]
    fn n_nodes(&self) -> usize {
        self.left_children.len()
    }

    #[inline]
    fn split_index(&self, node: NodeId) -> u32 {
        self.split_indices[node as usize]
    }

    #[inline]
    fn split_threshold(&self, node: NodeId) -> f32 {
        self.split_thresholds[node as usize]
    }

    #[inline]
    fn left_child(&self, node: NodeId) -> NodeId {
        self.left_children[node as usize]
    }

    #[inline]
    fn right_child(&self, node: NodeId) -> NodeId {
        self.right_children[node as usize]
    }

    #[inline]
    fn criterion(&self) -> &str {
        &self.criterion
    }
}
