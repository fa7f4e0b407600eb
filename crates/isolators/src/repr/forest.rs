//! Canonical forest representation (collection of trees).

use super::tree::{Tree, TreeValidationError, TreeView};

/// Read-only view of a tree ensemble.
///
/// The explanation layer only ever needs ordered access to the constituent
/// trees; providers with their own ensemble type implement this to plug in.
pub trait ForestView {
    /// The tree type exposed by this ensemble.
    type Tree: TreeView;

    /// Number of trees.
    fn n_trees(&self) -> usize;

    /// Get a reference to a specific tree.
    fn tree(&self, index: usize) -> &Self::Tree;

    /// The first constituent tree, if any.
    #[inline]
    fn first_tree(&self) -> Option<&Self::Tree> {
        (self.n_trees() > 0).then(|| self.tree(0))
    }
}

/// Structural validation errors for [`Forest`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForestValidationError {
    #[error("tree {tree_idx}: {error}")]
    InvalidTree {
        tree_idx: usize,
        error: TreeValidationError,
    },
}

/// Forest of isolation trees.
///
/// Trees keep the order in which they were added; the explanation layer
/// reports on the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    trees: Vec<Tree>,
}

impl Forest {
    /// Create an empty forest.
    pub fn new() -> Self {
        Self { trees: Vec::new() }
    }

    /// Add a tree to the forest.
    pub fn push_tree(&mut self, tree: Tree) {
        self.trees.push(tree);
    }

    /// Iterate over trees in insertion order.
    pub fn trees(&self) -> impl Iterator<Item = &Tree> {
        self.trees.iter()
    }

    /// Validate structural invariants for every constituent tree.
    pub fn validate(&self) -> Result<(), ForestValidationError> {
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|e| ForestValidationError::InvalidTree { tree_idx: i, error: e })?;
        }
        Ok(())
    }
}

impl ForestView for Forest {
    type Tree = Tree;

    #[inline]
    fn n_trees(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    fn tree(&self, index: usize) -> &Tree {
        &self.trees[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{leaf, split};

    fn simple_tree(threshold: f32) -> Tree {
        crate::tree! {
            0 => split(0, threshold, 1, 2),
            1 => leaf(),
            2 => leaf(),
        }
    }

    #[test]
    fn push_and_iterate_in_order() {
        let mut forest = Forest::new();
        forest.push_tree(simple_tree(0.5));
        forest.push_tree(simple_tree(0.9));

        assert_eq!(forest.n_trees(), 2);
        let thresholds: Vec<f32> = forest.trees().map(|t| t.split_threshold(0)).collect();
        assert_eq!(thresholds, vec![0.5, 0.9]);
    }

    #[test]
    fn first_tree_of_empty_forest_is_none() {
        let forest = Forest::new();
        assert!(forest.first_tree().is_none());

        let mut forest = forest;
        forest.push_tree(simple_tree(0.5));
        assert_eq!(forest.first_tree().unwrap().split_threshold(0), 0.5);
    }

    #[test]
    fn validate_reports_offending_tree() {
        let mut forest = Forest::new();
        forest.push_tree(simple_tree(0.5));
        forest.push_tree(Tree::new(vec![], vec![], vec![], vec![]));

        assert_eq!(
            forest.validate(),
            Err(ForestValidationError::InvalidTree {
                tree_idx: 1,
                error: TreeValidationError::EmptyTree,
            })
        );
    }
}
