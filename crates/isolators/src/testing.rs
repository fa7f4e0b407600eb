//! Fixtures for building trees by hand in tests, benches and examples.
//!
//! The [`tree!`](crate::tree) macro assembles a [`Tree`] from an explicit
//! node list:
//!
//! ```
//! use isolators::testing::{leaf, split};
//!
//! let tree = isolators::tree! {
//!     0 => split(0, 0.5, 1, 2),
//!     1 => leaf(),
//!     2 => leaf(),
//! };
//! ```

use crate::repr::{NodeId, Tree, TREE_LEAF};

/// One node in a [`tree!`](crate::tree) fixture.
#[derive(Debug, Clone, Copy)]
pub struct FixtureNode {
    feature: u32,
    threshold: f32,
    left: NodeId,
    right: NodeId,
}

/// Internal node splitting on `x[feature] <= threshold`.
pub fn split(feature: u32, threshold: f32, left: NodeId, right: NodeId) -> FixtureNode {
    FixtureNode {
        feature,
        threshold,
        left,
        right,
    }
}

/// Terminal node.
pub fn leaf() -> FixtureNode {
    FixtureNode {
        feature: 0,
        threshold: 0.0,
        left: TREE_LEAF,
        right: TREE_LEAF,
    }
}

/// Assemble a [`Tree`] from `(id, node)` pairs.
///
/// # Panics
///
/// Panics if the ids are not contiguous from 0 in declaration order.
pub fn build_tree(nodes: Vec<(NodeId, FixtureNode)>) -> Tree {
    let mut split_indices = Vec::with_capacity(nodes.len());
    let mut split_thresholds = Vec::with_capacity(nodes.len());
    let mut left_children = Vec::with_capacity(nodes.len());
    let mut right_children = Vec::with_capacity(nodes.len());

    for (expected, (id, node)) in nodes.into_iter().enumerate() {
        assert_eq!(
            id as usize, expected,
            "fixture node ids must be contiguous from 0"
        );
        split_indices.push(node.feature);
        split_thresholds.push(node.threshold);
        left_children.push(node.left);
        right_children.push(node.right);
    }

    Tree::new(split_indices, split_thresholds, left_children, right_children)
}

/// Assemble a [`Tree`](crate::repr::Tree) from an explicit node list.
///
/// See the [module docs](crate::testing) for the syntax; node ids must be
/// contiguous from 0 and appear in order.
#[macro_export]
macro_rules! tree {
    ( $( $id:literal => $node:expr ),+ $(,)? ) => {
        $crate::testing::build_tree(vec![
            $( ($id as $crate::repr::NodeId, $node) ),+
        ])
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::TreeView;

    #[test]
    fn macro_builds_well_formed_trees() {
        let tree = crate::tree! {
            0 => split(2, 1.5, 1, 2),
            1 => leaf(),
            2 => leaf(),
        };

        assert_eq!(tree.n_nodes(), 3);
        assert_eq!(tree.split_index(0), 2);
        assert_eq!(tree.split_threshold(0), 1.5);
        assert!(!tree.is_leaf(0));
        assert!(tree.is_leaf(1));
        assert!(tree.is_leaf(2));
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    #[should_panic(expected = "contiguous")]
    fn macro_rejects_gapped_ids() {
        let _ = crate::tree! {
            0 => split(0, 0.5, 1, 2),
            2 => leaf(),
        };
    }
}
