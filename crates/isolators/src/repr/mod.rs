//! Canonical isolation-tree representation and read-only views.

pub mod forest;
pub mod tree;

/// Canonical node identifier.
///
/// Internally this is just an index into a tree's SoA arrays; node indices
/// are contiguous and the root is always index 0.
pub type NodeId = u32;

/// Sentinel child index marking a leaf node.
///
/// A node whose child pointers hold this value terminates traversal.
pub const TREE_LEAF: NodeId = NodeId::MAX;

pub use forest::{Forest, ForestValidationError, ForestView};
pub use tree::{DecisionPath, Tree, TreeValidationError, TreeView};
