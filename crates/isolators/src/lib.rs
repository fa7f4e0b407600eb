//! isolators: explanations for isolation forest anomaly models.
//!
//! Takes a trained isolation-forest style ensemble, the samples it was
//! scored on, and the per-sample verdicts, and renders human-readable
//! explanations of those verdicts: either a Graphviz (DOT) diagram of the
//! ensemble's first tree, color-coded by node purity and leaf verdict, or
//! a plain-text listing of the split conditions behind each anomaly.
//!
//! The crate does not train models or compute anomaly scores. Any provider
//! that exposes its trees through the read-only [`TreeView`] / [`ForestView`]
//! interface can be explained; [`Tree`] and [`Forest`] are the canonical
//! array-backed implementations.
//!
//! # Key Types
//!
//! - [`Tree`] / [`Forest`] - SoA tree storage and the ensemble container
//! - [`TreeView`] / [`ForestView`] - read-only structural interface
//! - [`TreeMetaData`] - per-node counts and per-anomaly decision paths
//! - [`Verdict`] - the `+1` normal / `-1` anomaly prediction label
//!
//! # Example
//!
//! ```
//! use isolators::repr::Forest;
//! use isolators::testing::{leaf, split};
//! use isolators::{export_graphviz, SamplesView, Verdict};
//!
//! // x[0] <= 0.5 isolates the anomaly into the left leaf.
//! let tree = isolators::tree! {
//!     0 => split(0, 0.5, 1, 2),
//!     1 => leaf(),
//!     2 => leaf(),
//! };
//! let mut forest = Forest::new();
//! forest.push_tree(tree);
//!
//! let data = [0.2f32, 0.8, 0.9];
//! let samples = SamplesView::from_slice(&data, 3, 1).unwrap();
//! let predictions = [Verdict::Anomaly, Verdict::Normal, Verdict::Normal];
//!
//! let dot = export_graphviz(&forest, samples, &predictions)?;
//! assert!(dot.starts_with("digraph Tree {"));
//! # Ok::<(), isolators::ExplainError>(())
//! ```

pub mod data;
pub mod explain;
pub mod repr;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Entry points
pub use explain::{export_graphviz, export_text, write_text};

// Explanation types
pub use explain::{ExplainError, NodeMeta, PathMeta, TreeMetaData, Verdict};

// Structural representation
pub use repr::{Forest, ForestView, NodeId, Tree, TreeView, TREE_LEAF};

// Data views
pub use data::{Sample, SamplesView};
