//! Explanations for isolation forest verdicts.
//!
//! Everything here works on the first tree of the ensemble: per-node
//! verdict counts and per-anomaly decision paths are aggregated once by
//! [`TreeMetaData::collect`], then rendered either as a Graphviz (DOT)
//! document ([`export_graphviz`]) or as a plain-text report
//! ([`export_text`] / [`write_text`]).
//!
//! # Example
//!
//! ```ignore
//! use isolators::{export_graphviz, export_text};
//!
//! let dot = export_graphviz(&forest, samples, &predictions)?;
//! std::fs::write("tree.dot", dot)?;
//!
//! export_text(&forest, samples, &predictions)?;
//! ```

mod dot;
mod meta;
mod text;

pub use dot::{export_graphviz, DotTreeExporter, DotWriter};
pub use meta::{NodeMeta, PathMeta, TreeMetaData, Verdict};
pub use text::{export_text, write_text};

use crate::repr::NodeId;

/// Errors surfaced by the explanation entry points.
///
/// These are caller-contract violations; there is no retry or recovery,
/// inconsistent inputs fail immediately.
#[derive(Debug, thiserror::Error)]
pub enum ExplainError {
    /// The ensemble has no trees to report on.
    #[error("ensemble contains no trees")]
    EmptyEnsemble,

    /// The prediction vector is not aligned with the feature matrix.
    #[error("predictions length {predictions} does not match sample count {samples}")]
    PredictionLengthMismatch { samples: usize, predictions: usize },

    /// A tree node was exported that no processed sample ever reached,
    /// so it has no color information. Exporting the same tree the
    /// meta-data was aggregated from, with the same samples, guarantees
    /// coverage.
    #[error("no meta-data recorded for node {node}; it was not reached by any sample")]
    MissingNodeMeta { node: NodeId },

    /// Writing the text report failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
