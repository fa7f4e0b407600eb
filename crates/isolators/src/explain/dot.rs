//! Graphviz (DOT) export of one isolation tree.
//!
//! [`DotWriter`] owns document framing and statement syntax;
//! [`DotTreeExporter`] walks the tree and supplies the domain-specific
//! labels and verdict colors.

use crate::data::SamplesView;
use crate::explain::{ExplainError, NodeMeta, TreeMetaData, Verdict};
use crate::repr::{ForestView, NodeId, TreeView};

/// Tint for internal nodes where normal samples dominate.
const COLOR_MOSTLY_NORMAL: &str = "#ccffcc";
/// Tint for internal nodes where anomalous samples dominate or tie.
const COLOR_MOSTLY_ANOMALOUS: &str = "#ffcccc";
/// Solid fill for leaves whose stamped verdict is normal.
const COLOR_NORMAL_LEAF: &str = "#009900";
/// Solid fill for leaves whose stamped verdict is anomalous.
const COLOR_ANOMALY_LEAF: &str = "#990000";

// ============================================================================
// DotWriter
// ============================================================================

/// Minimal writer for DOT graph documents.
///
/// Knows nothing about trees or verdicts: callers provide node labels and
/// attributes, the writer provides the statement syntax and the document
/// header/footer.
#[derive(Debug, Default)]
pub struct DotWriter {
    out: String,
}

impl DotWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the document and set box/filled node defaults.
    pub fn head(&mut self) {
        self.out.push_str("digraph Tree {\n");
        self.out
            .push_str("node [shape=box, style=\"filled\", color=\"black\"] ;\n");
    }

    /// Close the document.
    pub fn tail(&mut self) {
        self.out.push_str("}\n");
    }

    /// Emit one node statement with a label and fill color.
    pub fn node(&mut self, id: NodeId, label: &str, fillcolor: &str) {
        self.out.push_str(&format!(
            "{} [label=\"{}\", fillcolor=\"{}\"] ;\n",
            id, label, fillcolor
        ));
    }

    /// Emit one plain edge statement.
    pub fn edge(&mut self, parent: NodeId, child: NodeId) {
        self.out.push_str(&format!("{} -> {} ;\n", parent, child));
    }

    /// Emit one edge statement carrying an angled head label.
    pub fn labeled_edge(&mut self, parent: NodeId, child: NodeId, angle: i32, headlabel: &str) {
        self.out.push_str(&format!(
            "{} -> {} [labeldistance=2.5, labelangle={}, headlabel=\"{}\"] ;\n",
            parent, child, angle, headlabel
        ));
    }

    /// Consume the writer and return the document.
    pub fn finish(self) -> String {
        self.out
    }
}

// ============================================================================
// DotTreeExporter
// ============================================================================

/// DOT exporter for one tree, colored from aggregated verdict meta-data.
///
/// Nodes and edges are emitted depth-first, the left subtree before the
/// right one, mirroring the tree's physical layout. The root's two
/// outgoing edges carry `True` / `False` head labels at symmetric angles.
#[derive(Debug)]
pub struct DotTreeExporter<'a> {
    meta: &'a TreeMetaData,
    rotate: bool,
    writer: DotWriter,
}

impl<'a> DotTreeExporter<'a> {
    pub fn new(meta: &'a TreeMetaData) -> Self {
        Self {
            meta,
            rotate: false,
            writer: DotWriter::new(),
        }
    }

    /// Rotate the diagram orientation, flipping the root edge label angles.
    pub fn rotated(mut self, rotate: bool) -> Self {
        self.rotate = rotate;
        self
    }

    /// Render `tree` into a complete DOT document.
    ///
    /// # Errors
    ///
    /// [`ExplainError::MissingNodeMeta`] if the tree contains a node the
    /// aggregated samples never reached; exporting the tree the meta-data
    /// was collected from, with the same samples, guarantees coverage.
    pub fn export<T: TreeView>(mut self, tree: &T) -> Result<String, ExplainError> {
        self.writer.head();
        self.recurse(tree, 0, None)?;
        self.writer.tail();
        Ok(self.writer.finish())
    }

    fn recurse<T: TreeView>(
        &mut self,
        tree: &T,
        node: NodeId,
        parent: Option<NodeId>,
    ) -> Result<(), ExplainError> {
        let label = node_label(tree, node);
        let color = self.fill_color(node)?;
        self.writer.node(node, &label, color);

        if let Some(parent) = parent {
            if parent == 0 {
                let (left_angle, right_angle) = if self.rotate { (-45, 45) } else { (45, -45) };
                if node == tree.left_child(parent) {
                    self.writer.labeled_edge(parent, node, left_angle, "True");
                } else {
                    self.writer.labeled_edge(parent, node, right_angle, "False");
                }
            } else {
                self.writer.edge(parent, node);
            }
        }

        if !tree.is_leaf(node) {
            self.recurse(tree, tree.left_child(node), Some(node))?;
            self.recurse(tree, tree.right_child(node), Some(node))?;
        }

        Ok(())
    }

    /// Fill color for one node under the verdict/purity policy: a stamped
    /// leaf verdict paints solid green/red, otherwise the majority verdict
    /// among samples through the node picks a green/red tint.
    fn fill_color(&self, node: NodeId) -> Result<&'static str, ExplainError> {
        let meta = self
            .meta
            .node(node)
            .ok_or(ExplainError::MissingNodeMeta { node })?;

        Ok(match meta.verdict {
            Some(Verdict::Normal) => COLOR_NORMAL_LEAF,
            Some(Verdict::Anomaly) => COLOR_ANOMALY_LEAF,
            None => majority_tint(meta),
        })
    }
}

fn majority_tint(meta: &NodeMeta) -> &'static str {
    if meta.normal_count > meta.anomaly_count {
        COLOR_MOSTLY_NORMAL
    } else {
        COLOR_MOSTLY_ANOMALOUS
    }
}

fn node_label<T: TreeView>(tree: &T, node: NodeId) -> String {
    if tree.is_leaf(node) {
        // The impurity slot of the label; this interface carries the
        // criterion name but no per-node impurity values.
        tree.criterion().to_string()
    } else {
        format!("x[{}] <= {:.3}", tree.split_index(node), tree.split_threshold(node))
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Render the first tree of `forest` as a DOT document, color-coded by
/// node purity and leaf verdict over the given samples and predictions.
///
/// # Errors
///
/// Propagates aggregation errors from [`TreeMetaData::collect`] and
/// [`ExplainError::MissingNodeMeta`] for tree regions no sample reached.
pub fn export_graphviz<F: ForestView>(
    forest: &F,
    samples: SamplesView<'_>,
    predictions: &[Verdict],
) -> Result<String, ExplainError> {
    let meta = TreeMetaData::collect(forest, samples, predictions)?;
    DotTreeExporter::new(&meta).export(forest.tree(0))
}
