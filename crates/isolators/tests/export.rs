//! End-to-end tests for the explanation entry points.
//!
//! These drive the full pipeline (decision paths -> aggregation ->
//! rendering) against hand-built forests.

use isolators::repr::Forest;
use isolators::testing::{leaf, split};
use isolators::{
    export_graphviz, tree, write_text, SamplesView, TreeMetaData, Verdict,
};
use ndarray::array;

// ============================================================================
// Fixtures
// ============================================================================

/// One split, two leaves: x[0] <= 0.5 ? leaf 1 : leaf 2.
fn stump_forest() -> Forest {
    let mut forest = Forest::new();
    forest.push_tree(tree! {
        0 => split(0, 0.5, 1, 2),
        1 => leaf(),
        2 => leaf(),
    });
    forest
}

/// Two-tree ensemble whose second tree splits on a different feature.
fn two_tree_forest() -> Forest {
    let mut forest = stump_forest();
    forest.push_tree(tree! {
        0 => split(7, 3.5, 1, 2),
        1 => leaf(),
        2 => leaf(),
    });
    forest
}

// ============================================================================
// Aggregation Scenarios
// ============================================================================

#[test]
fn two_anomalies_one_per_leaf() {
    let forest = stump_forest();
    let arr = array![[0.3f32], [0.7]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Anomaly, Verdict::Anomaly];

    let meta = TreeMetaData::collect(&forest, samples, &predictions).unwrap();

    // Every node has an entry with anomaly contributions.
    for node in 0..3 {
        assert!(meta.node(node).unwrap().anomaly_count > 0);
        assert_eq!(meta.node(node).unwrap().normal_count, 0);
    }

    // Verdicts only at the leaves.
    assert_eq!(meta.node(0).unwrap().verdict, None);
    assert_eq!(meta.node(1).unwrap().verdict, Some(Verdict::Anomaly));
    assert_eq!(meta.node(2).unwrap().verdict, Some(Verdict::Anomaly));

    // One path per leaf, two nodes each, parallel sequences aligned.
    assert_eq!(meta.n_paths(), 2);
    for (_, path) in meta.paths() {
        assert_eq!(path.len(), 2);
        assert_eq!(path.features.len(), 2);
        assert_eq!(path.directions.len(), 2);
    }
}

#[test]
fn root_totals_match_sample_count() {
    let forest = stump_forest();
    let arr = array![[0.1f32], [0.4], [0.6], [0.8], [0.5], [0.2]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [
        Verdict::Normal,
        Verdict::Anomaly,
        Verdict::Normal,
        Verdict::Normal,
        Verdict::Anomaly,
        Verdict::Normal,
    ];

    let meta = TreeMetaData::collect(&forest, samples, &predictions).unwrap();

    let root = meta.node(0).unwrap();
    assert_eq!(root.samples() as usize, predictions.len());
    assert_eq!(root.normal_count, 4);
    assert_eq!(root.anomaly_count, 2);
}

#[test]
fn stamped_verdicts_belong_to_terminal_leaves() {
    let forest = stump_forest();
    let arr = array![[0.3f32], [0.7]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Anomaly, Verdict::Normal];

    let meta = TreeMetaData::collect(&forest, samples, &predictions).unwrap();
    let leaves = [1u32, 2];

    for node in 0..meta.n_nodes() as u32 {
        if let Some(node_meta) = meta.node(node) {
            if node_meta.verdict.is_some() {
                assert!(leaves.contains(&node), "verdict on non-leaf node {node}");
            }
        }
    }
}

#[test]
fn only_first_tree_is_aggregated() {
    let forest = two_tree_forest();
    let arr = array![[0.3f32], [0.7]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Anomaly, Verdict::Anomaly];

    let meta = TreeMetaData::collect(&forest, samples, &predictions).unwrap();

    // Node table is sized for the first tree and paths carry its splits.
    assert_eq!(meta.n_nodes(), 3);
    assert_eq!(meta.path(1).unwrap().features[0], 0);
    assert_eq!(meta.path(1).unwrap().thresholds[0], 0.5);
}

// ============================================================================
// Diagram Scenarios
// ============================================================================

#[test]
fn diagram_for_stump_matches_expected_statements() {
    let forest = stump_forest();
    let arr = array![[0.3f32], [0.7]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Anomaly, Verdict::Anomaly];

    let dot = export_graphviz(&forest, samples, &predictions).unwrap();

    assert!(dot.starts_with("digraph Tree {\n"));
    assert!(dot.ends_with("}\n"));
    assert_eq!(dot.lines().filter(|l| l.contains("[label=")).count(), 3);
    assert_eq!(dot.lines().filter(|l| l.contains("->")).count(), 2);
    assert!(dot.contains("0 -> 1 [labeldistance=2.5, labelangle=45, headlabel=\"True\"] ;"));
    assert!(dot.contains("0 -> 2 [labeldistance=2.5, labelangle=-45, headlabel=\"False\"] ;"));

    // Both leaves are solid anomaly red, the root is red-tinted.
    assert_eq!(dot.matches("#990000").count(), 2);
    assert_eq!(dot.matches("#ffcccc").count(), 1);
}

#[test]
fn diagram_only_reflects_first_tree() {
    let forest = two_tree_forest();
    let arr = array![[0.3f32], [0.7]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Normal, Verdict::Normal];

    let dot = export_graphviz(&forest, samples, &predictions).unwrap();

    assert!(dot.contains("x[0] <= 0.500"));
    assert!(!dot.contains("x[7]"));
    assert!(!dot.contains("3.500"));
}

// ============================================================================
// Text Report Scenarios
// ============================================================================

#[test]
fn text_report_for_stump() {
    let forest = stump_forest();
    let arr = array![[0.3f32], [0.7]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Anomaly, Verdict::Anomaly];

    let meta = TreeMetaData::collect(&forest, samples, &predictions).unwrap();
    let mut out = Vec::new();
    write_text(&mut out, &meta).unwrap();
    let text = String::from_utf8(out).unwrap();

    // Two blocks in leaf order, each with the single root condition.
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "features and thresholds for anomalies",
            "+-- node index 1",
            " +-- feature 0 <= 0.5",
            "+-- node index 2",
            " +-- feature 0 >  0.5",
        ]
    );
}

#[test]
fn text_report_walks_deeper_paths() {
    let mut forest = Forest::new();
    forest.push_tree(tree! {
        0 => split(0, 0.5, 1, 4),
        1 => split(1, 0.25, 2, 3),
        2 => leaf(),
        3 => leaf(),
        4 => leaf(),
    });
    // Anomaly path: left at root, right at node 1.
    let arr = array![[0.4f32, 0.3]];
    let samples = SamplesView::from_array(arr.view());
    let predictions = [Verdict::Anomaly];

    let meta = TreeMetaData::collect(&forest, samples, &predictions).unwrap();
    let mut out = Vec::new();
    write_text(&mut out, &meta).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "features and thresholds for anomalies",
            "+-- node index 3",
            " +-- feature 0 <= 0.5",
            " +-- feature 1 >  0.25",
        ]
    );
}
