//! Explain the verdicts of a small hand-built isolation forest.
//!
//! Run with:
//! ```bash
//! cargo run --example explain_forest
//! ```

use isolators::repr::Forest;
use isolators::testing::{leaf, split};
use isolators::{export_graphviz, export_text, tree, SamplesView, Verdict};

fn main() -> Result<(), isolators::ExplainError> {
    // =========================================================================
    // 1. A trained-model stand-in
    // =========================================================================
    // Two trees; only the first is ever reported on. Short paths isolate
    // anomalies: x[0] <= 0.2 peels off one outlier, x[1] > 0.9 another.
    let mut forest = Forest::new();
    forest.push_tree(tree! {
        0 => split(0, 0.2, 1, 2),
        1 => leaf(),
        2 => split(1, 0.9, 3, 4),
        3 => leaf(),
        4 => leaf(),
    });
    forest.push_tree(tree! {
        0 => split(1, 0.5, 1, 2),
        1 => leaf(),
        2 => leaf(),
    });

    // =========================================================================
    // 2. Scored samples and their verdicts
    // =========================================================================
    let data = [
        0.1f32, 0.5, // isolated early: anomaly
        0.5, 0.4, // normal
        0.6, 0.5, // normal
        0.7, 0.95, // isolated by the second split: anomaly
        0.4, 0.6, // normal
    ];
    let samples = SamplesView::from_slice(&data, 5, 2).expect("data shape");
    let predictions = [
        Verdict::Anomaly,
        Verdict::Normal,
        Verdict::Normal,
        Verdict::Anomaly,
        Verdict::Normal,
    ];

    // =========================================================================
    // 3. Render both reports
    // =========================================================================
    let dot = export_graphviz(&forest, samples, &predictions)?;
    println!("{dot}");

    export_text(&forest, samples, &predictions)?;

    Ok(())
}
