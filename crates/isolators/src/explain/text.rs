//! Plain-text report of anomaly decision paths.

use std::io::{self, Write};

use crate::data::SamplesView;
use crate::explain::{ExplainError, TreeMetaData, Verdict};
use crate::repr::ForestView;

/// Write the anomaly path report for already-aggregated meta-data.
///
/// One block per recorded anomalous leaf, in insertion order: a line
/// naming the leaf's node index, then one indented condition line per
/// split on the path. Each printed condition describes the branch taken
/// to reach the *next* visited node, so the direction flags are read one
/// position ahead and the leaf's own entry never prints.
pub fn write_text<W: Write>(out: &mut W, meta: &TreeMetaData) -> io::Result<()> {
    writeln!(out, "features and thresholds for anomalies")?;

    for (leaf, path) in meta.paths() {
        writeln!(out, "+-- node index {}", leaf)?;

        for i in 0..path.len().saturating_sub(1) {
            let arrow = if path.directions[i + 1] { "<=" } else { "> " };
            writeln!(
                out,
                " +-- feature {} {} {}",
                path.features[i], arrow, path.thresholds[i]
            )?;
        }
    }

    Ok(())
}

/// Print the anomaly path report for the first tree of `forest` to the
/// standard output stream.
///
/// # Errors
///
/// Propagates aggregation errors from [`TreeMetaData::collect`] and any
/// I/O error raised while writing to stdout.
pub fn export_text<F: ForestView>(
    forest: &F,
    samples: SamplesView<'_>,
    predictions: &[Verdict],
) -> Result<(), ExplainError> {
    let meta = TreeMetaData::collect(forest, samples, predictions)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_text(&mut out, &meta)?;

    Ok(())
}
