//! Read-only data views for explanation inputs.
//!
//! Feature data is consumed through [`SamplesView`], a sample-major view
//! over an `ndarray` matrix. Tree traversal accesses individual samples
//! through the [`Sample`] trait so it works with both matrix rows and
//! plain slices.

use ndarray::{ArrayView1, ArrayView2};

/// Per-sample feature access used by tree traversal.
///
/// Out-of-range feature indices yield `NaN`, mirroring how missing values
/// are represented in the feature matrix itself.
pub trait Sample {
    /// Value of the feature at `index` for this sample.
    fn feature(&self, index: usize) -> f32;
}

impl Sample for &[f32] {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self.get(index).copied().unwrap_or(f32::NAN)
    }
}

impl Sample for ArrayView1<'_, f32> {
    #[inline]
    fn feature(&self, index: usize) -> f32 {
        self.get(index).copied().unwrap_or(f32::NAN)
    }
}

/// Read-only view into a feature matrix.
///
/// Storage is sample-major: shape `[n_samples, n_features]`, so
/// [`sample`](Self::sample) returns a contiguous row.
#[derive(Clone, Copy)]
pub struct SamplesView<'a> {
    /// Shape: [n_samples, n_features]
    data: ArrayView2<'a, f32>,
}

impl<'a> SamplesView<'a> {
    /// Create a view from an array with shape `[n_samples, n_features]`.
    pub fn from_array(data: ArrayView2<'a, f32>) -> Self {
        Self { data }
    }

    /// Create from a contiguous slice in sample-major order.
    ///
    /// Data layout: `[s0_f0, s0_f1, ..., s1_f0, s1_f1, ...]`. This is
    /// zero-copy. Returns `None` if the slice length doesn't match
    /// `n_samples * n_features`.
    pub fn from_slice(data: &'a [f32], n_samples: usize, n_features: usize) -> Option<Self> {
        ArrayView2::from_shape((n_samples, n_features), data)
            .ok()
            .map(|view| Self { data: view })
    }

    /// Number of samples (first dimension).
    #[inline]
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    /// Number of features (second dimension).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }

    /// Get the feature value at (sample, feature).
    #[inline]
    pub fn get(&self, sample: usize, feature: usize) -> f32 {
        self.data[[sample, feature]]
    }

    /// Get all feature values for one sample.
    #[inline]
    pub fn sample(&self, sample: usize) -> ArrayView1<'_, f32> {
        self.data.row(sample)
    }
}

impl std::fmt::Debug for SamplesView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SamplesView")
            .field("n_samples", &self.n_samples())
            .field("n_features", &self.n_features())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn from_slice_valid_shape() {
        let data = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let view = SamplesView::from_slice(&data, 2, 3).unwrap();

        assert_eq!(view.n_samples(), 2);
        assert_eq!(view.n_features(), 3);
        assert_eq!(view.get(0, 1), 2.0);
        assert_eq!(view.get(1, 2), 6.0);
    }

    #[test]
    fn from_slice_rejects_bad_shape() {
        let data = [1.0f32, 2.0, 3.0];
        assert!(SamplesView::from_slice(&data, 2, 2).is_none());
    }

    #[test]
    fn sample_rows_are_aligned() {
        let arr = array![[0.1f32, 0.2], [0.3, 0.4]];
        let view = SamplesView::from_array(arr.view());

        let row = view.sample(1);
        assert_eq!(row[0], 0.3);
        assert_eq!(row[1], 0.4);
    }

    #[test]
    fn sample_trait_out_of_range_is_nan() {
        let row: &[f32] = &[1.0, 2.0];
        assert_eq!(row.feature(0), 1.0);
        assert!(row.feature(5).is_nan());

        let arr = array![0.5f32];
        let view = arr.view();
        assert_eq!(view.feature(0), 0.5);
        assert!(view.feature(1).is_nan());
    }
}
