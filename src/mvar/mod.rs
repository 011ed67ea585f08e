//! Multivariate autoregressive (MVAR) modelling.
//!
//! ```text
//! x(t) = Σ_{k=1..p} A_k · x(t − k) + e(t),      cov(e) = V
//! ```
//!
//! * [`fit`] — Yule–Walker or least-squares estimation of `A_1 … A_p`, `V`.
//! * [`select_order`] — information-criterion search over `1..=max_order`.
//!
//! Coefficients are exposed as ndarray arrays; the linear algebra runs on
//! `nalgebra` matrices internally.
pub mod fit;
pub mod order;

use nalgebra::DMatrix;
use ndarray::{Array2, Array3, ArrayView2};

pub use fit::{autocovariance, fit};
pub use order::{criterion_value, select_order, OrderSelection};

/// A fitted MVAR model.
#[derive(Debug, Clone, PartialEq)]
pub struct MvarModel {
    /// `[p, C, C]`; `coefs[k]` is `A_{k+1}`, `coefs[[k, i, j]]` is the
    /// influence of channel `j` at lag `k + 1` on channel `i`.
    pub coefs:     Array3<f64>,
    /// `[C, C]` residual (innovation) covariance.
    pub noise_cov: Array2<f64>,
}

impl MvarModel {
    #[inline]
    pub fn order(&self) -> usize {
        self.coefs.shape()[0]
    }

    #[inline]
    pub fn n_channels(&self) -> usize {
        self.noise_cov.nrows()
    }
}

// ── ndarray ↔ nalgebra ────────────────────────────────────────────────────

pub(crate) fn to_dmatrix(a: ArrayView2<'_, f64>) -> DMatrix<f64> {
    let (r, c) = a.dim();
    DMatrix::from_fn(r, c, |i, j| a[[i, j]])
}

pub(crate) fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// Subtract each channel's mean. `data` is `[C, T]`.
pub(crate) fn demean(data: ArrayView2<'_, f64>) -> DMatrix<f64> {
    let mut x = to_dmatrix(data);
    for mut row in x.row_iter_mut() {
        let mean = row.mean();
        row.add_scalar_mut(-mean);
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn demean_rows_have_zero_mean() {
        let data = array![[1.0, 2.0, 3.0], [10.0, 10.0, 13.0]];
        let x = demean(data.view());
        for i in 0..2 {
            approx::assert_abs_diff_eq!(x.row(i).sum(), 0.0, epsilon = 1e-12);
        }
        approx::assert_abs_diff_eq!(x[(1, 2)], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn conversion_preserves_layout() {
        let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let m = to_dmatrix(a.view());
        assert_eq!(m[(2, 1)], 6.0);
        assert_eq!(to_array2(&m), a);
    }
}
