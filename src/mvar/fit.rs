//! MVAR coefficient estimation.
//!
//! # Yule–Walker
//! With the biased autocovariance
//! ```text
//! R(k) = 1/T · Σ_{t=0}^{T−1−k} x(t+k) · x(t)ᵀ,      R(−k) = R(k)ᵀ
//! ```
//! solve the block-Toeplitz system `R(m) = Σ_k A_k R(m − k)` for
//! `m = 1..p`, then `V = R(0) − Σ_k A_k R(k)ᵀ`.
//!
//! # Least squares
//! Regress `x(t)` on `z(t) = [x(t−1); …; x(t−p)]` for `t = p..T`:
//! `A = Y Zᵀ (Z Zᵀ)⁻¹`, `V = (Y − A Z)(Y − A Z)ᵀ / (T − p)`.
use nalgebra::DMatrix;
use ndarray::{Array3, ArrayView2};

use super::{demean, to_array2, MvarModel};
use crate::config::Algorithm;
use crate::error::{Error, Result};

/// Fit an MVAR model of order `order` to `data` (`[C, T]`).
///
/// Each channel is de-meaned first.
pub fn fit(data: ArrayView2<'_, f64>, order: usize, algorithm: Algorithm) -> Result<MvarModel> {
    let x = demean(data);
    fit_centered(&x, order, algorithm)
}

/// Fit on already de-meaned data. Shared by [`fit`] and the order search so
/// the centring happens once.
pub(crate) fn fit_centered(x: &DMatrix<f64>, order: usize, algorithm: Algorithm) -> Result<MvarModel> {
    check_dimensions(x.nrows(), x.ncols(), order)?;
    let (a, v) = match algorithm {
        Algorithm::YuleWalker => yule_walker(x, order)?,
        Algorithm::LeastSquares => least_squares(x, order)?,
    };
    Ok(MvarModel {
        coefs: split_blocks(&a, order),
        noise_cov: to_array2(&v),
    })
}

/// A model of order `p` on `C` channels needs more than `p · (C + 1)`
/// samples to leave the normal equations well posed.
fn check_dimensions(n_ch: usize, n_t: usize, order: usize) -> Result<()> {
    if order == 0 {
        return Err(Error::Estimation("model order must be at least 1".into()));
    }
    if n_ch == 0 {
        return Err(Error::Estimation("no channels to fit".into()));
    }
    let needed = order * (n_ch + 1);
    if n_t <= needed {
        return Err(Error::Estimation(format!(
            "order {order} on {n_ch} channels needs more than {needed} samples, got {n_t}"
        )));
    }
    Ok(())
}

/// Biased autocovariance `R(0) … R(max_lag)` of `[C, T]` data.
pub fn autocovariance(x: &DMatrix<f64>, max_lag: usize) -> Vec<DMatrix<f64>> {
    let n_t = x.ncols();
    let inv_t = 1.0 / n_t as f64;
    (0..=max_lag)
        .map(|k| {
            let len = n_t - k;
            (x.columns(k, len) * x.columns(0, len).transpose()) * inv_t
        })
        .collect()
}

fn yule_walker(x: &DMatrix<f64>, p: usize) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    let c = x.nrows();
    let r = autocovariance(x, p);

    // Γ block (k, m) = R(m − k), 0-based block indices.
    let mut gamma = DMatrix::<f64>::zeros(c * p, c * p);
    for k in 0..p {
        for m in 0..p {
            let block = if m >= k { r[m - k].clone() } else { r[k - m].transpose() };
            gamma.view_mut((k * c, m * c), (c, c)).copy_from(&block);
        }
    }
    let mut rhs = DMatrix::<f64>::zeros(c, c * p);
    for m in 0..p {
        rhs.view_mut((0, m * c), (c, c)).copy_from(&r[m + 1]);
    }

    // A Γ = rhs  ⇔  Γᵀ Aᵀ = rhsᵀ
    let a = gamma
        .transpose()
        .lu()
        .solve(&rhs.transpose())
        .ok_or_else(|| Error::Estimation("singular Yule–Walker system".into()))?
        .transpose();

    let mut v = r[0].clone();
    for k in 0..p {
        v -= a.columns(k * c, c) * r[k + 1].transpose();
    }
    Ok((a, v))
}

fn least_squares(x: &DMatrix<f64>, p: usize) -> Result<(DMatrix<f64>, DMatrix<f64>)> {
    let c = x.nrows();
    let m = x.ncols() - p;

    let y = x.columns(p, m).into_owned();
    let mut z = DMatrix::<f64>::zeros(c * p, m);
    for k in 0..p {
        z.view_mut((k * c, 0), (c, m)).copy_from(&x.columns(p - k - 1, m));
    }

    // (Z Zᵀ) Aᵀ = Z Yᵀ
    let zzt = &z * z.transpose();
    let zyt = &z * y.transpose();
    let a = zzt
        .lu()
        .solve(&zyt)
        .ok_or_else(|| Error::Estimation("singular least-squares normal equations".into()))?
        .transpose();

    let resid = &y - &a * &z;
    let v = (&resid * resid.transpose()) / m as f64;
    Ok((a, v))
}

/// `[C, C·p]` → `[p, C, C]`.
fn split_blocks(a: &DMatrix<f64>, p: usize) -> Array3<f64> {
    let c = a.nrows();
    Array3::from_shape_fn((p, c, c), |(k, i, j)| a[(i, k * c + j)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Deterministic white-ish sequence (no RNG needed for unit tests).
    fn wiggle(t: usize, seed: f64) -> f64 {
        ((t as f64 * 12.9898 + seed * 78.233).sin() * 43758.5453).fract() - 0.5
    }

    fn ar1_data(a: f64, n_t: usize) -> Array2<f64> {
        let mut data = Array2::<f64>::zeros((1, n_t));
        for t in 1..n_t {
            data[[0, t]] = a * data[[0, t - 1]] + wiggle(t, 1.0);
        }
        data
    }

    #[test]
    fn autocovariance_lag_zero_is_variance() {
        let x = DMatrix::from_row_slice(1, 4, &[1.0, -1.0, 1.0, -1.0]);
        let r = autocovariance(&x, 1);
        approx::assert_abs_diff_eq!(r[0][(0, 0)], 1.0, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(r[1][(0, 0)], -0.75, epsilon = 1e-12);
    }

    #[test]
    fn univariate_ar1_recovered_by_both_algorithms() {
        let data = ar1_data(0.8, 20_000);
        for alg in [Algorithm::YuleWalker, Algorithm::LeastSquares] {
            let m = fit(data.view(), 1, alg).unwrap();
            assert_eq!(m.order(), 1);
            approx::assert_abs_diff_eq!(m.coefs[[0, 0, 0]], 0.8, epsilon = 0.03);
            assert!(m.noise_cov[[0, 0]] > 0.0);
        }
    }

    #[test]
    fn rejects_order_zero_and_short_data() {
        let data = Array2::<f64>::zeros((2, 10));
        assert!(matches!(fit(data.view(), 0, Algorithm::YuleWalker), Err(Error::Estimation(_))));
        // 3 · (2 + 1) = 9 < 10 is fine; 4 · 3 = 12 ≥ 10 is not.
        assert!(check_dimensions(2, 10, 3).is_ok());
        assert!(check_dimensions(2, 10, 4).is_err());
    }

    #[test]
    fn constant_channel_is_singular() {
        let mut data = ar1_data(0.5, 500);
        data = ndarray::concatenate![ndarray::Axis(0), data, Array2::from_elem((1, 500), 3.0)];
        let err = fit(data.view(), 2, Algorithm::LeastSquares).unwrap_err();
        assert!(matches!(err, Error::Estimation(_)), "{err}");
    }

    #[test]
    fn split_blocks_layout() {
        // C = 2, p = 2: [A1 | A2]
        let a = DMatrix::from_row_slice(2, 4, &[1.0, 2.0, 5.0, 6.0, 3.0, 4.0, 7.0, 8.0]);
        let coefs = split_blocks(&a, 2);
        assert_eq!(coefs[[0, 1, 0]], 3.0);
        assert_eq!(coefs[[1, 0, 1]], 6.0);
        assert_eq!(coefs[[1, 1, 1]], 8.0);
    }
}
