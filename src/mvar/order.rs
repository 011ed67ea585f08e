//! Model order selection by information criterion.
use ndarray::ArrayView2;

use super::demean;
use super::fit::fit_centered;
use crate::config::{Algorithm, OrderCriterion};
use crate::error::{Error, Result};

/// Outcome of an order search.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSelection {
    /// Order with the lowest criterion value (first on ties).
    pub best:      usize,
    /// Criterion value for orders `1..=max_order` (`values[p - 1]`).
    /// Orders whose value is not finite are kept as `f64::INFINITY`.
    pub values:    Vec<f64>,
    pub criterion: OrderCriterion,
}

/// Criterion value for a model of order `p` on `c` channels and `t` samples
/// whose residual covariance has determinant `det_v`.
pub fn criterion_value(criterion: OrderCriterion, det_v: f64, p: usize, c: usize, t: usize) -> f64 {
    let (p, c, t) = (p as f64, c as f64, t as f64);
    let ln_det = det_v.ln();
    match criterion {
        OrderCriterion::Aic => 2.0 * ln_det + 2.0 * p * c * c / t,
        OrderCriterion::HannanQuinn => ln_det + 2.0 * t.ln().ln() * p * c * c / t,
        OrderCriterion::Schwarz => ln_det + t.ln() * p * c * c / t,
        OrderCriterion::Fpe => ln_det + c * ((t + p * c + 1.0) / (t - p * c - 1.0)).ln(),
    }
}

/// Fit every order in `1..=max_order` and return the best by `criterion`.
///
/// An order whose fit fails (too few samples, singular system) scores
/// `+∞`; the search only fails when no order yields a finite value.
pub fn select_order(
    data: ArrayView2<'_, f64>,
    max_order: usize,
    algorithm: Algorithm,
    criterion: OrderCriterion,
) -> Result<OrderSelection> {
    let (n_ch, n_t) = data.dim();
    if max_order == 0 {
        return Err(Error::Estimation("maximum model order must be at least 1".into()));
    }
    if n_ch == 0 {
        return Err(Error::Estimation("no channels to fit".into()));
    }
    let x = demean(data);

    let mut values = Vec::with_capacity(max_order);
    for p in 1..=max_order {
        let model = match fit_centered(&x, p, algorithm) {
            Ok(model) => model,
            Err(Error::Estimation(reason)) => {
                log::warn!("order {p}: fit failed ({reason}), skipped");
                values.push(f64::INFINITY);
                continue;
            }
            Err(e) => return Err(e),
        };
        let det_v = super::to_dmatrix(model.noise_cov.view()).determinant();
        let value = criterion_value(criterion, det_v, p, n_ch, n_t);
        if value.is_finite() {
            log::debug!("order {p}: {criterion} = {value:.6}");
            values.push(value);
        } else {
            log::warn!("order {p}: {criterion} is not finite (det V = {det_v:e}), skipped");
            values.push(f64::INFINITY);
        }
    }

    let best = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .fold(None::<(usize, f64)>, |acc, (i, &v)| match acc {
            Some((_, best)) if best <= v => acc,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i + 1)
        .ok_or_else(|| {
            Error::Estimation(format!("{criterion} is not finite for any order in 1..={max_order}"))
        })?;

    Ok(OrderSelection { best, values, criterion })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aic_penalty_grows_with_order() {
        let a1 = criterion_value(OrderCriterion::Aic, 1.0, 1, 2, 100);
        let a2 = criterion_value(OrderCriterion::Aic, 1.0, 2, 2, 100);
        approx::assert_abs_diff_eq!(a1, 0.08, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(a2, 0.16, epsilon = 1e-12);
    }

    #[test]
    fn schwarz_penalises_harder_than_aic_per_unit() {
        // For T > e², ln T > 2, so SBC's penalty dominates AIC's halved one.
        let s = criterion_value(OrderCriterion::Schwarz, 1.0, 3, 4, 1000);
        let a = criterion_value(OrderCriterion::Aic, 1.0, 3, 4, 1000) / 2.0;
        assert!(s > a);
    }

    #[test]
    fn fpe_undefined_when_too_many_parameters() {
        let v = criterion_value(OrderCriterion::Fpe, 1.0, 10, 10, 50);
        assert!(!v.is_finite());
    }

    #[test]
    fn non_positive_determinant_is_not_finite() {
        assert!(!criterion_value(OrderCriterion::Aic, 0.0, 1, 1, 10).is_finite());
        assert!(!criterion_value(OrderCriterion::Aic, -1.0, 1, 1, 10).is_finite());
    }

    const SHORT: [f64; 10] = [0.3, -1.2, 0.8, 0.1, -0.5, 1.4, -0.9, 0.2, 0.7, -0.4];

    #[test]
    fn failed_orders_score_infinity() {
        // 10 samples on one channel fit orders 1..=4 only.
        let data = ndarray::Array2::from_shape_vec((1, 10), SHORT.to_vec()).unwrap();
        let sel = select_order(data.view(), 6, Algorithm::YuleWalker, OrderCriterion::Aic).unwrap();
        assert_eq!(sel.values.len(), 6);
        assert!(sel.values[..4].iter().all(|v| v.is_finite()), "{:?}", sel.values);
        assert!(sel.values[4..].iter().all(|&v| v == f64::INFINITY), "{:?}", sel.values);
        assert!((1..=4).contains(&sel.best));
    }

    #[test]
    fn all_orders_failing_is_an_error() {
        let data = ndarray::Array2::from_shape_vec((1, 2), SHORT[..2].to_vec()).unwrap();
        let err = select_order(data.view(), 3, Algorithm::LeastSquares, OrderCriterion::Schwarz).unwrap_err();
        assert!(matches!(err, Error::Estimation(_)), "{err}");
        let err = select_order(data.view(), 0, Algorithm::LeastSquares, OrderCriterion::Schwarz).unwrap_err();
        assert!(matches!(err, Error::Estimation(_)), "{err}");
    }
}
