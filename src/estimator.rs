//! Pluggable connectivity estimation.
//!
//! [`GraphBuilder`](crate::GraphBuilder) only needs a `[freq, from, to]`
//! cube; how it is produced is behind [`ConnectivityEstimator`]. The
//! built-in [`MvarEstimator`] fits an MVAR model and evaluates PDC or DTF.
use ndarray::{Array3, ArrayView2};

use crate::config::{Algorithm, Measure, OrderCriterion};
use crate::error::Result;
use crate::mvar::{self, OrderSelection};
use crate::spectral;

/// Model order: fixed, or searched with an information criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelOrder {
    Fixed(usize),
    Auto { max_order: usize, criterion: OrderCriterion },
}

/// Everything an estimator needs besides the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimationParams {
    pub measure:    Measure,
    pub algorithm:  Algorithm,
    pub order:      ModelOrder,
    /// Number of frequency points from 0 Hz to Nyquist, inclusive.
    pub resolution: usize,
}

/// Estimator output.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// `[resolution, C, C]`, indexed `[freq, from, to]`.
    pub spectra:   Array3<f64>,
    /// Model order actually used.
    pub order:     usize,
    /// Criterion curve when the order was searched.
    pub selection: Option<OrderSelection>,
}

/// Source of directed spectral connectivity.
///
/// Implementations must be deterministic in their inputs.
pub trait ConnectivityEstimator {
    /// `data` is `[C, T]`, `sfreq` in Hz.
    fn estimate(&self, data: ArrayView2<'_, f64>, sfreq: f64, params: &EstimationParams) -> Result<Estimate>;
}

/// MVAR fit + PDC / DTF, reported as `[freq, from, to]` so that cell
/// `[f, i, j]` is the influence of channel `i` on channel `j`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MvarEstimator;

impl ConnectivityEstimator for MvarEstimator {
    fn estimate(&self, data: ArrayView2<'_, f64>, sfreq: f64, params: &EstimationParams) -> Result<Estimate> {
        let (order, selection) = match params.order {
            ModelOrder::Fixed(p) => (p, None),
            ModelOrder::Auto { max_order, criterion } => {
                let sel = mvar::select_order(data, max_order, params.algorithm, criterion)?;
                log::info!("selected model order {} by {criterion} (max {max_order})", sel.best);
                (sel.best, Some(sel))
            }
        };
        let model = mvar::fit(data, order, params.algorithm)?;
        // PDC / DTF are indexed [freq, to, from]; flip to [freq, from, to].
        let spectra = spectral::connectivity(&model, params.measure, sfreq, params.resolution)?
            .permuted_axes([0, 2, 1])
            .as_standard_layout()
            .into_owned();
        Ok(Estimate { spectra, order, selection })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn noise(n_ch: usize, n_t: usize) -> Array2<f64> {
        Array2::from_shape_fn((n_ch, n_t), |(c, t)| {
            ((t as f64 * 12.9898 + c as f64 * 78.233).sin() * 43758.5453).fract()
        })
    }

    #[test]
    fn fixed_order_skips_selection() {
        let data = noise(3, 600);
        let params = EstimationParams {
            measure: Measure::Pdc,
            algorithm: Algorithm::YuleWalker,
            order: ModelOrder::Fixed(2),
            resolution: 50,
        };
        let est = MvarEstimator.estimate(data.view(), 100.0, &params).unwrap();
        assert_eq!(est.order, 2);
        assert!(est.selection.is_none());
        assert_eq!(est.spectra.dim(), (50, 3, 3));
    }

    #[test]
    fn spectra_are_indexed_from_to() {
        // Channel 1 follows channel 0 one sample later.
        let src = noise(1, 2001);
        let jitter = noise(2, 2000);
        let mut data = Array2::<f64>::zeros((2, 2000));
        for t in 0..2000 {
            data[[0, t]] = src[[0, t + 1]];
            data[[1, t]] = 0.8 * src[[0, t]] + 0.2 * jitter[[1, t]];
        }
        let params = EstimationParams {
            measure: Measure::Pdc,
            algorithm: Algorithm::LeastSquares,
            order: ModelOrder::Fixed(1),
            resolution: 20,
        };
        let est = MvarEstimator.estimate(data.view(), 100.0, &params).unwrap();
        for f in 0..20 {
            assert!(
                est.spectra[[f, 0, 1]] > est.spectra[[f, 1, 0]] + 0.3,
                "bin {f}: 0→1 {} vs 1→0 {}",
                est.spectra[[f, 0, 1]],
                est.spectra[[f, 1, 0]]
            );
        }
    }

    #[test]
    fn auto_order_reports_curve() {
        let data = noise(2, 800);
        let params = EstimationParams {
            measure: Measure::Dtf,
            algorithm: Algorithm::LeastSquares,
            order: ModelOrder::Auto { max_order: 4, criterion: OrderCriterion::Aic },
            resolution: 10,
        };
        let est = MvarEstimator.estimate(data.view(), 100.0, &params).unwrap();
        let sel = est.selection.unwrap();
        assert_eq!(sel.values.len(), 4);
        assert_eq!(est.order, sel.best);
        assert!((1..=4).contains(&est.order));
    }
}
