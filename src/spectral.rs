//! Frequency-domain representation of an MVAR model and the directed
//! connectivity measures derived from it.
//!
//! ```text
//! A(f) = I − Σ_{k=1..p} A_k · e^{−2πi f k / fs}        H(f) = A(f)⁻¹
//!
//! PDC_ij(f) = |A_ij(f)| / sqrt(Σ_m |A_mj(f)|²)          (column-normalised)
//! DTF_ij(f) = |H_ij(f)| / sqrt(Σ_m |H_im(f)|²)          (row-normalised)
//! ```
//!
//! Both cubes are indexed `[freq, to, from]`: entry `ij` measures the flow
//! from channel `j` into channel `i`.
//!
//! Frequencies are `linspace(0, fs/2, resolution)`. On that grid point `b`
//! sits exactly on bin `b` of a length-`2·(resolution − 1)` DFT, so `A(f)` is
//! computed with one FFT per matrix entry whenever the DFT is long enough to
//! hold all `p` lags; otherwise the sum is evaluated directly.
use std::f64::consts::PI;

use nalgebra::{Complex, DMatrix};
use ndarray::Array3;
use rustfft::FftPlanner;

use crate::config::Measure;
use crate::error::{Error, Result};
use crate::mvar::MvarModel;

type CMatrix = DMatrix<Complex<f64>>;

/// `linspace(0, sfreq / 2, resolution)`.
pub fn frequencies(sfreq: f64, resolution: usize) -> Vec<f64> {
    (0..resolution)
        .map(|b| crate::config::bin_frequency(b, resolution, sfreq))
        .collect()
}

/// `A(f)` for every frequency of the grid.
pub fn transfer_polynomial(model: &MvarModel, sfreq: f64, resolution: usize) -> Vec<CMatrix> {
    let n_fft = 2 * resolution.saturating_sub(1);
    if n_fft > model.order() {
        transfer_fft(model, resolution, n_fft)
    } else {
        transfer_direct(model, &frequencies(sfreq, resolution), sfreq)
    }
}

/// Direct evaluation of `A(f)` at arbitrary frequencies.
pub fn transfer_direct(model: &MvarModel, freqs: &[f64], sfreq: f64) -> Vec<CMatrix> {
    let c = model.n_channels();
    freqs
        .iter()
        .map(|&f| {
            let mut a = CMatrix::identity(c, c);
            for k in 0..model.order() {
                let z = Complex::from_polar(1.0, -2.0 * PI * f * (k + 1) as f64 / sfreq);
                for i in 0..c {
                    for j in 0..c {
                        a[(i, j)] -= z * model.coefs[[k, i, j]];
                    }
                }
            }
            a
        })
        .collect()
}

fn transfer_fft(model: &MvarModel, resolution: usize, n_fft: usize) -> Vec<CMatrix> {
    let c = model.n_channels();
    let mut out = vec![CMatrix::identity(c, c); resolution];

    let mut planner: FftPlanner<f64> = FftPlanner::new();
    let fft = planner.plan_fft_forward(n_fft);
    let mut buf = vec![rustfft::num_complex::Complex::<f64>::default(); n_fft];

    for i in 0..c {
        for j in 0..c {
            buf.iter_mut().for_each(|b| *b = Default::default());
            for k in 0..model.order() {
                buf[k + 1].re = model.coefs[[k, i, j]];
            }
            fft.process(&mut buf);
            for (a, s) in out.iter_mut().zip(&buf) {
                a[(i, j)] -= Complex::new(s.re, s.im);
            }
        }
    }
    out
}

/// Partial directed coherence, `[resolution, to, from]`.
pub fn pdc(model: &MvarModel, sfreq: f64, resolution: usize) -> Array3<f64> {
    let c = model.n_channels();
    let a_f = transfer_polynomial(model, sfreq, resolution);
    let mut out = Array3::<f64>::zeros((resolution, c, c));
    for (fi, a) in a_f.iter().enumerate() {
        for j in 0..c {
            let denom = a.column(j).iter().map(|v| v.norm_sqr()).sum::<f64>().sqrt();
            if denom == 0.0 {
                continue;
            }
            for i in 0..c {
                out[[fi, i, j]] = a[(i, j)].norm() / denom;
            }
        }
    }
    out
}

/// Directed transfer function, `[resolution, to, from]`.
///
/// Fails when `A(f)` is singular at some frequency.
pub fn dtf(model: &MvarModel, sfreq: f64, resolution: usize) -> Result<Array3<f64>> {
    let c = model.n_channels();
    let a_f = transfer_polynomial(model, sfreq, resolution);
    let freqs = frequencies(sfreq, resolution);
    let mut out = Array3::<f64>::zeros((resolution, c, c));
    for (fi, a) in a_f.into_iter().enumerate() {
        let h = a.try_inverse().ok_or_else(|| {
            Error::Estimation(format!("A(f) is singular at {:.3} Hz", freqs[fi]))
        })?;
        for i in 0..c {
            let denom = h.row(i).iter().map(|v| v.norm_sqr()).sum::<f64>().sqrt();
            if denom == 0.0 {
                continue;
            }
            for j in 0..c {
                out[[fi, i, j]] = h[(i, j)].norm() / denom;
            }
        }
    }
    Ok(out)
}

/// Dispatch on `measure`.
pub fn connectivity(
    model: &MvarModel,
    measure: Measure,
    sfreq: f64,
    resolution: usize,
) -> Result<Array3<f64>> {
    if resolution == 0 {
        return Err(Error::Estimation("spectral resolution must be at least 1".into()));
    }
    match measure {
        Measure::Pdc => Ok(pdc(model, sfreq, resolution)),
        Measure::Dtf => dtf(model, sfreq, resolution),
    }
}
