//! Connectivity configuration.
//!
//! [`ConnectivityConfig`] holds every tunable parameter of one
//! connectivity computation. Defaults mirror the values the analysis has
//! historically been run with (PDC, Yule–Walker, AIC up to order 10,
//! 100 frequency points).
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Where [`ChannelLayout`](crate::ChannelLayout) files are looked up when no
/// explicit path is given.
pub const DEFAULT_LAYOUT_PATH: &str = "./data/channel_locations.txt";

/// Directed spectral connectivity measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Measure {
    /// Partial directed coherence (column-normalised `|A(f)|`).
    #[default]
    Pdc,
    /// Directed transfer function (row-normalised `|H(f)|`).
    Dtf,
}

/// MVAR fitting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Yule–Walker equations on the biased autocovariance.
    #[default]
    YuleWalker,
    /// Ordinary least squares on the lagged design matrix.
    LeastSquares,
}

/// Information criterion used to pick the model order automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderCriterion {
    /// Akaike: `2 ln det V + 2 p C² / T`.
    #[default]
    Aic,
    /// Hannan–Quinn: `ln det V + 2 ln(ln T) p C² / T`.
    HannanQuinn,
    /// Schwarz–Bayes: `ln det V + ln T · p C² / T`.
    Schwarz,
    /// Final prediction error: `ln det V + C ln((T + pC + 1) / (T − pC − 1))`.
    Fpe,
}

/// Configuration for [`GraphBuilder::compute_connectivity`](crate::GraphBuilder::compute_connectivity).
///
/// All fields are `pub` so you can construct one with struct-update syntax:
///
/// ```
/// use eegraph::{ConnectivityConfig, Measure};
///
/// let cfg = ConnectivityConfig {
///     freq_bin: 20,
///     measure: Measure::Dtf,
///     density_threshold: 0.1,
///     ..ConnectivityConfig::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityConfig {
    /// Index into the estimator's frequency axis. With the default
    /// `resolution` of 100 the axis spans `0 … fs/2` in 99 equal steps.
    ///
    /// Default: `10`.
    pub freq_bin: usize,

    /// Default: [`Measure::Pdc`].
    pub measure: Measure,

    /// Default: [`Algorithm::YuleWalker`].
    pub algorithm: Algorithm,

    /// Fixed model order. `None` (or `Some(0)`) selects the order with [`Self::criterion`]
    /// over `1..=max_order`.
    ///
    /// Default: `None`.
    pub order: Option<usize>,

    /// Upper bound of the automatic order search.
    ///
    /// Default: `10`.
    pub max_order: usize,

    /// Default: [`OrderCriterion::Aic`].
    pub criterion: OrderCriterion,

    /// Number of frequency points between 0 Hz and Nyquist (inclusive).
    ///
    /// Default: `100`.
    pub resolution: usize,

    /// Target edge density of the pruned graph, `edges / (n·(n−1))`.
    ///
    /// Default: `0.2`.
    pub density_threshold: f64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            freq_bin: 10,
            measure: Measure::Pdc,
            algorithm: Algorithm::YuleWalker,
            order: None,
            max_order: 10,
            criterion: OrderCriterion::Aic,
            resolution: 100,
            density_threshold: 0.2,
        }
    }
}

impl ConnectivityConfig {
    /// Frequency in Hz of `freq_bin` for a recording sampled at `sfreq`.
    ///
    /// # Examples
    ///
    /// ```
    /// use eegraph::ConnectivityConfig;
    /// let cfg = ConnectivityConfig { freq_bin: 99, ..Default::default() };
    /// assert_eq!(cfg.frequency_hz(160.0), 80.0);
    /// ```
    pub fn frequency_hz(&self, sfreq: f64) -> f64 {
        bin_frequency(self.freq_bin, self.resolution, sfreq)
    }
}

/// Frequency of point `bin` on `linspace(0, sfreq / 2, resolution)`.
pub fn bin_frequency(bin: usize, resolution: usize, sfreq: f64) -> f64 {
    if resolution <= 1 {
        return 0.0;
    }
    bin as f64 * (sfreq / 2.0) / (resolution - 1) as f64
}

// ── String forms (CLI) ────────────────────────────────────────────────────

impl FromStr for Measure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdc" => Ok(Measure::Pdc),
            "dtf" => Ok(Measure::Dtf),
            other => Err(Error::InvalidParameter(format!("unknown measure {other:?}"))),
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Measure::Pdc => "PDC",
            Measure::Dtf => "DTF",
        })
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yw" | "yule-walker" => Ok(Algorithm::YuleWalker),
            "ls" | "least-squares" => Ok(Algorithm::LeastSquares),
            other => Err(Error::InvalidParameter(format!("unknown algorithm {other:?}"))),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Algorithm::YuleWalker => "yw",
            Algorithm::LeastSquares => "ls",
        })
    }
}

impl FromStr for OrderCriterion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "aic" | "akaike" => Ok(OrderCriterion::Aic),
            "hq" | "hannan-quinn" => Ok(OrderCriterion::HannanQuinn),
            "sbc" | "bic" | "schwarz" => Ok(OrderCriterion::Schwarz),
            "fpe" => Ok(OrderCriterion::Fpe),
            other => Err(Error::InvalidParameter(format!("unknown order criterion {other:?}"))),
        }
    }
}

impl fmt::Display for OrderCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OrderCriterion::Aic => "aic",
            OrderCriterion::HannanQuinn => "hq",
            OrderCriterion::Schwarz => "sbc",
            OrderCriterion::Fpe => "fpe",
        })
    }
}
