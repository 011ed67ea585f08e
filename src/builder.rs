//! Orchestration: recording → connectivity cube → pruned graphs.
use std::fmt;
use std::path::Path;
use ndarray::{s, Array2};

use crate::config::ConnectivityConfig;
use crate::error::{Error, Result};
use crate::estimator::{ConnectivityEstimator, EstimationParams, ModelOrder, MvarEstimator};
use crate::graph::{self, BinaryGraph, WeightedGraph};
use crate::layout::ChannelLayout;
use crate::mvar::OrderSelection;
use crate::prune::prune_to_density;
use crate::recording::Recording;

/// Everything one [`GraphBuilder::compute_connectivity`] call produces.
#[derive(Debug, Clone)]
pub struct ConnectivityResult {
    /// Model order used by the estimator.
    pub order:          usize,
    /// Criterion curve when the order was searched.
    pub selection:      Option<OrderSelection>,
    /// Frequency of the selected bin in Hz.
    pub frequency_hz:   f64,
    /// Unpruned connectivity at the selected bin, diagonal zeroed.
    pub raw:            Array2<f64>,
    /// Pruned weighted adjacency.
    pub connectivity:   Array2<f64>,
    /// Binary adjacency of `connectivity`.
    pub binary:         Array2<u8>,
    /// Final edge density.
    pub density:        f64,
    /// Number of edges removed by pruning.
    pub removed_edges:  usize,
    pub weighted_graph: WeightedGraph,
    pub binary_graph:   BinaryGraph,
}

/// Builds directed connectivity graphs from one recording.
///
/// The builder is immutable once configured; each call to
/// [`compute_connectivity`](Self::compute_connectivity) returns a fresh
/// [`ConnectivityResult`].
///
/// ```no_run
/// use eegraph::{ConnectivityConfig, GraphBuilder};
///
/// let builder = GraphBuilder::open("data/S001R01.edf").unwrap();
/// let cfg = ConnectivityConfig { freq_bin: 12, density_threshold: 0.15, ..Default::default() };
/// let res = builder.compute_connectivity(&cfg).unwrap();
/// println!("{} edges", res.weighted_graph.edge_count());
/// ```
pub struct GraphBuilder {
    recording: Recording,
    estimator: Box<dyn ConnectivityEstimator>,
    layout:    Option<ChannelLayout>,
}

impl fmt::Debug for GraphBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphBuilder")
            .field("recording", &self.recording)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl GraphBuilder {
    /// Use `recording` with the built-in [`MvarEstimator`] and no layout.
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            estimator: Box::new(MvarEstimator),
            layout: None,
        }
    }

    /// Load an EDF file and wrap it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Recording::load(path)?))
    }

    /// Replace the connectivity estimator.
    pub fn with_estimator(mut self, estimator: Box<dyn ConnectivityEstimator>) -> Self {
        self.estimator = estimator;
        self
    }

    /// Attach electrode positions to the nodes of every produced graph.
    pub fn with_layout(mut self, layout: ChannelLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    pub fn layout(&self) -> Option<&ChannelLayout> {
        self.layout.as_ref()
    }

    /// Estimate connectivity, pick `cfg.freq_bin`, prune to
    /// `cfg.density_threshold` and build both labelled graphs.
    pub fn compute_connectivity(&self, cfg: &ConnectivityConfig) -> Result<ConnectivityResult> {
        let rec = &self.recording;
        let params = EstimationParams {
            measure: cfg.measure,
            algorithm: cfg.algorithm,
            // `Some(0)` is no order at all: search.
            order: match cfg.order {
                Some(p) if p > 0 => ModelOrder::Fixed(p),
                _ => ModelOrder::Auto { max_order: cfg.max_order, criterion: cfg.criterion },
            },
            resolution: cfg.resolution,
        };

        let estimate = self.estimator.estimate(rec.data.view(), rec.sfreq, &params)?;
        let (n_freq, n_from, n_to) = estimate.spectra.dim();
        if n_from != rec.n_channels() || n_to != rec.n_channels() {
            return Err(Error::Estimation(format!(
                "estimator returned {n_from}×{n_to} matrices for {} channels",
                rec.n_channels()
            )));
        }
        if cfg.freq_bin >= n_freq {
            return Err(Error::InvalidParameter(format!(
                "frequency bin {} out of range (estimator produced {n_freq} bins)",
                cfg.freq_bin
            )));
        }

        let mut raw = estimate.spectra.slice(s![cfg.freq_bin, .., ..]).to_owned();
        raw.diag_mut().fill(0.0);

        let pruned = prune_to_density(&raw, cfg.density_threshold)?;
        let nodes = graph::channels(&rec.ch_names, self.layout.as_ref());
        let weighted_graph = graph::weighted_graph(&pruned.weighted, &nodes)?;
        let binary_graph = graph::binary_graph(&pruned.binary, &nodes)?;

        let frequency_hz = crate::config::bin_frequency(cfg.freq_bin, n_freq, rec.sfreq);
        log::info!(
            "{} @ {frequency_hz:.2} Hz (bin {}), order {}: {} edges, density {:.3}",
            cfg.measure,
            cfg.freq_bin,
            estimate.order,
            weighted_graph.edge_count(),
            pruned.density
        );

        Ok(ConnectivityResult {
            order: estimate.order,
            selection: estimate.selection,
            frequency_hz,
            raw,
            connectivity: pruned.weighted,
            binary: pruned.binary,
            density: pruned.density,
            removed_edges: pruned.removed,
            weighted_graph,
            binary_graph,
        })
    }
}
