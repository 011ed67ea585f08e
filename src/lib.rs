//! # eegraph — directed EEG connectivity graphs
//!
//! `eegraph` turns a multichannel EEG recording into directed functional
//! connectivity graphs: an MVAR model is fitted to the recording, a directed
//! spectral measure (PDC or DTF) is evaluated at one frequency, and the
//! resulting adjacency matrix is pruned to a target edge density.
//!
//! ## Pipeline overview
//!
//! ```text
//! S001R01.edf
//!   │
//!   ├─ Recording::load()        EDF/EDF+ via edfplus, labels cleaned
//!   ├─ mvar::select_order()     AIC / HQ / SBC / FPE over 1..=max_order
//!   ├─ mvar::fit()              Yule–Walker or least squares
//!   ├─ spectral::connectivity() PDC / DTF → [freq, to, from], transposed to [freq, from, to]
//!   ├─ [freq_bin, .., ..]       one frequency slice, diagonal zeroed
//!   ├─ prune_to_density()       drop weakest edge until density ≤ θ
//!   └─ graph::*_graph()         channel-labelled petgraph digraphs
//!        │
//!        └─→ ConnectivityResult { weighted_graph, binary_graph, … }
//! ```
//!
//! ## Quick start
//!
//! ```no_run
//! use eegraph::{ChannelLayout, ConnectivityConfig, GraphBuilder, Measure};
//!
//! let builder = GraphBuilder::open("data/S001R01.edf")
//!     .unwrap()
//!     .with_layout(ChannelLayout::load("data/channel_locations.txt").unwrap());
//!
//! let cfg = ConnectivityConfig {
//!     freq_bin: 12,
//!     measure: Measure::Dtf,
//!     density_threshold: 0.1,
//!     ..ConnectivityConfig::default()
//! };
//! let res = builder.compute_connectivity(&cfg).unwrap();
//! println!("order {} → {} edges", res.order, res.weighted_graph.edge_count());
//! ```
//!
//! ## Pruning only
//!
//! The pruning core is a pure function and needs no recording:
//!
//! ```
//! use eegraph::prune_to_density;
//! use ndarray::array;
//!
//! let m = array![[0.0, 0.9, 0.1], [0.4, 0.0, 0.2], [0.3, 0.8, 0.0]];
//! let out = prune_to_density(&m, 0.5).unwrap();
//! assert_eq!(out.removed, 3);
//! assert_eq!(out.binary[[0, 2]], 0);
//! ```

pub mod builder;
pub mod config;
pub mod edf;
pub mod error;
pub mod estimator;
pub mod graph;
pub mod io;
pub mod layout;
pub mod mvar;
pub mod prune;
pub mod recording;
pub mod spectral;

// ── Crate-root re-exports ─────────────────────────────────────────────────

// orchestration
pub use builder::{ConnectivityResult, GraphBuilder};

// config
pub use config::{Algorithm, ConnectivityConfig, Measure, OrderCriterion, DEFAULT_LAYOUT_PATH};

// errors
pub use error::{Error, Result};

// estimation
pub use estimator::{ConnectivityEstimator, Estimate, EstimationParams, ModelOrder, MvarEstimator};
pub use mvar::{MvarModel, OrderSelection};

// graphs
pub use graph::{BinaryGraph, Channel, WeightedGraph};
pub use prune::{prune_to_density, PrunedMatrices};

// inputs
pub use layout::ChannelLayout;
pub use recording::Recording;

// export
pub use io::{graph_to_json, write_result, StWriter};
