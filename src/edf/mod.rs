//! EDF / EDF+ recordings.
//!
//! Header parsing, record decoding and calibration are done by the
//! [`edfplus`] reader; this module narrows its output to what connectivity
//! analysis needs: the data signals (annotation channels dropped), their
//! labels, one shared sampling rate and a `[C, T]` matrix of physical values.
//!
//! # Quick start
//! ```no_run
//! use eegraph::edf::open_raw;
//!
//! let raw = open_raw("data/S001R01.edf").unwrap();
//! println!("{} data signals @ {} Hz", raw.signals.len(), raw.sfreq().unwrap());
//! let data = raw.read_all_data().unwrap();  // [n_data_signals, n_times] f64
//! ```
pub mod raw;

pub use raw::{open_raw, RawEdf, SignalInfo, ANNOTATION_LABEL};
