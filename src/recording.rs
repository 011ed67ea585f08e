//! Multichannel recording loaded once per [`GraphBuilder`](crate::GraphBuilder).
use std::path::Path;
use ndarray::Array2;

use crate::edf;
use crate::error::{Error, Result};

/// A continuous multichannel EEG recording.
#[derive(Debug, Clone)]
pub struct Recording {
    /// `[C, T]` samples in the file's physical units.
    pub data:     Array2<f64>,
    /// Sampling rate in Hz.
    pub sfreq:    f64,
    /// Channel names, one per row of `data`.
    pub ch_names: Vec<String>,
}

impl Recording {
    /// Build a recording from in-memory data.
    ///
    /// Fails with [`Error::InvalidParameter`] when the row count does not
    /// match the number of names, when there is no sample at all, or when
    /// the sampling rate is not a positive finite number.
    pub fn new(data: Array2<f64>, sfreq: f64, ch_names: Vec<String>) -> Result<Self> {
        let (n_ch, n_t) = data.dim();
        if n_ch != ch_names.len() {
            return Err(Error::InvalidParameter(format!(
                "{n_ch} data rows but {} channel names",
                ch_names.len()
            )));
        }
        if n_ch == 0 || n_t == 0 {
            return Err(Error::InvalidParameter(format!(
                "empty recording ({n_ch} channels × {n_t} samples)"
            )));
        }
        if !(sfreq.is_finite() && sfreq > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "sampling rate must be positive, got {sfreq}"
            )));
        }
        Ok(Self { data, sfreq, ch_names })
    }

    /// Load an EDF / EDF+ file. Annotation signals are dropped and channel
    /// labels are cleaned with [`clean_label`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = edf::open_raw(path).map_err(|e| Error::load(path, &e))?;
        let sfreq = raw.sfreq().map_err(|e| Error::load(path, &e))?;
        let ch_names: Vec<String> = raw.data_labels().iter().map(|l| clean_label(l)).collect();
        if raw.n_annotation > 0 {
            log::debug!("ignored {} annotation signal(s) in {}", raw.n_annotation, path.display());
        }
        let data = raw.read_all_data().map_err(|e| Error::load(path, &e))?;

        let rec = Self::new(data, sfreq, ch_names).map_err(|e| Error::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        log::info!(
            "loaded {}: {} ch × {} samples @ {} Hz",
            path.display(),
            rec.n_channels(),
            rec.n_times(),
            rec.sfreq
        );
        Ok(rec)
    }

    #[inline]
    pub fn n_channels(&self) -> usize {
        self.data.nrows()
    }

    #[inline]
    pub fn n_times(&self) -> usize {
        self.data.ncols()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.n_times() as f64 / self.sfreq
    }
}

/// Trim whitespace and surrounding `.` padding from a channel label
/// (`"Fc5."` → `"Fc5"`, `"..Cz.."` → `"Cz"`).
pub fn clean_label(label: &str) -> String {
    label.trim().trim_matches('.').to_string()
}
