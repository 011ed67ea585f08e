//! Raw EDF data access.
//!
//! # Algorithm
//! 1. `edfplus::EdfReader::open` validates the header against the file
//!    (record count, record size, calibration fields).
//! 2. The signal table is copied out and `EDF Annotations` signals are
//!    dropped.
//! 3. On demand, every data signal is read in full as physical values into
//!    one row of a `[n_signals, n_times]` array.
//!
//! # Sampling rate
//! ```text
//! sfreq = samples_in_file / (file_duration / 10⁷)      file_duration in 100 ns
//! ```
//! All data signals must share one `samples_per_record`.
use std::fmt;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, bail, Context, Result};
use edfplus::EdfReader;
use ndarray::Array2;

/// Label EDF+ uses for its annotation signal.
pub const ANNOTATION_LABEL: &str = "EDF Annotations";

/// Header time unit: 100 ns.
const TIME_UNITS_PER_SEC: f64 = 10_000_000.0;

/// One data signal of an opened file.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalInfo {
    /// Index in the reader's signal table.
    pub index:              usize,
    pub label:              String,
    pub physical_dimension: String,
    pub samples_per_record: usize,
    pub samples_in_file:    usize,
}

/// An opened EDF recording whose samples have not been read yet.
pub struct RawEdf {
    reader:            EdfReader,
    /// Non-annotation signals, in file order.
    pub signals:       Vec<SignalInfo>,
    /// Total recording length in seconds.
    pub duration_secs: f64,
    /// Signals dropped as annotations.
    pub n_annotation:  usize,
    /// File this was read from.
    pub path:          PathBuf,
}

impl fmt::Debug for RawEdf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEdf")
            .field("signals", &self.signals)
            .field("duration_secs", &self.duration_secs)
            .field("n_annotation", &self.n_annotation)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl RawEdf {
    /// Common sampling rate of all data signals.
    pub fn sfreq(&self) -> Result<f64> {
        let Some(first) = self.signals.first() else {
            bail!("no data signals (only annotations)");
        };
        if let Some(other) = self
            .signals
            .iter()
            .find(|s| s.samples_per_record != first.samples_per_record)
        {
            bail!(
                "mixed sampling rates: {:?} has {} samples/record, {:?} has {}",
                other.label,
                other.samples_per_record,
                first.label,
                first.samples_per_record,
            );
        }
        if !(self.duration_secs > 0.0) {
            bail!("recording has no duration");
        }
        Ok(first.samples_in_file as f64 / self.duration_secs)
    }

    /// Samples per data signal across the whole file.
    pub fn n_times(&self) -> usize {
        self.signals.first().map_or(0, |s| s.samples_in_file)
    }

    /// Labels of the data signals, as stored in the file.
    pub fn data_labels(&self) -> Vec<String> {
        self.signals.iter().map(|s| s.label.clone()).collect()
    }

    /// Read all data signals into a `[n_signals, n_times]` array of
    /// physical values.
    pub fn read_all_data(mut self) -> Result<Array2<f64>> {
        // Validates the shared rate.
        self.sfreq()?;
        let n_t = self.n_times();
        if n_t == 0 {
            bail!("EDF file contains no data records");
        }

        let mut out = Array2::<f64>::zeros((self.signals.len(), n_t));
        for (row, sig) in self.signals.iter().enumerate() {
            let samples = self
                .reader
                .read_physical_samples(sig.index, n_t)
                .map_err(edf_error)
                .with_context(|| format!("read signal {:?}", sig.label))?;
            if samples.len() != n_t {
                bail!("signal {:?}: expected {n_t} samples, read {}", sig.label, samples.len());
            }
            for (dst, v) in out.row_mut(row).iter_mut().zip(samples) {
                *dst = v;
            }
        }
        Ok(out)
    }
}

// ── Reader entry point ────────────────────────────────────────────────────

/// Open an EDF file and read its header without decoding samples.
pub fn open_raw<P: AsRef<Path>>(path: P) -> Result<RawEdf> {
    let path = path.as_ref();
    let reader = EdfReader::open(path)
        .map_err(edf_error)
        .with_context(|| format!("open {}", path.display()))?;

    let header = reader.header();
    let duration_secs = header.file_duration as f64 / TIME_UNITS_PER_SEC;
    let mut n_annotation = 0usize;
    let mut signals = Vec::with_capacity(header.signals.len());
    for (index, s) in header.signals.iter().enumerate() {
        if s.label.trim() == ANNOTATION_LABEL {
            n_annotation += 1;
            continue;
        }
        signals.push(SignalInfo {
            index,
            label: s.label.clone(),
            physical_dimension: s.physical_dimension.clone(),
            samples_per_record: usize::try_from(s.samples_per_record)
                .with_context(|| format!("signal {:?}: invalid samples per record", s.label))?,
            samples_in_file: usize::try_from(s.samples_in_file)
                .with_context(|| format!("signal {:?}: invalid sample count", s.label))?,
        });
    }

    Ok(RawEdf {
        reader,
        signals,
        duration_secs,
        n_annotation,
        path: path.to_path_buf(),
    })
}

fn edf_error<E: fmt::Display>(err: E) -> anyhow::Error {
    anyhow!("{err}")
}
