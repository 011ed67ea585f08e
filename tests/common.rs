/// Shared helpers: synthetic EDF files and simulated VAR processes.
use edfplus::{EdfWriter, SignalParam};
use ndarray::{Array2, Array3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use std::io::Write;

#[allow(unused)]
/// Description of one signal in a synthetic EDF file.
pub struct TestSignal {
    pub label: String,
    pub samples_per_record: usize,
    pub physical: (f64, f64),
    /// Physical values, `samples_per_record × n_records` long.
    pub values: Vec<f64>,
}

#[allow(unused)]
/// Write an EDF+ file of `n_records` one-second records through
/// `edfplus::EdfWriter`. Annotations are `(onset_secs, text)` pairs.
pub fn write_edf(signals: &[TestSignal], n_records: usize, annotations: &[(f64, &str)]) -> tempfile::NamedTempFile {
    let file = tempfile::NamedTempFile::new().expect("create temp file");
    let path = file.path().to_str().expect("utf-8 temp path");
    let mut w = EdfWriter::create(path).expect("create EDF writer");
    w.set_patient_info("P001", "M", "01-JAN-1990", "eegraph test").expect("patient info");
    for s in signals {
        w.add_signal(SignalParam {
            label: s.label.clone(),
            samples_in_file: 0,
            physical_max: s.physical.1,
            physical_min: s.physical.0,
            digital_max: 32767,
            digital_min: -32768,
            samples_per_record: s.samples_per_record.try_into().expect("samples per record"),
            physical_dimension: "uV".to_string(),
            prefilter: "HP:0.1Hz LP:70Hz".to_string(),
            transducer: "AgAgCl electrode".to_string(),
        })
        .expect("add signal");
    }
    for &(onset, text) in annotations {
        w.add_annotation(onset, None, text).expect("add annotation");
    }
    for r in 0..n_records {
        let record: Vec<Vec<f64>> = signals
            .iter()
            .map(|s| {
                let start = r * s.samples_per_record;
                s.values[start..start + s.samples_per_record].to_vec()
            })
            .collect();
        w.write_samples(&record).expect("write record");
    }
    w.finalize().expect("finalize EDF");
    file
}

#[allow(unused)]
/// Write bytes to a temp file that lives as long as the returned handle.
pub fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().expect("create temp file");
    f.write_all(bytes).expect("write temp file");
    f.flush().expect("flush temp file");
    f
}

#[allow(unused)]
/// Simulate `x(t) = Σ_k A_k x(t−k) + e(t)`, `e ~ N(0, I)`, with a burn-in
/// of 500 samples. `coefs` is `[p, C, C]`.
pub fn simulate_var(coefs: &Array3<f64>, n_t: usize, seed: u64) -> Array2<f64> {
    let (p, c, _) = coefs.dim();
    let burn = 500;
    let total = n_t + burn;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = Array2::<f64>::zeros((c, total));
    for t in 0..total {
        for i in 0..c {
            let mut v: f64 = StandardNormal.sample(&mut rng);
            for k in 0..p.min(t) {
                for j in 0..c {
                    v += coefs[[k, i, j]] * x[[j, t - k - 1]];
                }
            }
            x[[i, t]] = v;
        }
    }
    x.slice(ndarray::s![.., burn..]).to_owned()
}

#[allow(unused)]
/// Stable 3-channel VAR(2) with a single driving path 0 → 1 → 2.
pub fn cascade_var2() -> Array3<f64> {
    let mut a = Array3::<f64>::zeros((2, 3, 3));
    // Lag 1
    a[[0, 0, 0]] = 0.5;
    a[[0, 1, 1]] = 0.4;
    a[[0, 2, 2]] = 0.3;
    a[[0, 1, 0]] = 0.6; // 0 drives 1
    a[[0, 2, 1]] = 0.5; // 1 drives 2
    // Lag 2
    a[[1, 0, 0]] = -0.3;
    a[[1, 1, 1]] = -0.2;
    a
}

#[allow(unused)]
/// Row-major list of cells where `m` is nonzero.
pub fn nonzero_cells(m: &Array2<f64>) -> Vec<(usize, usize)> {
    m.indexed_iter().filter(|(_, &v)| v != 0.0).map(|(ij, _)| ij).collect()
}
