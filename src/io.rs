//! Export of connectivity results.
//!
//! * [`StWriter`] / [`write_result`] — matrices as a safetensors file that
//!   numpy / torch can open directly.
//! * [`graph_to_json`] — node/edge list for external renderers.
use std::path::Path;
use ndarray::Array2;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::builder::ConnectivityResult;
use crate::error::Result;
use crate::graph::{Channel, WeightedGraph};

// ── Safetensors writer ────────────────────────────────────────────────────

/// Minimal safetensors writer for F64, I32 and U8 tensors.
///
/// ```rust,no_run
/// use eegraph::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f64("density", &[0.2], &[1]);
/// w.write(Path::new("/tmp/out.safetensors")).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct StWriter {
    entries:  Vec<(String, Vec<u8>, &'static str, Vec<usize>)>,
    metadata: serde_json::Map<String, serde_json::Value>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_f64(&mut self, name: &str, data: &[f64], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "F64", shape.to_vec()));
    }

    pub fn add_f64_arr2(&mut self, name: &str, arr: &Array2<f64>) {
        let data: Vec<f64> = arr.iter().copied().collect();
        self.add_f64(name, &data, &[arr.nrows(), arr.ncols()]);
    }

    pub fn add_u8_arr2(&mut self, name: &str, arr: &Array2<u8>) {
        let data: Vec<u8> = arr.iter().copied().collect();
        self.entries.push((name.to_string(), data, "U8", vec![arr.nrows(), arr.ncols()]));
    }

    pub fn add_i32(&mut self, name: &str, data: &[i32], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, "I32", shape.to_vec()));
    }

    /// String entry in the `__metadata__` header map.
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), serde_json::Value::String(value.to_string()));
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    /// Serialised file contents.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut header_map = serde_json::Map::new();
        if !self.metadata.is_empty() {
            header_map.insert(
                "__metadata__".to_string(),
                serde_json::Value::Object(self.metadata.clone()),
            );
        }
        let mut offset: usize = 0;
        for (name, data, dtype, shape) in &self.entries {
            header_map.insert(name.clone(), serde_json::json!({
                "dtype": dtype,
                "shape": shape,
                "data_offsets": [offset, offset + data.len()],
            }));
            offset += data.len();
        }
        let hdr_bytes = serde_json::to_vec(&header_map)
            .map_err(|e| crate::Error::Io(e.into()))?;
        let pad = (8 - hdr_bytes.len() % 8) % 8;

        let mut out = Vec::with_capacity(8 + hdr_bytes.len() + pad + offset);
        out.extend(((hdr_bytes.len() + pad) as u64).to_le_bytes());
        out.extend(hdr_bytes);
        out.extend(std::iter::repeat(b' ').take(pad));
        for (_, data, _, _) in &self.entries {
            out.extend_from_slice(data);
        }
        Ok(out)
    }
}

/// Write a [`ConnectivityResult`] as safetensors.
///
/// Tensors: `raw` / `connectivity` (F64 `[C, C]`), `binary` (U8 `[C, C]`),
/// `order` (I32 `[1]`), `density` and `frequency_hz` (F64 `[1]`).
/// `__metadata__.ch_names` holds the channel names joined by `,`.
pub fn write_result(result: &ConnectivityResult, path: &Path) -> Result<()> {
    let mut w = StWriter::new();
    w.add_f64_arr2("raw", &result.raw);
    w.add_f64_arr2("connectivity", &result.connectivity);
    w.add_u8_arr2("binary", &result.binary);
    w.add_i32("order", &[result.order as i32], &[1]);
    w.add_f64("density", &[result.density], &[1]);
    w.add_f64("frequency_hz", &[result.frequency_hz], &[1]);

    let names: Vec<&str> = result
        .weighted_graph
        .node_weights()
        .map(|c| c.name.as_str())
        .collect();
    w.add_metadata("ch_names", &names.join(","));
    w.write(path)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

// ── JSON graph export ─────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct JsonGraph<'a> {
    nodes: Vec<&'a Channel>,
    edges: Vec<JsonEdge<'a>>,
}

#[derive(Debug, Serialize)]
struct JsonEdge<'a> {
    source: &'a str,
    target: &'a str,
    weight: f64,
}

/// Serialise a weighted graph as
/// `{"nodes": [{"name", "position"}], "edges": [{"source", "target", "weight"}]}`.
pub fn graph_to_json(g: &WeightedGraph) -> Result<String> {
    let doc = JsonGraph {
        nodes: g.node_weights().collect(),
        edges: g
            .edge_references()
            .map(|e| JsonEdge {
                source: &g[e.source()].name,
                target: &g[e.target()].name,
                weight: *e.weight(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&doc).map_err(|e| crate::Error::Io(e.into()))
}
