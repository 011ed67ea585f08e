/// eegraph: build directed connectivity graphs from an EDF recording.
///
/// Prints the selected model order, the criterion curve (when searched) and
/// the pruned graph's edges. Optionally writes the matrices to safetensors
/// and the weighted graph to JSON.
///
/// Logging goes through `env_logger`; set `RUST_LOG=debug` for per-order
/// criterion values and pruning totals.
use anyhow::{Context, Result};
use clap::Parser;
use petgraph::visit::EdgeRef;
use std::path::PathBuf;

use eegraph::layout::default_layout_path;
use eegraph::{
    graph_to_json, write_result, Algorithm, ChannelLayout, ConnectivityConfig, GraphBuilder,
    Measure, OrderCriterion,
};

#[derive(Parser, Debug)]
#[command(name = "eegraph", about = "Directed EEG connectivity graphs (PDC / DTF)")]
struct Args {
    /// Input EDF / EDF+ file.
    #[arg(long)]
    edf: PathBuf,

    /// Frequency bin index on linspace(0, fs/2, resolution).
    #[arg(long, default_value_t = 10)]
    freq_bin: usize,

    /// Target edge density of the pruned graph.
    #[arg(long, default_value_t = 0.2)]
    threshold: f64,

    /// Connectivity measure: pdc | dtf.
    #[arg(long, default_value = "pdc")]
    measure: Measure,

    /// MVAR fitting algorithm: yw | ls.
    #[arg(long, default_value = "yw")]
    algorithm: Algorithm,

    /// Fixed model order (searched when omitted).
    #[arg(long)]
    order: Option<usize>,

    /// Upper bound of the order search.
    #[arg(long, default_value_t = 10)]
    max_order: usize,

    /// Order criterion: aic | hq | sbc | fpe.
    #[arg(long, default_value = "aic")]
    criterion: OrderCriterion,

    /// Number of frequency points from 0 Hz to Nyquist.
    #[arg(long, default_value_t = 100)]
    resolution: usize,

    /// Channel layout file; attaches electrode positions to the nodes.
    /// `--layout` without a value uses ./data/channel_locations.txt.
    #[arg(long)]
    layout: Option<Option<PathBuf>>,

    /// Write matrices to this safetensors file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the weighted graph as JSON to this file.
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut builder = GraphBuilder::open(&args.edf)?;
    if let Some(path) = &args.layout {
        let path = path.clone().unwrap_or_else(default_layout_path);
        builder = builder.with_layout(ChannelLayout::load(&path)?);
    }

    let cfg = ConnectivityConfig {
        freq_bin: args.freq_bin,
        measure: args.measure,
        algorithm: args.algorithm,
        order: args.order,
        max_order: args.max_order,
        criterion: args.criterion,
        resolution: args.resolution,
        density_threshold: args.threshold,
    };
    let res = builder.compute_connectivity(&cfg)?;

    if let Some(sel) = &res.selection {
        let curve: Vec<String> = sel.values.iter().map(|v| format!("{v:.4}")).collect();
        println!("{} curve: [{}]", sel.criterion, curve.join(", "));
    }
    println!(
        "{} @ {:.2} Hz  order={}  density={:.3}  edges={}  removed={}",
        cfg.measure,
        res.frequency_hz,
        res.order,
        res.density,
        res.weighted_graph.edge_count(),
        res.removed_edges,
    );
    let g = &res.weighted_graph;
    for e in g.edge_references() {
        println!("  {:>6} → {:<6} {:.4}", g[e.source()].name, g[e.target()].name, e.weight());
    }

    if let Some(path) = &args.output {
        write_result(&res, path)?;
    }
    if let Some(path) = &args.json {
        std::fs::write(path, graph_to_json(g)?)
            .with_context(|| format!("write {}", path.display()))?;
    }
    Ok(())
}
