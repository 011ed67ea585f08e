//! Channel-labelled directed graphs built from adjacency matrices.
//!
//! Node `i` of every graph corresponds to row/column `i` of the matrix and
//! carries the name of channel `i`, so the weighted and binary graphs share
//! one name-for-index mapping.
use ndarray::Array2;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::layout::ChannelLayout;

/// Node payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub name:     String,
    /// Electrode position, only set when a layout was attached.
    pub position: Option<(f64, f64)>,
}

/// Directed graph with connectivity weights on the edges.
pub type WeightedGraph = DiGraph<Channel, f64>;
/// Directed presence-only graph.
pub type BinaryGraph = DiGraph<Channel, ()>;

/// Node payloads for `names`, with positions looked up in `layout` if given.
pub fn channels(names: &[String], layout: Option<&ChannelLayout>) -> Vec<Channel> {
    names
        .iter()
        .map(|name| Channel {
            name: name.clone(),
            position: layout.and_then(|l| l.get(name)),
        })
        .collect()
}

/// One edge per positive off-diagonal entry, weight = entry.
pub fn weighted_graph(matrix: &Array2<f64>, nodes: &[Channel]) -> Result<WeightedGraph> {
    build(matrix, nodes, |w| (w.is_finite() && w > 0.0).then_some(w))
}

/// One edge per `1` entry off the diagonal.
pub fn binary_graph(matrix: &Array2<u8>, nodes: &[Channel]) -> Result<BinaryGraph> {
    build(matrix, nodes, |b| (b != 0).then_some(()))
}

fn build<T: Copy, E>(
    matrix: &Array2<T>,
    nodes: &[Channel],
    edge: impl Fn(T) -> Option<E>,
) -> Result<DiGraph<Channel, E>> {
    let (n, m) = matrix.dim();
    if n != m || n != nodes.len() {
        return Err(Error::InvalidParameter(format!(
            "{n}×{m} matrix does not match {} channel names",
            nodes.len()
        )));
    }
    let mut g = DiGraph::with_capacity(n, n * n.saturating_sub(1));
    let idx: Vec<NodeIndex> = nodes.iter().map(|c| g.add_node(c.clone())).collect();
    for ((i, j), &v) in matrix.indexed_iter() {
        if i == j {
            continue;
        }
        if let Some(w) = edge(v) {
            g.add_edge(idx[i], idx[j], w);
        }
    }
    Ok(g)
}

/// Density of a directed graph without self-loops.
pub fn graph_density<N, E>(g: &DiGraph<N, E>) -> f64 {
    crate::prune::density(g.edge_count(), g.node_count())
}

/// Look up a node by channel name.
pub fn find_channel<E>(g: &DiGraph<Channel, E>, name: &str) -> Option<NodeIndex> {
    g.node_indices().find(|&i| g[i].name == name)
}
