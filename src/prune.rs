//! Density-based pruning of a directed weighted adjacency matrix.
//!
//! Repeatedly removes the globally weakest surviving edge until the edge
//! density `edges / (n·(n−1))` is at or below the target.
//!
//! * Self-loops are never edges: the diagonal is zeroed up front.
//! * Entries `≤ 0` (or non-finite) count as absent.
//! * Ties on the minimum weight go to the first cell in row-major order.
//! * Pruning stops at the first density `≤ θ`; it never removes an extra edge.
//! * A target below the smallest non-empty density `1/(n·(n−1))` is rejected
//!   with [`Error::DensityUnreachable`] instead of emptying the graph.
use ndarray::Array2;

use crate::error::{Error, Result};

/// Output of [`prune_to_density`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedMatrices {
    /// Surviving edges keep their original weight; everything else is 0.
    pub weighted: Array2<f64>,
    /// `1` where `weighted > 0`, else `0`.
    pub binary:   Array2<u8>,
    /// Density after pruning.
    pub density:  f64,
    /// Number of edges removed.
    pub removed:  usize,
}

/// Directed density of an `n`-node graph with `edges` edges (no self-loops).
/// Graphs with fewer than two nodes have density 0.
pub fn density(edges: usize, n: usize) -> f64 {
    if n < 2 {
        return 0.0;
    }
    edges as f64 / (n * (n - 1)) as f64
}

/// Number of positive off-diagonal entries.
pub fn count_edges(matrix: &Array2<f64>) -> usize {
    matrix
        .indexed_iter()
        .filter(|&((i, j), &w)| i != j && is_edge(w))
        .count()
}

/// `1` where `w > 0`, else `0`.
pub fn binarize(matrix: &Array2<f64>) -> Array2<u8> {
    matrix.mapv(|w| u8::from(is_edge(w)))
}

/// Prune `matrix` down to `threshold` density.
///
/// The input is left untouched.
pub fn prune_to_density(matrix: &Array2<f64>, threshold: f64) -> Result<PrunedMatrices> {
    let (n, m) = matrix.dim();
    if n != m {
        return Err(Error::InvalidParameter(format!(
            "adjacency matrix must be square, got {n}×{m}"
        )));
    }
    if threshold.is_nan() {
        return Err(Error::InvalidParameter("density threshold is NaN".into()));
    }

    let mut weighted = matrix.to_owned();
    for ((i, j), w) in weighted.indexed_iter_mut() {
        if i == j || !is_edge(*w) {
            *w = 0.0;
        }
    }

    let mut edges = count_edges(&weighted);
    let min_density = if edges > 0 { density(1, n) } else { 0.0 };
    if threshold < min_density {
        return Err(Error::DensityUnreachable { threshold, min_density });
    }

    let mut removed = 0usize;
    while density(edges, n) > threshold {
        let (i, j) = weakest_edge(&weighted).ok_or(Error::DensityUnreachable {
            threshold,
            min_density,
        })?;
        weighted[[i, j]] = 0.0;
        edges -= 1;
        removed += 1;
    }

    let final_density = density(edges, n);
    log::debug!(
        "pruned {removed} edge(s): {n} nodes, {edges} edges, density {final_density:.4} (target {threshold})"
    );

    Ok(PrunedMatrices {
        binary: binarize(&weighted),
        weighted,
        density: final_density,
        removed,
    })
}

/// Position of the smallest positive entry; first in row-major order on ties.
fn weakest_edge(matrix: &Array2<f64>) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;
    for (idx, &w) in matrix.indexed_iter() {
        if !is_edge(w) {
            continue;
        }
        match best {
            Some((_, b)) if b <= w => {}
            _ => best = Some((idx, w)),
        }
    }
    best.map(|(idx, _)| idx)
}

#[inline]
fn is_edge(w: f64) -> bool {
    w.is_finite() && w > 0.0
}
