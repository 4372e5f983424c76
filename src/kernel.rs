/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The per-vertex kernels: initialize, update, and the stability predicate.
//!
//! These are total functions over already-validated driver state — they
//! cannot fail and never panic on valid input, which is why only the
//! options-validation boundary (see [`crate::options`]) carries a typed
//! error.
//!
//! [`initialize_vertex`] and [`update_vertex`] write through a `target: &mut
//! Labelset<L>` rather than indexing a whole slice themselves, so the same
//! kernel serves both the sequential driver (`&mut ls[u]` directly) and the
//! parallel driver (a local value later published through a sync slice — see
//! [`crate::driver`]).

use crate::accumulator::AccumulatorLabelset;
use crate::graph::WeightedGraph;
use crate::labelset::Labelset;

/// Seeds `target` from `u`'s own edge weights: the top-`L` heaviest neighbors
/// (self-loops included), normalized by the total edge weight and sharpened
/// by `inflation`.
///
/// `acc` is scratch; it is cleared at the start and left populated (but
/// unused) on return, ready for the next call.
pub fn initialize_vertex<G: WeightedGraph, const L: usize>(
    acc: &mut AccumulatorLabelset,
    target: &mut Labelset<L>,
    graph: &G,
    u: usize,
    inflation: f64,
) {
    acc.clear();
    let mut sumw = 0.0;
    graph.for_each_edge(u, |v, w| {
        acc.set(v, w);
        sumw += w;
    });
    acc.reorder();
    target.copy_from(acc);
    if sumw != 0.0 {
        target.multiply_pow(1.0 / sumw, inflation);
    }
}

/// Mixes `u`'s neighbors' labelsets (read from `ls`) into `target`:
/// accumulates each neighbor's distribution weighted by the edge weight,
/// normalizes by the total edge weight, and sharpens by `inflation`.
pub fn update_vertex<G: WeightedGraph, const L: usize>(
    acc: &mut AccumulatorLabelset,
    target: &mut Labelset<L>,
    ls: &[Labelset<L>],
    graph: &G,
    u: usize,
    inflation: f64,
) {
    acc.clear();
    let mut sumw = 0.0;
    graph.for_each_edge(u, |v, w| {
        acc.combine(&ls[v], w);
        sumw += w;
    });
    acc.reorder();
    target.copy_from(acc);
    if sumw != 0.0 {
        target.multiply_pow(1.0 / sumw, inflation);
    }
}

/// True iff more than `q * degree(u)` of `u`'s neighbors have a labelset that
/// is a superset of `ls[u]`.
///
/// A stable vertex is locally consistent with its neighborhood and is copied
/// forward unchanged by the driver rather than re-mixed (see
/// [`crate::driver`]).
pub fn is_stable<G: WeightedGraph, const L: usize>(
    ls: &[Labelset<L>],
    graph: &G,
    u: usize,
    q: f64,
) -> bool {
    let mut count = 0usize;
    graph.for_each_edge_key(u, |v| {
        if ls[u].is_subset(&ls[v]) {
            count += 1;
        }
    });
    (count as f64) > q * (graph.degree(u) as f64)
}
