/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The result value returned by the LabelRank drivers, and membership
//! extraction from a final labelset array.

use crate::graph::WeightedGraph;
use crate::labelset::Labelset;

/// The outcome of a LabelRank run.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRankOutput {
    /// `membership[u]` is the community label of vertex `u`.
    pub membership: Vec<usize>,
    /// The number of outer iterations actually performed.
    pub iterations: usize,
    /// Mean wall-clock time of the timed runs, in milliseconds.
    pub time_ms: f64,
}

/// Reads the top label of every vertex's final labelset.
///
/// A vertex whose labelset is empty (possible only when it has zero total
/// edge weight, e.g. an isolated vertex the caller did not self-loop) is
/// assigned its own id as its membership, per the isolated-vertex failure
/// mode in the error design.
pub fn extract_membership<G: WeightedGraph, const L: usize>(
    graph: &G,
    ls: &[Labelset<L>],
) -> Vec<usize> {
    let mut membership = vec![0usize; graph.span()];
    graph.for_each_vertex_key(|u| {
        membership[u] = ls[u].best().unwrap_or(u);
    });
    membership
}
