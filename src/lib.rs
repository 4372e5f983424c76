/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Bounded multi-label propagation for community detection.
//!
//! An implementation of _LabelRank_: every vertex keeps a bounded,
//! probability-sorted set of the `L` most likely community labels. Each
//! iteration mixes a vertex's neighbors' label distributions, renormalizes by
//! the neighborhood's edge weight, and sharpens the result with an inflation
//! exponent. Vertices whose labelset is already a subset of enough neighbors'
//! labelsets are considered stable and are copied forward unchanged.
//!
//! # Algorithm
//!
//! 1. [`initialize_vertex`](kernel::initialize_vertex) seeds each vertex's
//!    labelset from its own edge weights.
//! 2. [`run_sequential`](driver::run_sequential) or
//!    [`run_parallel`](driver::run_parallel) repeat
//!    [`update_vertex`](kernel::update_vertex) (skipped for
//!    [`is_stable`](kernel::is_stable) vertices) for a fixed number of
//!    iterations.
//! 3. [`extract_membership`](result::extract_membership) reads the top label
//!    of each vertex's final labelset.
//!
//! # Functions
//!
//! - [`labelrank`]: convenience entry point, sequential, unlogged;
//! - [`labelrank_sequential`]: sequential driver with an explicit progress log;
//! - [`labelrank_parallel`]: data-parallel driver over a [`rayon::ThreadPool`].
//!
//! # Requirements
//!
//! The graph passed in should already be symmetric and carry self-loops (see
//! [`graph::WeightedGraph`]); this crate does not perform graph I/O,
//! symmetrization, or self-loop augmentation — those are the caller's
//! responsibility.

pub mod accumulator;
pub mod driver;
pub mod graph;
pub mod kernel;
pub mod labelset;
pub mod options;
pub mod result;
pub mod scheduling;

pub use accumulator::AccumulatorLabelset;
pub use graph::{AdjacencyListGraph, WeightedGraph};
pub use labelset::Labelset;
pub use options::{LabelRankOptions, OptionsError};
pub use result::LabelRankOutput;
pub use scheduling::SchedulingPolicy;

use anyhow::Result;
use dsi_progress_logger::no_logging;

/// Default labelset capacity `L`, matching the reference implementation.
pub const DEFAULT_CAPACITY: usize = 4;

/// Runs LabelRank sequentially with no progress logging and the default
/// labelset capacity (`L = 4`).
///
/// This is the simplest entry point: validate `options`, run the iteration to
/// completion, and return the resulting membership. Use
/// [`labelrank_sequential`] or [`labelrank_parallel`] directly if you want
/// progress reporting or a different capacity.
pub fn labelrank<G: WeightedGraph + Sync>(
    graph: &G,
    options: &LabelRankOptions,
) -> Result<LabelRankOutput> {
    driver::run_sequential::<G, DEFAULT_CAPACITY>(graph, options, no_logging![])
}

/// Runs LabelRank sequentially, reporting iteration progress through `pl`.
pub fn labelrank_sequential<G: WeightedGraph + Sync>(
    graph: &G,
    options: &LabelRankOptions,
    pl: &mut impl dsi_progress_logger::ProgressLog,
) -> Result<LabelRankOutput> {
    driver::run_sequential::<G, DEFAULT_CAPACITY>(graph, options, pl)
}

/// Runs LabelRank with the data-parallel driver over `thread_pool`, reporting
/// per-node progress through `cpl`.
pub fn labelrank_parallel<G: WeightedGraph + Sync>(
    graph: &G,
    options: &LabelRankOptions,
    scheduling: SchedulingPolicy,
    thread_pool: &rayon::ThreadPool,
    cpl: &mut impl dsi_progress_logger::ConcurrentProgressLog,
) -> Result<LabelRankOutput> {
    driver::run_parallel::<G, DEFAULT_CAPACITY>(graph, options, scheduling, thread_pool, cpl)
}
