/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The sequential and data-parallel iteration drivers.
//!
//! Both drivers run the same four steps: validate options, initialize every
//! vertex's labelset from its own edges, repeat the mix-and-swap update for
//! `max_iterations`, then extract membership. They differ only in how the
//! per-vertex inner loop is distributed across workers — see
//! [`crate::scheduling`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::Result;
use crossbeam_utils::CachePadded;
use dsi_progress_logger::{ConcurrentProgressLog, ProgressLog};
use sync_cell_slice::SyncSlice;

use crate::accumulator::AccumulatorLabelset;
use crate::graph::WeightedGraph;
use crate::kernel::{initialize_vertex, is_stable, update_vertex};
use crate::labelset::Labelset;
use crate::options::LabelRankOptions;
use crate::result::{extract_membership, LabelRankOutput};
use crate::scheduling::{SchedulingPolicy, RAYON_MIN_LEN};

/// Runs LabelRank sequentially: a single worker walks `0..graph.span()` in
/// order for initialization and for every iteration's mix-and-swap pass.
pub fn run_sequential<G: WeightedGraph, const L: usize>(
    graph: &G,
    options: &LabelRankOptions,
    pl: &mut impl ProgressLog,
) -> Result<LabelRankOutput> {
    options.validate()?;
    let n = graph.span();
    if n == 0 {
        return Ok(LabelRankOutput {
            membership: Vec::new(),
            iterations: 0,
            time_ms: 0.0,
        });
    }

    pl.item_name("iteration");
    pl.expected_updates(Some(options.max_iterations));

    let mut ls = vec![Labelset::<L>::new(); n];
    let mut ms = vec![Labelset::<L>::new(); n];
    let mut acc = AccumulatorLabelset::new();
    let mut total_time = std::time::Duration::ZERO;

    for run in 0..options.repeat {
        pl.start(format!("Run {}/{}", run + 1, options.repeat));
        let started = Instant::now();

        for u in 0..n {
            ls[u] = Labelset::new();
            ms[u] = Labelset::new();
        }
        for u in 0..n {
            initialize_vertex(&mut acc, &mut ls[u], graph, u, options.inflation);
        }

        for _ in 0..options.max_iterations {
            for u in 0..n {
                if is_stable(&ls, graph, u, options.conditional_update) {
                    ms[u] = ls[u];
                } else {
                    update_vertex(&mut acc, &mut ms[u], &ls, graph, u, options.inflation);
                }
            }
            std::mem::swap(&mut ls, &mut ms);
            pl.update_and_display();
        }

        total_time += started.elapsed();
        pl.done();
    }

    Ok(LabelRankOutput {
        membership: extract_membership(graph, &ls),
        iterations: options.max_iterations,
        time_ms: total_time.as_secs_f64() * 1000.0 / options.repeat as f64,
    })
}

/// Runs LabelRank with the per-vertex inner loop distributed across
/// `thread_pool` according to `scheduling`.
///
/// `G` must be `Sync`: the same graph reference is shared by every worker for
/// the duration of a pass.
pub fn run_parallel<G: WeightedGraph + Sync, const L: usize>(
    graph: &G,
    options: &LabelRankOptions,
    scheduling: SchedulingPolicy,
    thread_pool: &rayon::ThreadPool,
    cpl: &mut impl ConcurrentProgressLog,
) -> Result<LabelRankOutput> {
    options.validate()?;
    let n = graph.span();
    if n == 0 {
        return Ok(LabelRankOutput {
            membership: Vec::new(),
            iterations: 0,
            time_ms: 0.0,
        });
    }

    let mut ls = vec![Labelset::<L>::new(); n];
    let mut ms = vec![Labelset::<L>::new(); n];
    let mut total_time = std::time::Duration::ZERO;

    for run in 0..options.repeat {
        let started = Instant::now();

        for u in 0..n {
            ls[u] = Labelset::new();
            ms[u] = Labelset::new();
        }

        thread_pool.install(|| {
            cpl.item_name("node");
            cpl.expected_updates(Some(n));
            cpl.start(format!("Initializing ({}/{})...", run + 1, options.repeat));

            let ls_sync = ls.as_sync_slice();
            parallel_for_each_vertex(n, scheduling, cpl, |u, acc| {
                let mut tmp = Labelset::<L>::new();
                initialize_vertex(acc, &mut tmp, graph, u, options.inflation);
                // SAFETY: each vertex index is claimed by exactly one worker
                // per pass (the scheduler hands out disjoint ranges).
                unsafe { ls_sync[u].set(tmp) };
            });
            cpl.done_with_count(n);

            for iter in 0..options.max_iterations {
                cpl.start(format!(
                    "Iteration {}/{} (run {}/{})...",
                    iter + 1,
                    options.max_iterations,
                    run + 1,
                    options.repeat
                ));
                let ms_sync = ms.as_sync_slice();
                parallel_for_each_vertex(n, scheduling, cpl, |u, acc| {
                    let tmp = if is_stable(&ls, graph, u, options.conditional_update) {
                        ls[u]
                    } else {
                        let mut tmp = Labelset::<L>::new();
                        update_vertex(acc, &mut tmp, &ls, graph, u, options.inflation);
                        tmp
                    };
                    // SAFETY: see above.
                    unsafe { ms_sync[u].set(tmp) };
                });
                cpl.done_with_count(n);
                std::mem::swap(&mut ls, &mut ms);
            }
        });

        total_time += started.elapsed();
    }

    Ok(LabelRankOutput {
        membership: extract_membership(graph, &ls),
        iterations: options.max_iterations,
        time_ms: total_time.as_secs_f64() * 1000.0 / options.repeat as f64,
    })
}

/// Distributes `0..n` across the current rayon thread pool according to
/// `scheduling`, calling `body(u, acc)` once per vertex with a worker-local
/// scratch accumulator.
///
/// Must be called from inside a `thread_pool.install` closure.
fn parallel_for_each_vertex(
    n: usize,
    scheduling: SchedulingPolicy,
    cpl: &mut impl ConcurrentProgressLog,
    body: impl Fn(usize, &mut AccumulatorLabelset) + Sync,
) {
    use rayon::prelude::*;

    match scheduling {
        SchedulingPolicy::Static { chunk_size } => {
            let chunks = SchedulingPolicy::static_chunks(n, chunk_size);
            chunks.into_par_iter().for_each_init(
                || (AccumulatorLabelset::new(), cpl.clone()),
                |(acc, local_cpl), range| {
                    let len = range.len();
                    for u in range {
                        body(u, acc);
                    }
                    local_cpl.update_with_count(len);
                },
            );
        }
        SchedulingPolicy::Dynamic { chunk_size } => {
            let chunk_size = chunk_size.max(1);
            let cursor = CachePadded::new(AtomicUsize::new(0));
            rayon::broadcast(|_| {
                let mut acc = AccumulatorLabelset::new();
                let mut local_cpl = cpl.clone();
                loop {
                    let start = cursor.fetch_add(chunk_size, Ordering::Relaxed);
                    if start >= n {
                        break;
                    }
                    let end = (start + chunk_size).min(n);
                    for u in start..end {
                        body(u, &mut acc);
                    }
                    local_cpl.update_with_count(end - start);
                }
            });
        }
        SchedulingPolicy::Guided { min_chunk_size } => {
            let min_chunk_size = min_chunk_size.max(1);
            let cursor = CachePadded::new(AtomicUsize::new(0));
            let num_workers = rayon::current_num_threads().max(1);
            rayon::broadcast(|_| {
                let mut acc = AccumulatorLabelset::new();
                let mut local_cpl = cpl.clone();
                loop {
                    let start = cursor.load(Ordering::Relaxed);
                    if start >= n {
                        break;
                    }
                    let remaining = n - start;
                    let guess = (remaining / num_workers).max(min_chunk_size);
                    let len = guess.min(remaining);
                    let claimed = cursor.fetch_add(len, Ordering::Relaxed);
                    if claimed >= n {
                        break;
                    }
                    let end = (claimed + len).min(n);
                    for u in claimed..end {
                        body(u, &mut acc);
                    }
                    local_cpl.update_with_count(end - claimed);
                }
            });
        }
        SchedulingPolicy::Auto => {
            (0..n)
                .into_par_iter()
                .with_min_len(RAYON_MIN_LEN)
                .for_each_init(
                    || (AccumulatorLabelset::new(), cpl.clone()),
                    |(acc, local_cpl), u| {
                        body(u, acc);
                        local_cpl.update_with_count(1);
                    },
                );
        }
    }
}
