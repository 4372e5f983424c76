/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use dsi_progress_logger::{concurrent_progress_logger, no_logging};
use labelrank::{
    labelrank_parallel, labelrank_sequential, AdjacencyListGraph, LabelRankOptions,
    SchedulingPolicy, WeightedGraph,
};

fn ring_of_triangles() -> AdjacencyListGraph {
    // Three triangles chained by single bridge edges: enough structure and
    // enough vertices to make scheduling partitioning actually exercise more
    // than one worker per policy.
    let mut g = AdjacencyListGraph::new(9);
    for base in [0usize, 3, 6] {
        g.add_symmetric_edge(base, base + 1, 1.0);
        g.add_symmetric_edge(base + 1, base + 2, 1.0);
        g.add_symmetric_edge(base, base + 2, 1.0);
    }
    g.add_symmetric_edge(2, 3, 0.2);
    g.add_symmetric_edge(5, 6, 0.2);
    g.add_self_loops(1.0);
    g
}

fn options() -> LabelRankOptions {
    LabelRankOptions {
        repeat: 1,
        max_iterations: 10,
        inflation: 1.5,
        conditional_update: 0.5,
    }
}

/// Property 6: every scheduling policy yields the same membership as the
/// sequential driver (co-membership is compared pairwise rather than exact
/// label identity, since label *identity* is an artifact of iteration order
/// while community *partition* is the invariant the spec guarantees).
#[test]
fn scheduling_invariance_across_all_policies() {
    let g = ring_of_triangles();
    let opts = options();

    let seq = labelrank_sequential(&g, &opts, no_logging![]).unwrap();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(3)
        .build()
        .unwrap();

    for scheduling in [
        SchedulingPolicy::Static { chunk_size: 2 },
        SchedulingPolicy::Dynamic { chunk_size: 2 },
        SchedulingPolicy::Guided { min_chunk_size: 1 },
        SchedulingPolicy::Auto,
    ] {
        let mut cpl = concurrent_progress_logger![];
        let par = labelrank_parallel(&g, &opts, scheduling, &pool, &mut cpl).unwrap();

        for i in 0..g.span() {
            for j in 0..g.span() {
                assert_eq!(
                    par.membership[i] == par.membership[j],
                    seq.membership[i] == seq.membership[j],
                    "co-membership of {i},{j} differs under {scheduling:?}"
                );
            }
        }
    }
}

/// Property 9: each invalid-option kind is rejected before any driver state
/// is allocated, and is distinguishable by its error variant.
#[test]
fn invalid_options_are_rejected_with_distinct_causes() {
    use labelrank::OptionsError;

    let g = ring_of_triangles();

    let mut bad = options();
    bad.repeat = 0;
    let err = bad.validate().unwrap_err();
    assert!(matches!(err, OptionsError::NonPositiveRepeat { repeat: 0 }));

    let mut bad = options();
    bad.inflation = 0.0;
    let err = bad.validate().unwrap_err();
    assert!(matches!(err, OptionsError::NonPositiveInflation { .. }));

    let mut bad = options();
    bad.conditional_update = 1.1;
    let err = bad.validate().unwrap_err();
    assert!(matches!(
        err,
        OptionsError::ConditionalUpdateOutOfRange { .. }
    ));

    // the top-level entry point surfaces the same rejection as an anyhow error
    assert!(labelrank_sequential(&g, &bad, no_logging![]).is_err());
}
