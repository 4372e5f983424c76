/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! How the parallel driver partitions the vertex range across worker
//! threads.

/// The minimum chunk length below which rayon is allowed to split further at
/// its own discretion, mirroring the `RAYON_MIN_LEN` convention used
/// elsewhere in this lineage for node-granularity parallel loops.
pub(crate) const RAYON_MIN_LEN: usize = 1024;

/// Distribution policy for the parallel vertex pass.
///
/// All four variants visit every vertex in `0..n` exactly once per pass; they
/// differ only in how the range is sliced across workers, which never
/// affects the numeric result (see the scheduling-invariance property) but
/// does affect load balance and cache locality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchedulingPolicy {
    /// Chunks of `chunk_size` vertices assigned round-robin up front, one
    /// rayon task per chunk.
    Static { chunk_size: usize },
    /// Workers pull the next `chunk_size`-vertex chunk on demand from a
    /// shared cursor.
    Dynamic { chunk_size: usize },
    /// Like [`Dynamic`](Self::Dynamic), but the chunk size shrinks as the
    /// remaining range shrinks, down to a floor of `min_chunk_size`.
    Guided { min_chunk_size: usize },
    /// Delegates to rayon's own work-stealing split, with no explicit chunk
    /// size beyond [`RAYON_MIN_LEN`].
    Auto,
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self::Auto
    }
}

impl SchedulingPolicy {
    /// Splits `0..n` into fixed-size ranges for [`Static`](Self::Static)
    /// scheduling (and as the initial guess for [`Guided`](Self::Guided)).
    pub(crate) fn static_chunks(n: usize, chunk_size: usize) -> Vec<std::ops::Range<usize>> {
        let chunk_size = chunk_size.max(1);
        let mut chunks = Vec::with_capacity(n.div_ceil(chunk_size));
        let mut start = 0;
        while start < n {
            let end = (start + chunk_size).min(n);
            chunks.push(start..end);
            start = end;
        }
        chunks
    }
}
