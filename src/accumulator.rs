/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The accumulator labelset `AL`: a per-worker scratch buffer that merges an
//! arbitrary number of neighbor labelsets before [`Labelset::copy_from`]
//! truncates the result to `L` entries.
//!
//! `AL` is dense-backed (`data: Vec<f64>` indexed by label id) but tracks
//! occupancy through `keys`, so [`AccumulatorLabelset::clear`] is O(keys),
//! not O(capacity) — the whole point of reusing one accumulator across every
//! vertex a worker visits.

use crate::labelset::Labelset;

/// A growable, dense-backed scratch buffer for combining labelsets ahead of
/// top-`L` truncation.
#[derive(Debug, Default)]
pub struct AccumulatorLabelset {
    data: Vec<f64>,
    keys: Vec<usize>,
}

impl AccumulatorLabelset {
    /// An empty accumulator with no backing storage yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True iff no key is currently tracked.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// True iff `k` has been set or accumulated into since the last
    /// [`clear`](Self::clear). O(1).
    pub fn has(&self, k: usize) -> bool {
        self.data.get(k).is_some_and(|v| *v != 0.0)
    }

    /// The current value at `k` (`0.0` if never set).
    pub fn get(&self, k: usize) -> f64 {
        self.data.get(k).copied().unwrap_or(0.0)
    }

    /// Overwrites `data[k]`, anchoring `k` in `keys` on first write.
    pub fn set(&mut self, k: usize, v: f64) {
        self.ensure_capacity(k);
        if self.data[k] == 0.0 {
            self.keys.push(k);
        }
        self.data[k] = v;
    }

    /// Adds `v` to `data[k]`, anchoring `k` in `keys` on first write.
    pub fn accumulate(&mut self, k: usize, v: f64) {
        self.ensure_capacity(k);
        if self.data[k] == 0.0 {
            self.keys.push(k);
        }
        self.data[k] += v;
    }

    fn ensure_capacity(&mut self, k: usize) {
        if k >= self.data.len() {
            self.data.resize(k + 1, 0.0);
        }
    }

    /// Resets every tracked key's value to zero, then empties `keys`. Time
    /// proportional to the number of tracked keys, not to `data`'s length.
    pub fn clear(&mut self) {
        for &k in &self.keys {
            self.data[k] = 0.0;
        }
        self.keys.clear();
    }

    /// Visits each tracked `(key, value)` pair in `keys` order.
    pub fn for_each(&self, mut f: impl FnMut(usize, f64)) {
        for &k in &self.keys {
            f(k, self.data[k]);
        }
    }

    /// Sum of all tracked values.
    pub fn sum(&self) -> f64 {
        self.keys.iter().map(|&k| self.data[k]).sum()
    }

    /// Scales every tracked value by `m`.
    pub fn multiply(&mut self, m: f64) {
        for &k in &self.keys {
            self.data[k] *= m;
        }
    }

    /// Raises every tracked value to the exponent `e`.
    pub fn pow(&mut self, e: f64) {
        for &k in &self.keys {
            self.data[k] = self.data[k].powf(e);
        }
    }

    /// Fused `v <- (v * m).powf(e)` over every tracked value.
    pub fn multiply_pow(&mut self, m: f64, e: f64) {
        for &k in &self.keys {
            self.data[k] = (self.data[k] * m).powf(e);
        }
    }

    /// Sorts `keys` by non-increasing `data[key]`, ties broken by ascending
    /// key id so that repeated calls on equal state produce the same order
    /// (needed for the determinism properties of the driver built on top of
    /// this type).
    pub fn reorder(&mut self) {
        let data = &self.data;
        self.keys
            .sort_unstable_by(|&a, &b| data[b].total_cmp(&data[a]).then_with(|| a.cmp(&b)));
    }

    /// The `i`-th key in `keys` order.
    pub fn key_at(&self, i: usize) -> usize {
        self.keys[i]
    }

    /// The `i`-th `(key, value)` pair in `keys` order.
    pub fn get_at(&self, i: usize) -> (usize, f64) {
        let k = self.keys[i];
        (k, self.data[k])
    }

    /// Adds `w * v` to `self[k]` for every occupied `(k, v)` in `x`.
    pub fn combine<const L: usize>(&mut self, x: &Labelset<L>, w: f64) {
        for (k, v) in x.iter() {
            self.accumulate(k, w * v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_only_touched_keys() {
        let mut a = AccumulatorLabelset::new();
        a.set(5, 2.0);
        a.set(1, 3.0);
        assert_eq!(a.len(), 2);
        a.clear();
        assert_eq!(a.len(), 0);
        assert_eq!(a.get(5), 0.0);
        assert_eq!(a.get(1), 0.0);
    }

    #[test]
    fn accumulate_sums_repeated_writes() {
        let mut a = AccumulatorLabelset::new();
        a.accumulate(2, 1.0);
        a.accumulate(2, 1.5);
        assert_eq!(a.get(2), 2.5);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn reorder_sorts_by_descending_value_ties_by_key() {
        let mut a = AccumulatorLabelset::new();
        a.set(3, 1.0);
        a.set(1, 2.0);
        a.set(2, 1.0);
        a.reorder();
        assert_eq!(a.key_at(0), 1);
        // ties at value 1.0 between keys 2 and 3: ascending key first
        assert_eq!(a.key_at(1), 2);
        assert_eq!(a.key_at(2), 3);
    }

    #[test]
    fn combine_accumulates_weighted_labelset() {
        let mut ls = Labelset::<4>::new();
        let mut seed = AccumulatorLabelset::new();
        seed.set(7, 1.0);
        seed.reorder();
        ls.copy_from(&seed);

        let mut acc = AccumulatorLabelset::new();
        acc.combine(&ls, 2.0);
        assert_eq!(acc.get(7), 2.0);
    }

    #[test]
    fn set_then_zero_value_does_not_panic_on_double_anchor() {
        let mut a = AccumulatorLabelset::new();
        a.set(4, 0.0);
        a.set(4, 0.0);
        // a zero write still anchors the key (spec allows this quirk)
        assert_eq!(a.len(), 2);
    }
}
