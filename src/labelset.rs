/*
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The bounded, fixed-capacity labelset `LS<L>`.
//!
//! A [`Labelset`] holds at most `L` `(label, probability)` pairs, occupied
//! slots first and sorted by non-increasing probability. It never grows past
//! `L`: the only way entries enter a labelset is [`Labelset::copy_from`],
//! which truncates an [`AccumulatorLabelset`](crate::accumulator::AccumulatorLabelset)
//! down to its `L` heaviest entries.
//!
//! Vertex id `0` is a legitimate label, so it cannot double as the
//! empty-slot sentinel. Internally every occupied label is stored as `id +
//! 1`; `0` then unambiguously marks an unused slot. Callers never see the
//! offset — [`Labelset::label`] and [`Labelset::iter`] undo it.

use crate::accumulator::AccumulatorLabelset;

/// A fixed-capacity, probability-sorted set of up to `L` community labels for
/// one vertex.
#[derive(Debug, Clone, Copy)]
pub struct Labelset<const L: usize> {
    // (label + 1, probability); label+1 == 0 marks an unused slot.
    slots: [(usize, f64); L],
}

impl<const L: usize> Default for Labelset<L> {
    fn default() -> Self {
        Self {
            slots: [(0, 0.0); L],
        }
    }
}

impl<const L: usize> Labelset<L> {
    /// An empty labelset (no occupied slots).
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn size(&self) -> usize {
        self.slots.iter().take_while(|(k, _)| *k != 0).count()
    }

    /// True iff some occupied slot holds label `k`.
    pub fn has(&self, k: usize) -> bool {
        let enc = k + 1;
        self.slots
            .iter()
            .take_while(|(s, _)| *s != 0)
            .any(|(s, _)| *s == enc)
    }

    /// Sum of probabilities of occupied slots.
    pub fn sum(&self) -> f64 {
        self.slots
            .iter()
            .take_while(|(k, _)| *k != 0)
            .map(|(_, v)| v)
            .sum()
    }

    /// Scales every occupied slot's probability by `m`.
    pub fn multiply(&mut self, m: f64) {
        for (k, v) in self.slots.iter_mut() {
            if *k == 0 {
                break;
            }
            *v *= m;
        }
    }

    /// Raises every occupied probability to the exponent `e`.
    pub fn pow(&mut self, e: f64) {
        for (k, v) in self.slots.iter_mut() {
            if *k == 0 {
                break;
            }
            *v = v.powf(e);
        }
    }

    /// Fused `v <- (v * m).powf(e)`: normalize then inflate in one pass.
    pub fn multiply_pow(&mut self, m: f64, e: f64) {
        for (k, v) in self.slots.iter_mut() {
            if *k == 0 {
                break;
            }
            *v = (*v * m).powf(e);
        }
    }

    /// Number of labels present in both `self` and `other`.
    pub fn match_count(&self, other: &Self) -> usize {
        self.occupied().filter(|(k, _)| other.has(*k)).count()
    }

    /// Sum of `self`'s probabilities restricted to labels also present in
    /// `other`.
    pub fn match_value(&self, other: &Self) -> f64 {
        self.occupied()
            .filter(|(k, _)| other.has(*k))
            .map(|(_, v)| v)
            .sum()
    }

    /// True iff every occupied label in `self` is present in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.occupied().all(|(k, _)| other.has(k))
    }

    /// The label with the highest probability, if any slot is occupied.
    pub fn best(&self) -> Option<usize> {
        let (k, _) = self.slots[0];
        (k != 0).then(|| k - 1)
    }

    /// Iterates the occupied `(label, probability)` pairs in slot order
    /// (non-increasing probability).
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.occupied()
    }

    fn occupied(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.slots
            .iter()
            .take_while(|(k, _)| *k != 0)
            .map(|(k, v)| (*k - 1, *v))
    }

    /// Writes the top `min(L, acc.len())` entries of `acc` (already sorted by
    /// non-increasing value, see [`AccumulatorLabelset::reorder`]) into
    /// `self`, zero-filling the remaining slots. This is the only place
    /// truncation from arbitrary width to `L` occurs.
    pub fn copy_from(&mut self, acc: &AccumulatorLabelset) {
        let m = L.min(acc.len());
        for i in 0..m {
            let (k, v) = acc.get_at(i);
            self.slots[i] = (k + 1, v);
        }
        for slot in self.slots.iter_mut().skip(m) {
            *slot = (0, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::AccumulatorLabelset;

    fn filled(pairs: &[(usize, f64)]) -> Labelset<4> {
        let mut acc = AccumulatorLabelset::new();
        for &(k, v) in pairs {
            acc.set(k, v);
        }
        acc.reorder();
        let mut ls = Labelset::<4>::new();
        ls.copy_from(&acc);
        ls
    }

    #[test]
    fn empty_labelset_has_zero_size() {
        let ls = Labelset::<4>::new();
        assert_eq!(ls.size(), 0);
        assert_eq!(ls.best(), None);
    }

    #[test]
    fn copy_from_truncates_to_capacity_and_sorts() {
        let ls = filled(&[(1, 0.1), (2, 0.5), (3, 0.2), (4, 0.05), (5, 0.9)]);
        assert_eq!(ls.size(), 4);
        let values: Vec<_> = ls.iter().map(|(_, v)| v).collect();
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(ls.best(), Some(5));
        // label 4 (lowest value) was dropped by truncation
        assert!(!ls.has(4));
    }

    #[test]
    fn has_and_is_subset() {
        let a = filled(&[(0, 1.0), (1, 0.5)]);
        let b = filled(&[(0, 1.0), (1, 0.5), (2, 0.1)]);
        assert!(a.has(0));
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
    }

    #[test]
    fn match_count_and_value() {
        let a = filled(&[(0, 0.6), (1, 0.4)]);
        let b = filled(&[(1, 0.9), (2, 0.1)]);
        assert_eq!(a.match_count(&b), 1);
        assert_eq!(a.match_value(&b), 0.4);
    }

    #[test]
    fn multiply_pow_matches_sequential_multiply_then_pow() {
        let mut a = filled(&[(0, 0.5), (1, 0.25)]);
        let mut b = a;
        a.multiply_pow(2.0, 3.0);
        b.multiply(2.0);
        b.pow(3.0);
        for ((_, va), (_, vb)) in a.iter().zip(b.iter()) {
            assert!((va - vb).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_label_is_a_legitimate_occupant() {
        let ls = filled(&[(0, 1.0)]);
        assert!(ls.has(0));
        assert_eq!(ls.best(), Some(0));
    }
}
