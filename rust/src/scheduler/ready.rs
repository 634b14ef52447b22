//! Ready-set selection keyed by a policy-specific ordering.

use std::collections::BTreeSet;

use crate::models::Ticks;

/// Arrived, unfinished processes ordered by `(key, index)`.
///
/// Including the working index in the ordering makes the lowest list index win
/// every tie, matching a front-to-back linear scan. Processes are admitted as the
/// clock passes their arrival time, in `(arrival, index)` order.
pub(crate) struct ReadySet<K: Ord + Copy> {
    ready: BTreeSet<(K, usize)>,
    /// Indices sorted by (arrival, index); `cursor` marks the first not yet admitted.
    pending: Vec<(Ticks, usize)>,
    cursor: usize,
}

impl<K: Ord + Copy> ReadySet<K> {
    pub fn new(arrivals: &[Ticks]) -> Self {
        let mut pending: Vec<(Ticks, usize)> =
            arrivals.iter().copied().enumerate().map(|(i, a)| (a, i)).collect();
        pending.sort_unstable();
        Self {
            ready: BTreeSet::new(),
            pending,
            cursor: 0,
        }
    }

    /// Admit every process that has arrived by `clock`. Returns the number admitted.
    pub fn admit(&mut self, clock: Ticks, key: impl Fn(usize) -> K) -> usize {
        let start = self.cursor;
        let newly_arrived = self.pending[self.cursor..].partition_point(|&(a, _)| a <= clock);
        for &(_, i) in &self.pending[start..start + newly_arrived] {
            self.ready.insert((key(i), i));
        }
        self.cursor += newly_arrived;
        newly_arrived
    }

    /// Remove and return the best ready index.
    pub fn pop_min(&mut self) -> Option<usize> {
        self.ready.pop_first().map(|(_, i)| i)
    }

    /// Best ready index and its key, without removing it.
    pub fn peek_min(&self) -> Option<(K, usize)> {
        self.ready.first().copied()
    }

    /// Change the key of a ready index, or drop it when `new_key` is `None`.
    pub fn rekey(&mut self, i: usize, old_key: K, new_key: Option<K>) {
        self.ready.remove(&(old_key, i));
        if let Some(k) = new_key {
            self.ready.insert((k, i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admits_only_arrived() {
        let mut set: ReadySet<Ticks> = ReadySet::new(&[0, 5, 2]);
        assert_eq!(set.admit(1, |i| i as Ticks), 1);
        assert_eq!(set.admit(4, |i| i as Ticks), 1);
        assert_eq!(set.admit(4, |i| i as Ticks), 0);
        assert_eq!(set.pop_min(), Some(0));
        assert_eq!(set.pop_min(), Some(2));
        assert_eq!(set.pop_min(), None);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let keys = [3, 1, 1, 2];
        let mut set: ReadySet<i32> = ReadySet::new(&[0, 0, 0, 0]);
        set.admit(0, |i| keys[i]);
        assert_eq!(set.pop_min(), Some(1));
        assert_eq!(set.pop_min(), Some(2));
        assert_eq!(set.pop_min(), Some(3));
        assert_eq!(set.pop_min(), Some(0));
    }

    #[test]
    fn test_rekey_updates_order() {
        let mut set: ReadySet<Ticks> = ReadySet::new(&[0, 0]);
        set.admit(0, |i| [4, 3][i]);
        assert_eq!(set.peek_min(), Some((3, 1)));
        set.rekey(1, 3, Some(5));
        assert_eq!(set.peek_min(), Some((4, 0)));
        set.rekey(0, 4, None);
        assert_eq!(set.peek_min(), Some((5, 1)));
    }
}
