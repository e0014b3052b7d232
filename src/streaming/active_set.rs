//! The two record buffers owned by the window state.
//!
//! - [`ActiveSet`]: records overlapping the current window, in insertion order.
//! - [`Lookahead`]: records pulled from the source but not yet resolved, in
//!   source order.
//!
//! Records move between them by value; neither buffer ever aliases the
//! other. Both track their peak occupancy for run statistics.

use crate::interval::Interval;
use std::collections::VecDeque;

/// Records currently considered inside the window.
#[derive(Debug)]
pub struct ActiveSet<A = ()> {
    records: VecDeque<Interval<A>>,
    max_active: usize,
}

impl<A> Default for ActiveSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> ActiveSet<A> {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            max_active: 0,
        }
    }

    /// Append a record, keeping insertion order.
    #[inline]
    pub fn push(&mut self, record: Interval<A>) {
        self.records.push_back(record);
        if self.records.len() > self.max_active {
            self.max_active = self.records.len();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Keep only records for which `keep` returns true.
    ///
    /// Returns the number of records removed.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&Interval<A>) -> bool,
    {
        let before = self.records.len();
        self.records.retain(keep);
        before - self.records.len()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval<A>> {
        self.records.iter()
    }

    /// Values of records that carry data (NaN filtered out).
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().filter(|r| r.has_value()).map(|r| r.value)
    }

    #[inline]
    pub fn front(&self) -> Option<&Interval<A>> {
        self.records.front()
    }

    /// Get the maximum active size observed.
    pub fn max_active(&self) -> usize {
        self.max_active
    }
}

impl<A> FromIterator<Interval<A>> for ActiveSet<A> {
    fn from_iter<I: IntoIterator<Item = Interval<A>>>(iter: I) -> Self {
        let mut set = ActiveSet::new();
        for record in iter {
            set.push(record);
        }
        set
    }
}

impl<'a, A> IntoIterator for &'a ActiveSet<A> {
    type Item = &'a Interval<A>;
    type IntoIter = std::collections::vec_deque::Iter<'a, Interval<A>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Records pulled ahead of the window.
#[derive(Debug)]
pub struct Lookahead<A = ()> {
    records: VecDeque<Interval<A>>,
    max_len: usize,
}

impl<A> Default for Lookahead<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Lookahead<A> {
    pub fn new() -> Self {
        Self {
            records: VecDeque::with_capacity(16),
            max_len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, record: Interval<A>) {
        self.records.push_back(record);
        if self.records.len() > self.max_len {
            self.max_len = self.records.len();
        }
    }

    /// Remove the oldest record if `take` accepts it.
    #[inline]
    pub fn pop_front_if<F>(&mut self, take: F) -> Option<Interval<A>>
    where
        F: FnOnce(&Interval<A>) -> bool,
    {
        if take(self.records.front()?) {
            self.records.pop_front()
        } else {
            None
        }
    }

    #[inline]
    pub fn front(&self) -> Option<&Interval<A>> {
        self.records.front()
    }

    #[inline]
    pub fn back(&self) -> Option<&Interval<A>> {
        self.records.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interval<A>> {
        self.records.iter()
    }

    /// Get the maximum buffered size observed.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(left: f64, right: f64, value: f64) -> Interval {
        Interval::new("chr1", left, right, value)
    }

    #[test]
    fn test_active_set_basic() {
        let mut set = ActiveSet::new();
        set.push(iv(0.0, 1.0, 1.0));
        set.push(iv(1.0, 2.0, 2.0));
        set.push(iv(2.0, 3.0, 3.0));

        assert_eq!(set.len(), 3);
        assert_eq!(set.front().map(|r| r.left), Some(0.0));
        assert_eq!(set.max_active(), 3);
    }

    #[test]
    fn test_active_set_retain_preserves_order() {
        let mut set: ActiveSet = (0..6).map(|i| iv(i as f64, i as f64 + 1.0, 0.0)).collect();
        let removed = set.retain(|r| r.left as i64 % 2 == 1);
        assert_eq!(removed, 3);
        let lefts: Vec<f64> = set.iter().map(|r| r.left).collect();
        assert_eq!(lefts, vec![1.0, 3.0, 5.0]);
        // Peak occupancy survives removals
        assert_eq!(set.max_active(), 6);
    }

    #[test]
    fn test_active_set_values_skip_nan() {
        let set: ActiveSet = vec![iv(0.0, 1.0, 2.0), iv(0.0, 1.0, f64::NAN), iv(0.0, 1.0, 4.0)]
            .into_iter()
            .collect();
        let values: Vec<f64> = set.values().collect();
        assert_eq!(values, vec![2.0, 4.0]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_active_set_clear() {
        let mut set = ActiveSet::new();
        set.push(iv(0.0, 1.0, 1.0));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_lookahead_pop_front_if() {
        let mut buf = Lookahead::new();
        buf.push(iv(0.0, 1.0, 1.0));
        buf.push(iv(5.0, 6.0, 1.0));

        assert!(buf.pop_front_if(|r| r.left > 3.0).is_none());
        assert_eq!(buf.len(), 2);

        let taken = buf.pop_front_if(|r| r.left < 3.0).unwrap();
        assert_eq!(taken.left, 0.0);
        assert_eq!(buf.front().map(|r| r.left), Some(5.0));
        assert_eq!(buf.back().map(|r| r.left), Some(5.0));
        assert_eq!(buf.max_len(), 2);
    }

    #[test]
    fn test_lookahead_pop_front_if_empty() {
        let mut buf: Lookahead = Lookahead::new();
        assert!(buf.pop_front_if(|_| true).is_none());
    }
}
