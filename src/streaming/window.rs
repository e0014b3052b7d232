//! Window state: the current chromosome, window bounds, and the two record
//! buffers.
//!
//! Bounds are derived from a step counter (`left = index * step`) rather
//! than accumulated, so non-integral steps do not drift.

use crate::config::WindowConfig;
use crate::interval::Interval;
use crate::streaming::active_set::{ActiveSet, Lookahead};
use log::trace;

#[derive(Debug)]
pub struct WindowState<A = ()> {
    config: WindowConfig,
    chrom: String,
    index: u64,
    left: f64,
    right: f64,
    active: ActiveSet<A>,
    lookahead: Lookahead<A>,
    retired: usize,
}

impl<A> WindowState<A> {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            chrom: String::new(),
            index: 0,
            left: 0.0,
            right: config.size,
            active: ActiveSet::new(),
            lookahead: Lookahead::new(),
            retired: 0,
        }
    }

    /// Move the window to `[0, size)` on a new chromosome.
    pub fn start_chrom(&mut self, chrom: &str) {
        self.chrom.clear();
        self.chrom.push_str(chrom);
        self.index = 0;
        self.update_bounds();
    }

    /// Shift the window right by one step.
    pub fn advance(&mut self) {
        self.index += 1;
        self.update_bounds();
    }

    #[inline]
    fn update_bounds(&mut self) {
        self.left = self.index as f64 * self.config.step;
        self.right = self.left + self.config.size;
    }

    /// Buffer a freshly pulled record.
    #[inline]
    pub fn buffer(&mut self, record: Interval<A>) {
        self.lookahead.push(record);
    }

    /// True while the newest buffered record could still overlap this window,
    /// i.e. the fill has not yet seen a record beyond it.
    pub fn wants_more(&self) -> bool {
        match self.lookahead.back() {
            None => true,
            Some(rec) => rec.chrom == self.chrom && !rec.is_ahead(self.right),
        }
    }

    /// Move lookahead records that intersect the window into the active set.
    ///
    /// Records of the current chromosome that can no longer intersect any
    /// window (behind it, or zero-length) are dropped. Records ahead of the
    /// window or on another chromosome stay buffered. Returns the number of
    /// records promoted.
    pub fn promote(&mut self) -> usize {
        let (chrom, left, right) = (&self.chrom, self.left, self.right);
        let mut promoted = 0;
        while let Some(record) = self
            .lookahead
            .pop_front_if(|r| r.chrom == *chrom && !r.is_ahead(right))
        {
            if record.intersects(left, right) {
                self.active.push(record);
                promoted += 1;
            } else {
                trace!(
                    "retiring {}:{}-{} outside window {}-{}",
                    record.chrom,
                    record.left,
                    record.right,
                    left,
                    right
                );
                self.retired += 1;
            }
        }
        promoted
    }

    /// Remove active records that no longer intersect the window or belong
    /// to another chromosome. Returns the number evicted.
    pub fn evict(&mut self) -> usize {
        let (chrom, left, right) = (&self.chrom, self.left, self.right);
        self.active
            .retain(|r| r.chrom == *chrom && r.intersects(left, right))
    }

    /// True when no record of the current chromosome is waiting in lookahead.
    pub fn chrom_drained(&self) -> bool {
        self.lookahead
            .front()
            .is_none_or(|r| r.chrom != self.chrom)
    }

    /// Chromosome of the oldest buffered record.
    pub fn next_chrom(&self) -> Option<&str> {
        self.lookahead.front().map(|r| r.chrom.as_str())
    }

    #[inline]
    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.right
    }

    /// Zero-based position of the window on its chromosome.
    #[inline]
    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn config(&self) -> WindowConfig {
        self.config
    }

    pub fn active(&self) -> &ActiveSet<A> {
        &self.active
    }

    pub fn lookahead(&self) -> &Lookahead<A> {
        &self.lookahead
    }

    /// Records dropped without ever entering a window.
    pub fn retired(&self) -> usize {
        self.retired
    }
}
