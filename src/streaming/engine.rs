//! Sliding-window engine with O(k) memory.
//!
//! Drives a [`WindowState`] across each chromosome of a sorted
//! [`IntervalSource`] in a single forward pass. Each call to
//! [`WindowingEngine::step`] positions the window, pulls just enough records
//! to know every record overlapping it, and leaves the active set ready for
//! a reducer.
//!
//! # Memory Complexity
//!
//! O(k) where k = records overlapping the window, plus at most one buffered
//! record beyond the window per chromosome boundary.
//!
//! # Termination
//!
//! A chromosome's last window is the first one whose lookahead fill ran
//! into the end of that chromosome (source exhausted, or the next
//! chromosome's first record pulled) and after which none of its records
//! remain in lookahead. With unit records `[0,1) .. [4,5)`, size 2 and step
//! 1 this yields exactly `[0,2) [1,3) [2,4) [3,5)`. An empty source yields
//! no windows.

use crate::bed::Result;
use crate::config::WindowConfig;
use crate::interval::Interval;
use crate::source::IntervalSource;
use crate::streaming::active_set::ActiveSet;
use crate::streaming::window::WindowState;
use log::debug;
use std::fmt;

/// Read-only view of one window position.
#[derive(Debug)]
pub struct Window<'a, A = ()> {
    pub chrom: &'a str,
    pub left: f64,
    pub right: f64,
    pub active: &'a ActiveSet<A>,
}

pub struct WindowingEngine<S: IntervalSource> {
    source: S,
    state: WindowState<S::Aux>,
    exhausted: bool,
    /// The window last exposed was the final one of its chromosome.
    chrom_done: bool,
    started: bool,
    finished: bool,
    stats: WindowStats,
}

impl<S: IntervalSource> WindowingEngine<S> {
    pub fn new(source: S, config: WindowConfig) -> Self {
        Self {
            source,
            state: WindowState::new(config),
            exhausted: false,
            chrom_done: false,
            started: false,
            finished: false,
            stats: WindowStats::default(),
        }
    }

    /// Advance to the next window.
    ///
    /// Returns `Ok(true)` when a window is ready to be read through the
    /// accessors, `Ok(false)` once every chromosome has been covered. Errors
    /// from the source are returned unchanged and leave the engine unusable.
    pub fn step(&mut self) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }

        if self.started && !self.chrom_done {
            self.state.advance();
        } else if !self.begin_next_chrom()? {
            self.finished = true;
            debug!("windowing finished: {}", self.stats);
            return Ok(false);
        }

        self.fill()?;
        // Evict first so the active set's peak is the largest window seen.
        self.state.evict();
        self.state.promote();

        // No more records of this chromosome can arrive once something past
        // it has been pulled (or the source ran dry), so the chromosome ends
        // here if nothing of it is left waiting.
        self.chrom_done = self.state.chrom_drained()
            && (self.exhausted || self.state.lookahead().back().is_some());

        self.stats.windows += 1;
        Ok(true)
    }

    /// Reset the window onto the chromosome of the next buffered record.
    fn begin_next_chrom(&mut self) -> Result<bool> {
        if self.state.lookahead().is_empty() && !self.exhausted {
            self.pull()?;
        }
        let Some(chrom) = self.state.next_chrom().map(str::to_owned) else {
            return Ok(false);
        };
        debug!("starting chromosome {}", chrom);
        self.state.start_chrom(&chrom);
        self.started = true;
        self.chrom_done = false;
        self.stats.chromosomes += 1;
        Ok(true)
    }

    /// Pull records until one lands beyond the window or the source ends.
    fn fill(&mut self) -> Result<()> {
        while !self.exhausted && self.state.wants_more() {
            self.pull()?;
        }
        Ok(())
    }

    fn pull(&mut self) -> Result<()> {
        match self.source.next_interval()? {
            Some(record) => {
                self.stats.records += 1;
                self.state.buffer(record);
            }
            None => self.exhausted = true,
        }
        Ok(())
    }

    /// Chromosome of the current window.
    #[inline]
    pub fn chrom(&self) -> &str {
        self.state.chrom()
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.state.left()
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.state.right()
    }

    /// Records overlapping the current window.
    #[inline]
    pub fn active(&self) -> &ActiveSet<S::Aux> {
        self.state.active()
    }

    pub fn window(&self) -> Window<'_, S::Aux> {
        Window {
            chrom: self.state.chrom(),
            left: self.state.left(),
            right: self.state.right(),
            active: self.state.active(),
        }
    }

    pub fn state(&self) -> &WindowState<S::Aux> {
        &self.state
    }

    /// Run statistics so far.
    pub fn stats(&self) -> WindowStats {
        WindowStats {
            max_active: self.state.active().max_active(),
            max_lookahead: self.state.lookahead().max_len(),
            retired: self.state.retired(),
            ..self.stats
        }
    }

    /// Run to completion, mapping every window through `f`.
    pub fn collect_windows<T, F>(mut self, mut f: F) -> Result<Vec<T>>
    where
        F: FnMut(&Window<'_, S::Aux>) -> T,
    {
        let mut out = Vec::new();
        while self.step()? {
            out.push(f(&self.window()));
        }
        Ok(out)
    }
}

impl<A> Window<'_, A> {
    /// The window as an interval carrying `value` and `aux`.
    pub fn to_interval<B>(&self, value: f64, aux: B) -> Interval<B> {
        Interval::with_aux(self.chrom, self.left, self.right, value, aux)
    }
}

/// Statistics from a windowing run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WindowStats {
    pub records: usize,
    pub windows: usize,
    pub chromosomes: usize,
    pub max_active: usize,
    pub max_lookahead: usize,
    pub retired: usize,
}

impl fmt::Display for WindowStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Records: {}, Windows: {}, Chromosomes: {}, Max active: {}, Max lookahead: {}, Retired: {}",
            self.records,
            self.windows,
            self.chromosomes,
            self.max_active,
            self.max_lookahead,
            self.retired
        )
    }
}
