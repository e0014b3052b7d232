//! Window reducers.
//!
//! A reducer turns the active set of one window into a single aggregate.
//! Records with a NaN value still occupy the window (and are counted by
//! [`Count`] and [`Coverage`]) but never contribute to [`Mean`] or [`Sum`].
//! "No data" is reported through [`Aggregate::defined`], never as an error.

use crate::interval::Interval;
use crate::streaming::active_set::ActiveSet;

/// Result of reducing one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// The aggregate; NaN for an undefined mean, 0 for an empty sum.
    pub value: f64,
    /// False when no record contributed a value.
    pub defined: bool,
}

impl Aggregate {
    #[inline]
    pub fn defined(value: f64) -> Self {
        Self {
            value,
            defined: true,
        }
    }

    #[inline]
    pub fn undefined(value: f64) -> Self {
        Self {
            value,
            defined: false,
        }
    }
}

/// Pure aggregation over a window's active set.
pub trait Reducer<A> {
    fn reduce(&self, active: &ActiveSet<A>) -> Aggregate;
}

/// Non-NaN values sorted so that the floating-point sum does not depend on
/// the order records entered the window.
fn sorted_values<A>(active: &ActiveSet<A>) -> Vec<f64> {
    let mut values: Vec<f64> = active.values().collect();
    values.sort_unstable_by(f64::total_cmp);
    values
}

/// Arithmetic mean of non-NaN values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mean;

impl<A> Reducer<A> for Mean {
    fn reduce(&self, active: &ActiveSet<A>) -> Aggregate {
        let values = sorted_values(active);
        if values.is_empty() {
            return Aggregate::undefined(f64::NAN);
        }
        Aggregate::defined(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sum of non-NaN values.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sum;

impl<A> Reducer<A> for Sum {
    fn reduce(&self, active: &ActiveSet<A>) -> Aggregate {
        let values = sorted_values(active);
        if values.is_empty() {
            return Aggregate::undefined(0.0);
        }
        Aggregate::defined(values.iter().sum())
    }
}

/// Number of active records accepted by a predicate.
#[derive(Debug, Clone, Copy)]
pub struct Count<P> {
    predicate: P,
}

impl<P> Count<P> {
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<A> Count<fn(&Interval<A>) -> bool> {
    /// Count every record in the window.
    pub fn all() -> Self {
        let accept: fn(&Interval<A>) -> bool = |_| true;
        Count::new(accept)
    }
}

impl<A, P> Reducer<A> for Count<P>
where
    P: Fn(&Interval<A>) -> bool,
{
    fn reduce(&self, active: &ActiveSet<A>) -> Aggregate {
        let n = active.iter().filter(|r| (self.predicate)(r)).count();
        Aggregate::defined(n as f64)
    }
}

/// Number of distinct integer positions covered by the active records.
///
/// Each record covers `[floor(left), floor(right))`; overlapping records
/// are merged so every position counts once. Positions outside the window
/// are included: the union is taken over whole records.
#[derive(Debug, Default, Clone, Copy)]
pub struct Coverage;

impl<A> Reducer<A> for Coverage {
    fn reduce(&self, active: &ActiveSet<A>) -> Aggregate {
        Aggregate::defined(covered_positions(active.iter().map(|r| (r.left, r.right))) as f64)
    }
}

/// Size of the union of integer ranges, by sorting and merging runs.
///
/// Runs are measured in `i128`; the total saturates at `u64::MAX`.
pub fn covered_positions<I>(ranges: I) -> u64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut runs: Vec<(i128, i128)> = ranges
        .into_iter()
        .map(|(l, r)| (l.floor() as i128, r.floor() as i128))
        .filter(|(l, r)| r > l)
        .collect();
    if runs.is_empty() {
        return 0;
    }
    runs.sort_unstable();

    let run_len = |start: i128, end: i128| u64::try_from(end.abs_diff(start)).unwrap_or(u64::MAX);

    let mut total: u64 = 0;
    let (mut cur_start, mut cur_end) = runs[0];
    for &(start, end) in &runs[1..] {
        if start <= cur_end {
            cur_end = cur_end.max(end);
        } else {
            total = total.saturating_add(run_len(cur_start, cur_end));
            cur_start = start;
            cur_end = end;
        }
    }
    total.saturating_add(run_len(cur_start, cur_end))
}
