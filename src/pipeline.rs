//! Concurrent record pipelines.
//!
//! Each stage runs on its own scoped thread and hands records downstream
//! through a bounded crossbeam channel, so a slow consumer applies
//! backpressure instead of letting queues grow. Every queue has one
//! producer and one consumer and preserves order.
//!
//! A producer that fails sends its error downstream as an `Err` item and
//! stops; the consumer returns it from the run. A consumer that hangs up
//! makes every upstream `send` fail, which stops the producers in turn.
//!
//! ```text
//! reader ──► filter ──► window engine ──► map ──► writer (caller's thread)
//! ```

use crate::bed::{Result, SlideError};
use crate::config::WindowConfig;
use crate::interval::Interval;
use crate::reducer::{Aggregate, Reducer};
use crate::source::IntervalSource;
use crate::streaming::engine::{WindowStats, WindowingEngine};
use crossbeam_channel::{bounded, Receiver};
use log::debug;
use std::thread::{Scope, ScopedJoinHandle};

/// Receiving end of a stage's output queue.
pub type StageReceiver<A> = Receiver<Result<Interval<A>>>;

/// Pure per-record value transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    /// `|v|`
    Abs,
    /// `log10(v)`; NaN for negative input, `-inf` for zero.
    Log10,
}

impl Filter {
    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Filter::Abs => value.abs(),
            Filter::Log10 => value.log10(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Filter::Abs => "abs",
            Filter::Log10 => "log10",
        }
    }
}

/// Handle to a running stage thread.
pub struct StageHandle<'scope, T> {
    name: &'static str,
    handle: ScopedJoinHandle<'scope, T>,
}

impl<T> StageHandle<'_, T> {
    /// Wait for the stage to finish. A panicked stage becomes
    /// [`SlideError::Pipeline`].
    pub fn join(self) -> Result<T> {
        self.handle
            .join()
            .map_err(|_| SlideError::Pipeline(format!("{} stage panicked", self.name)))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Pull records from `source` on a new thread.
///
/// The stage's result is the number of records forwarded.
pub fn spawn_source_stage<'scope, 'env, S>(
    scope: &'scope Scope<'scope, 'env>,
    mut source: S,
    capacity: usize,
) -> (StageReceiver<S::Aux>, StageHandle<'scope, usize>)
where
    S: IntervalSource + Send + 'scope,
    S::Aux: Send + 'scope,
{
    let (tx, rx) = bounded(capacity);
    let handle = scope.spawn(move || {
        let mut sent = 0;
        loop {
            let item = match source.next_interval() {
                Ok(Some(record)) => Ok(record),
                Ok(None) => break,
                Err(e) => Err(e),
            };
            let failed = item.is_err();
            if tx.send(item).is_err() {
                debug!("source stage: consumer hung up after {} records", sent);
                break;
            }
            if failed {
                break;
            }
            sent += 1;
        }
        sent
    });
    (rx, StageHandle { name: "source", handle })
}

/// Transform every record of `input` on a new thread.
///
/// Errors pass through unchanged and end the stage. The stage's result is
/// the number of records transformed.
pub fn spawn_map_stage<'scope, 'env, A, B, F>(
    scope: &'scope Scope<'scope, 'env>,
    name: &'static str,
    input: StageReceiver<A>,
    mut f: F,
    capacity: usize,
) -> (StageReceiver<B>, StageHandle<'scope, usize>)
where
    A: Send + 'scope,
    B: Send + 'scope,
    F: FnMut(Interval<A>) -> Interval<B> + Send + 'scope,
{
    let (tx, rx) = bounded(capacity);
    let handle = scope.spawn(move || {
        let mut mapped = 0;
        for item in input {
            let out = item.map(&mut f);
            let failed = out.is_err();
            if tx.send(out).is_err() {
                debug!("{} stage: consumer hung up after {} records", name, mapped);
                break;
            }
            if failed {
                break;
            }
            mapped += 1;
        }
        mapped
    });
    (rx, StageHandle { name, handle })
}

/// Apply a [`Filter`] to each record's value on a new thread.
pub fn spawn_filter_stage<'scope, 'env, A>(
    scope: &'scope Scope<'scope, 'env>,
    input: StageReceiver<A>,
    filter: Filter,
    capacity: usize,
) -> (StageReceiver<A>, StageHandle<'scope, usize>)
where
    A: Send + 'scope,
{
    spawn_map_stage(
        scope,
        filter.name(),
        input,
        move |record: Interval<A>| record.map_value(|v| filter.apply(v)),
        capacity,
    )
}

/// Run the windowing engine over `source` on a new thread.
///
/// Each window is sent downstream as an interval spanning the window, with
/// the aggregate as both value and payload. The stage's result is the
/// engine's run statistics.
pub fn spawn_window_stage<'scope, 'env, S, R>(
    scope: &'scope Scope<'scope, 'env>,
    source: S,
    config: WindowConfig,
    reducer: R,
    capacity: usize,
) -> (StageReceiver<Aggregate>, StageHandle<'scope, WindowStats>)
where
    S: IntervalSource + Send + 'scope,
    R: Reducer<S::Aux> + Send + 'scope,
{
    let (tx, rx) = bounded(capacity);
    let handle = scope.spawn(move || {
        let mut engine = WindowingEngine::new(source, config);
        loop {
            match engine.step() {
                Ok(true) => {
                    let agg = reducer.reduce(engine.active());
                    let window = engine.window().to_interval(agg.value, agg);
                    if tx.send(Ok(window)).is_err() {
                        debug!("window stage: consumer hung up");
                        break;
                    }
                }
                Ok(false) => break,
                Err(e) => {
                    // Ignore a send failure: the consumer is already gone.
                    let _ = tx.send(Err(e));
                    break;
                }
            }
        }
        engine.stats()
    });
    (rx, StageHandle { name: "window", handle })
}
