//! Command implementations for slide.
//!
//! Every windowed command reads one sorted stream, slides a fixed-size
//! window along each chromosome and prints one aggregate line per window.
//! They differ only in the input format and the reducer, so all of them
//! share [`drive_windows`].

pub mod chain;
pub mod gff_count;
pub mod gff_covered;
pub mod point_windows;
pub mod sliding_mean;
pub mod sliding_sum;

pub use chain::ChainCommand;
pub use gff_count::GffCountCommand;
pub use gff_covered::GffCoveredCommand;
pub use point_windows::{PointMeanCommand, SyncSumCommand};
pub use sliding_mean::SlidingMeanCommand;
pub use sliding_sum::SlidingSumCommand;

use crate::bed::Result;
use crate::config::WindowConfig;
use crate::reducer::Reducer;
use crate::source::{IntervalSource, Validated};
use crate::streaming::engine::{WindowStats, WindowingEngine};
use crate::streaming::output::WindowWriter;
use log::debug;
use std::io::Write;

/// Run the engine over `source` and write one line per window.
///
/// When `validate` is set the source is checked for sort order as it is
/// read, and the first violation ends the run with
/// [`SlideError::Unsorted`](crate::bed::SlideError::Unsorted).
pub fn drive_windows<S, R, W>(
    source: S,
    config: WindowConfig,
    reducer: &R,
    output: W,
    validate: bool,
) -> Result<WindowStats>
where
    S: IntervalSource,
    R: Reducer<S::Aux>,
    W: Write,
{
    let mut engine = WindowingEngine::new(Validated::new(source, validate), config);
    let mut writer = WindowWriter::new(output);

    while engine.step()? {
        let agg = reducer.reduce(engine.active());
        writer.write_window(engine.chrom(), engine.left(), engine.right(), agg)?;
    }
    writer.flush()?;

    let stats = engine.stats();
    debug!("{}", stats);
    Ok(stats)
}
