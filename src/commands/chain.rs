//! Chained pipeline: `|value|` → sliding mean → `log10(mean)`.
//!
//! Reading, the absolute-value filter, the windowing engine and the log10
//! transform each run on their own thread, joined by bounded queues. The
//! caller's thread only formats output. Lines are
//! `chrom left right mean log10(mean)`.

use crate::bed::{BedReader, Result};
use crate::config::WindowConfig;
use crate::interval::Interval;
use crate::pipeline::{
    spawn_filter_stage, spawn_map_stage, spawn_source_stage, spawn_window_stage, Filter,
};
use crate::reducer::{Aggregate, Mean};
use crate::source::{ChannelSource, Validated};
use crate::streaming::buffers::STAGE_QUEUE_CAPACITY;
use crate::streaming::engine::WindowStats;
use crate::streaming::output::WindowWriter;
use log::debug;
use std::io::{Read, Write};
use std::thread;

/// Chained derivative command configuration.
#[derive(Debug, Clone)]
pub struct ChainCommand {
    pub config: WindowConfig,
    /// Skip inline sort validation
    pub assume_sorted: bool,
    /// Capacity of each inter-stage queue
    pub queue_capacity: usize,
}

impl ChainCommand {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            assume_sorted: false,
            queue_capacity: STAGE_QUEUE_CAPACITY,
        }
    }

    pub fn with_assume_sorted(mut self, assume_sorted: bool) -> Self {
        self.assume_sorted = assume_sorted;
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn run<R: Read + Send, W: Write>(&self, input: R, output: W) -> Result<WindowStats> {
        let capacity = self.queue_capacity;
        let source = Validated::new(BedReader::new(input), !self.assume_sorted);

        thread::scope(|scope| -> Result<WindowStats> {
            let (records, reader) = spawn_source_stage(scope, source, capacity);
            let (absolute, abs) = spawn_filter_stage(scope, records, Filter::Abs, capacity);
            let (windows, engine) = spawn_window_stage(
                scope,
                ChannelSource::new(absolute),
                self.config,
                Mean,
                capacity,
            );
            let (logged, log10) = spawn_map_stage(
                scope,
                Filter::Log10.name(),
                windows,
                |window: Interval<Aggregate>| {
                    let agg = window.aux;
                    let extra = Filter::Log10.apply(agg.value);
                    Interval::with_aux(window.chrom, window.left, window.right, agg.value, (agg, extra))
                },
                capacity,
            );

            let mut writer = WindowWriter::new(output);
            for item in logged {
                let window = item?;
                let (agg, extra) = window.aux;
                writer.write_window_with_extra(&window.chrom, window.left, window.right, agg, &[extra])?;
            }
            writer.flush()?;

            let forwarded = reader.join()?;
            abs.join()?;
            let stats = engine.join()?;
            log10.join()?;
            debug!("chain: {} records forwarded; {}", forwarded, stats);
            Ok(stats)
        })
    }
}
