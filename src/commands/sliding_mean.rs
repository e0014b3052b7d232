//! Sliding-window mean over a 4-column value track.
//!
//! Emits `chrom left right mean` for every window; windows where no record
//! carries a value print `NA`.

use crate::bed::{BedReader, Result};
use crate::config::WindowConfig;
use crate::reducer::Mean;
use crate::streaming::engine::WindowStats;
use std::io::{Read, Write};

use super::drive_windows;

/// Sliding mean command configuration.
#[derive(Debug, Clone)]
pub struct SlidingMeanCommand {
    pub config: WindowConfig,
    /// Skip inline sort validation
    pub assume_sorted: bool,
}

impl SlidingMeanCommand {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            assume_sorted: false,
        }
    }

    pub fn with_assume_sorted(mut self, assume_sorted: bool) -> Self {
        self.assume_sorted = assume_sorted;
        self
    }

    /// Stream `chrom start end value` records from `input`.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<WindowStats> {
        drive_windows(
            BedReader::new(input),
            self.config,
            &Mean,
            output,
            !self.assume_sorted,
        )
    }
}
