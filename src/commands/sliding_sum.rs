//! Sliding-window sum over a 4-column value track.

use crate::bed::{BedReader, Result};
use crate::config::WindowConfig;
use crate::reducer::Sum;
use crate::streaming::engine::WindowStats;
use std::io::{Read, Write};

use super::drive_windows;

/// Sliding sum command configuration.
#[derive(Debug, Clone)]
pub struct SlidingSumCommand {
    pub config: WindowConfig,
    /// Skip inline sort validation
    pub assume_sorted: bool,
}

impl SlidingSumCommand {
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

    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<WindowStats> {
        drive_windows(
            BedReader::new(input),
            self.config,
            &Sum,
            output,
            !self.assume_sorted,
        )
    }
}
