//! Number of distinct bases covered by GFF features in each window.
//!
//! Overlapping features count each base once. A feature that sticks out of
//! the window contributes its whole length, not just the part inside.

use crate::bed::Result;
use crate::config::WindowConfig;
use crate::gff::GffReader;
use crate::reducer::Coverage;
use crate::streaming::engine::WindowStats;
use std::io::{Read, Write};

use super::drive_windows;

/// GFF covered-bases command configuration.
#[derive(Debug, Clone)]
pub struct GffCoveredCommand {
    pub config: WindowConfig,
    /// Skip inline sort validation
    pub assume_sorted: bool,
}

impl GffCoveredCommand {
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
            GffReader::new(input),
            self.config,
            &Coverage,
            output,
            !self.assume_sorted,
        )
    }
}
