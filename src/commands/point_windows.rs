//! Windowed statistics over point ("sync") records.
//!
//! Each input line names one site, `chrom pos ...`, which becomes the
//! single base `[pos - 1, pos)`:
//!
//! - [`SyncSumCommand`] gives every site the value 1, so each window
//!   reports how many sites it contains.
//! - [`PointMeanCommand`] reads each site's value from a chosen column and
//!   reports the per-window mean. Sites whose value is `NA`/`nan` still
//!   occupy the window but do not contribute.

use crate::bed::{PointReader, Result};
use crate::config::WindowConfig;
use crate::reducer::{Mean, Sum};
use crate::streaming::engine::WindowStats;
use std::io::{Read, Write};

use super::drive_windows;

/// Site-count command configuration.
#[derive(Debug, Clone)]
pub struct SyncSumCommand {
    pub config: WindowConfig,
    /// Skip inline sort validation
    pub assume_sorted: bool,
}

impl SyncSumCommand {
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
            PointReader::new(input),
            self.config,
            &Sum,
            output,
            !self.assume_sorted,
        )
    }
}

/// Per-site statistic mean command configuration.
#[derive(Debug, Clone)]
pub struct PointMeanCommand {
    pub config: WindowConfig,
    /// 0-based column holding each site's value
    pub value_column: usize,
    /// Skip inline sort validation
    pub assume_sorted: bool,
}

impl PointMeanCommand {
    pub fn new(config: WindowConfig, value_column: usize) -> Self {
        Self {
            config,
            value_column,
            assume_sorted: false,
        }
    }

    pub fn with_assume_sorted(mut self, assume_sorted: bool) -> Self {
        self.assume_sorted = assume_sorted;
        self
    }

    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<WindowStats> {
        drive_windows(
            PointReader::new(input).with_value_column(self.value_column),
            self.config,
            &Mean,
            output,
            !self.assume_sorted,
        )
    }
}
