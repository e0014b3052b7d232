//! Number of GFF features overlapping each window.
//!
//! With a feature type set, only features of that type are counted, but
//! every feature still drives the window across the chromosome.

use crate::bed::Result;
use crate::config::WindowConfig;
use crate::gff::{GffFields, GffReader};
use crate::interval::Interval;
use crate::reducer::Count;
use crate::streaming::engine::WindowStats;
use log::debug;
use std::io::{Read, Write};

use super::drive_windows;

/// GFF count command configuration.
#[derive(Debug, Clone)]
pub struct GffCountCommand {
    pub config: WindowConfig,
    /// Count only features whose type column matches
    pub feature_type: Option<String>,
    /// Skip inline sort validation
    pub assume_sorted: bool,
}

impl GffCountCommand {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            feature_type: None,
            assume_sorted: false,
        }
    }

    pub fn with_feature_type(mut self, feature_type: impl Into<String>) -> Self {
        self.feature_type = Some(feature_type.into());
        self
    }

    pub fn with_assume_sorted(mut self, assume_sorted: bool) -> Self {
        self.assume_sorted = assume_sorted;
        self
    }

    #[inline]
    fn accepts(&self, feature: &Interval<GffFields>) -> bool {
        self.feature_type
            .as_deref()
            .is_none_or(|t| feature.aux.feature_type == t)
    }

    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<WindowStats> {
        let mut reader = GffReader::new(input);
        let counter = Count::new(|feature: &Interval<GffFields>| self.accepts(feature));
        let stats = drive_windows(
            &mut reader,
            self.config,
            &counter,
            output,
            !self.assume_sorted,
        )?;
        debug!("skipped {} GFF comment lines", reader.comments_skipped());
        Ok(stats)
    }
}
