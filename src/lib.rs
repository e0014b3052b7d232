// Clippy allows for the whole crate
#![allow(clippy::type_complexity)]

//! slide: sliding-window statistics over sorted genomic interval streams
//!
//! A window of fixed size moves along each chromosome in fixed steps. For
//! every position, the records overlapping it are reduced to one number
//! (mean, sum, count or covered bases) and printed as a BED-like line.
//!
//! # Features
//!
//! - **Streaming**: one forward pass, memory bounded by the records
//!   overlapping a single window
//! - **Several inputs**: 4-column value tracks, point ("sync") sites, GFF
//! - **Pipelines**: per-record filters run as concurrent stages over
//!   bounded queues
//!
//! # Example
//!
//! ```rust
//! use slide_genomics::commands::SlidingMeanCommand;
//! use slide_genomics::config::WindowConfig;
//!
//! let input = "chr1\t0\t10\t3\nchr1\t30\t45\t7\nchr1\t40\t50\t5\n";
//! let mut out = Vec::new();
//!
//! let cmd = SlidingMeanCommand::new(WindowConfig::new(40.0, 10.0).unwrap());
//! cmd.run(input.as_bytes(), &mut out).unwrap();
//!
//! assert_eq!(String::from_utf8(out).unwrap(), "chr1\t0\t40\t5\nchr1\t10\t50\t6\n");
//! ```

pub mod bed;
pub mod commands;
pub mod config;
pub mod gff;
pub mod interval;
pub mod pipeline;
pub mod reducer;
pub mod source;
pub mod streaming;

// Re-export commonly used types
pub use bed::{BedReader, PointReader, Result, SlideError};
pub use config::WindowConfig;
pub use interval::Interval;
pub use reducer::{Aggregate, Reducer};
pub use source::IntervalSource;
pub use streaming::{WindowStats, WindowingEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bed::{BedReader, PointReader, Result, SlideError};
    pub use crate::commands::{
        ChainCommand, GffCountCommand, GffCoveredCommand, PointMeanCommand, SlidingMeanCommand,
        SlidingSumCommand, SyncSumCommand,
    };
    pub use crate::config::WindowConfig;
    pub use crate::gff::{GffFields, GffReader, GffRecord};
    pub use crate::interval::Interval;
    pub use crate::reducer::{Aggregate, Count, Coverage, Mean, Reducer, Sum};
    pub use crate::source::{IntervalSource, VecSource};
    pub use crate::streaming::{WindowStats, WindowingEngine};
}
