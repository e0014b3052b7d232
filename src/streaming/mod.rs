//! Streaming windowing core.
//!
//! This module provides the components shared by every windowed command:
//! - Buffered line reading and tab-field parsing
//! - Sort validation
//! - The active set and lookahead buffers
//! - The windowing engine
//! - Aggregate output formatting
//!
//! Memory stays O(k) where k = records overlapping one window.

pub mod active_set;
pub mod buffers;
pub mod engine;
pub mod output;
pub mod parsing;
pub mod validation;
pub mod window;

pub use active_set::{ActiveSet, Lookahead};
pub use engine::{Window, WindowStats, WindowingEngine};
pub use output::WindowWriter;
pub use parsing::{should_skip_line, tab_fields, LineReader};
pub use validation::SortValidator;
pub use window::WindowState;
