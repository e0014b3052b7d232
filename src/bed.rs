//! Streaming readers for BED-like value tracks.
//!
//! Two shapes are recognised:
//!
//! - 4-column records `chrom start end value`, already 0-based half-open.
//!   A literal `-nan` value is missing data.
//! - Point ("sync") records `chrom pos ...`, each describing the single base
//!   `[pos - 1, pos)`. The value is 1 unless a value column is configured.

use crate::interval::Interval;
use crate::source::IntervalSource;
use crate::streaming::parsing::{
    field_str, parse_position, parse_value, should_skip_line, tab_fields, LineReader,
};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while reading or windowing interval streams.
#[derive(Error, Debug)]
pub enum SlideError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Input not sorted: {0}")]
    Unsorted(String),

    #[error("Pipeline stage failed: {0}")]
    Pipeline(String),
}

pub type Result<T> = std::result::Result<T, SlideError>;

/// Streaming reader for 4-column BED-like value records.
pub struct BedReader<R: Read> {
    lines: LineReader<R>,
}

impl BedReader<File> {
    /// Open a BED file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> BedReader<R> {
    /// Create a new BED reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }

    /// Create a BED reader with custom buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            lines: LineReader::with_capacity(capacity, reader),
        }
    }

    /// Read the next record, skipping blank and header lines.
    pub fn read_record(&mut self) -> Result<Option<Interval>> {
        while let Some((line_no, line)) = self.lines.next_line()? {
            if should_skip_line(line) {
                continue;
            }
            return parse_bed_line(line, line_no).map(Some);
        }
        Ok(None)
    }
}

impl<R: Read> IntervalSource for BedReader<R> {
    type Aux = ();

    fn next_interval(&mut self) -> Result<Option<Interval>> {
        self.read_record()
    }
}

/// Parse one `chrom start end value` line. Columns past the fourth are ignored.
pub fn parse_bed_line(line: &[u8], line_no: usize) -> Result<Interval> {
    let mut fields = tab_fields(line);
    let (Some(chrom), Some(start), Some(end), Some(value)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(SlideError::Parse {
            line: line_no,
            message: format!(
                "Expected at least 4 fields, got {}",
                tab_fields(line).count()
            ),
        });
    };

    let chrom = field_str(chrom, "chrom", line_no)?;
    let left = parse_position(start, "start", line_no)?;
    let right = parse_position(end, "end", line_no)?;
    let value = parse_value(value, "value", line_no)?;

    Ok(Interval::new(chrom, left, right, value))
}

/// Streaming reader for point records (`chrom pos ...`).
pub struct PointReader<R: Read> {
    lines: LineReader<R>,
    value_column: Option<usize>,
}

impl<R: Read> PointReader<R> {
    /// Point reader where every site carries the value 1.
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            value_column: None,
        }
    }

    /// Take each site's value from the given 0-based column instead.
    pub fn with_value_column(mut self, column: usize) -> Self {
        self.value_column = Some(column);
        self
    }

    pub fn read_record(&mut self) -> Result<Option<Interval>> {
        while let Some((line_no, line)) = self.lines.next_line()? {
            if should_skip_line(line) {
                continue;
            }
            return parse_point_line(line, line_no, self.value_column).map(Some);
        }
        Ok(None)
    }
}

impl<R: Read> IntervalSource for PointReader<R> {
    type Aux = ();

    fn next_interval(&mut self) -> Result<Option<Interval>> {
        self.read_record()
    }
}

/// Parse a point line into the single-base interval `[pos - 1, pos)`.
pub fn parse_point_line(line: &[u8], line_no: usize, value_column: Option<usize>) -> Result<Interval> {
    let needed = value_column.map_or(2, |c| c.max(1) + 1);
    let fields: Vec<&[u8]> = tab_fields(line).collect();
    if fields.len() < needed {
        return Err(SlideError::Parse {
            line: line_no,
            message: format!("Expected at least {} fields, got {}", needed, fields.len()),
        });
    }

    let chrom = field_str(fields[0], "chrom", line_no)?;
    let pos = parse_position(fields[1], "position", line_no)?;
    let value = match value_column {
        Some(column) => parse_value(fields[column], "value", line_no)?,
        None => 1.0,
    };

    Ok(Interval::new(chrom, pos - 1.0, pos, value))
}

/// Read all records from a string (useful for testing).
pub fn parse_intervals(content: &str) -> Result<Vec<Interval>> {
    BedReader::new(content.as_bytes()).records().collect()
}
