//! Streaming reader for GFF-like feature tracks.
//!
//! Each feature line has exactly nine tab-separated columns:
//! `seqid source type start end score strand phase attributes`. Starts are
//! 1-based and converted to the 0-based half-open convention used by the
//! engine. Lines beginning with `#` are comments.

use crate::bed::{Result, SlideError};
use crate::interval::Interval;
use crate::source::IntervalSource;
use crate::streaming::parsing::{field_str, parse_position, tab_fields, LineReader};
use log::debug;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const GFF_FIELD_COUNT: usize = 9;

/// Per-feature payload carried as the interval's auxiliary data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GffFields {
    pub source: String,
    pub feature_type: String,
    /// NaN when the score column is not a number (e.g. `.`).
    pub score: f64,
    pub strand: u8,
    pub phase: u8,
    /// Attribute keys in file order, including keys without a value.
    pub attribute_names: Vec<String>,
    pub attributes: FxHashMap<String, String>,
}

impl GffFields {
    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// One line of a GFF file.
#[derive(Debug, Clone, PartialEq)]
pub enum GffRecord {
    Feature(Interval<GffFields>),
    Comment(String),
}

/// Split a `key=value;key2=value2` attribute column.
///
/// Empty segments are ignored. A segment that is not exactly one `key=value`
/// pair is recorded as a name with no value. Later duplicates overwrite
/// earlier values.
pub fn parse_gff_attributes(field: &str) -> (Vec<String>, FxHashMap<String, String>) {
    let mut names = Vec::new();
    let mut values = FxHashMap::default();

    for segment in field.split(';').filter(|s| !s.is_empty()) {
        let mut parts = segment.split('=');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                names.push(key.to_string());
                values.insert(key.to_string(), value.to_string());
            }
            _ => names.push(segment.to_string()),
        }
    }
    (names, values)
}

/// Parse one GFF line into a feature or comment.
pub fn parse_gff_line(line: &[u8], line_no: usize) -> Result<GffRecord> {
    if line.first() == Some(&b'#') {
        let text = String::from_utf8_lossy(line).into_owned();
        return Ok(GffRecord::Comment(text));
    }

    let fields: Vec<&[u8]> = tab_fields(line).collect();
    if fields.len() != GFF_FIELD_COUNT {
        return Err(SlideError::Parse {
            line: line_no,
            message: format!(
                "Expected {} GFF fields, got {}",
                GFF_FIELD_COUNT,
                fields.len()
            ),
        });
    }

    let chrom = field_str(fields[0], "seqid", line_no)?;
    let left = parse_position(fields[3], "start", line_no)? - 1.0;
    let right = parse_position(fields[4], "end", line_no)?;

    let score = std::str::from_utf8(fields[5])
        .ok()
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(f64::NAN);
    let strand = single_byte(fields[6], "strand", line_no)?;
    let phase = single_byte(fields[7], "phase", line_no)?;
    let (attribute_names, attributes) =
        parse_gff_attributes(field_str(fields[8], "attributes", line_no)?);

    let aux = GffFields {
        source: field_str(fields[1], "source", line_no)?.to_string(),
        feature_type: field_str(fields[2], "type", line_no)?.to_string(),
        score,
        strand,
        phase,
        attribute_names,
        attributes,
    };
    Ok(GffRecord::Feature(Interval::with_aux(
        chrom, left, right, score, aux,
    )))
}

fn single_byte(bytes: &[u8], field_name: &str, line: usize) -> Result<u8> {
    match bytes {
        [b] => Ok(*b),
        _ => Err(SlideError::Parse {
            line,
            message: format!(
                "{} field must be one character, got '{}'",
                field_name,
                String::from_utf8_lossy(bytes)
            ),
        }),
    }
}

/// Streaming GFF reader.
pub struct GffReader<R: Read> {
    lines: LineReader<R>,
    comments_skipped: usize,
}

impl GffReader<File> {
    /// Open a GFF file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> GffReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            comments_skipped: 0,
        }
    }

    /// Read the next line as a feature or comment.
    pub fn read_record(&mut self) -> Result<Option<GffRecord>> {
        match self.lines.next_line()? {
            Some((line_no, line)) => parse_gff_line(line, line_no).map(Some),
            None => Ok(None),
        }
    }

    /// Comment lines passed over by [`IntervalSource::next_interval`].
    pub fn comments_skipped(&self) -> usize {
        self.comments_skipped
    }
}

impl<R: Read> IntervalSource for GffReader<R> {
    type Aux = GffFields;

    /// Yield features only; comments carry no coordinates and never reach
    /// the window.
    fn next_interval(&mut self) -> Result<Option<Interval<GffFields>>> {
        while let Some(record) = self.read_record()? {
            match record {
                GffRecord::Feature(feature) => return Ok(Some(feature)),
                GffRecord::Comment(text) => {
                    debug!("skipping GFF comment: {}", text);
                    self.comments_skipped += 1;
                }
            }
        }
        Ok(None)
    }
}
