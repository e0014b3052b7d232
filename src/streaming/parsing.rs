//! Line and field parsing shared by the record readers.
//!
//! Lines are read into a reusable byte buffer and split on tabs with
//! memchr, so the hot path allocates only for the chromosome name of each
//! record.

use crate::bed::{Result, SlideError};
use memchr::memchr;
use std::io::{BufRead, BufReader, Read};

/// Buffered line reader that tracks line numbers for error reporting.
pub struct LineReader<R: Read> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
    line_number: usize,
}

impl<R: Read> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(super::buffers::DEFAULT_INPUT_BUFFER, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            buffer: Vec::with_capacity(super::buffers::DEFAULT_LINE_BUFFER),
            line_number: 0,
        }
    }

    /// Read the next non-empty line with its line terminator removed.
    ///
    /// Returns the 1-based line number alongside the line bytes.
    pub fn next_line(&mut self) -> Result<Option<(usize, &[u8])>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_until(b'\n', &mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let len = trimmed_len(&self.buffer);
            if len == 0 {
                continue;
            }
            return Ok(Some((self.line_number, &self.buffer[..len])));
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

#[inline]
fn trimmed_len(line: &[u8]) -> usize {
    let mut len = line.len();
    while len > 0 && (line[len - 1] == b'\n' || line[len - 1] == b'\r') {
        len -= 1;
    }
    len
}

/// Iterator over the tab-separated fields of a line.
pub struct TabFields<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> Iterator for TabFields<'a> {
    type Item = &'a [u8];

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match memchr(b'\t', rest) {
            Some(tab) => {
                self.rest = Some(&rest[tab + 1..]);
                Some(&rest[..tab])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Split a line on tabs.
#[inline]
pub fn tab_fields(line: &[u8]) -> TabFields<'_> {
    TabFields { rest: Some(line) }
}

/// Check if a BED-like line is a header (comment, track or browser line).
#[inline(always)]
pub fn should_skip_line(line: &[u8]) -> bool {
    line.is_empty() || line[0] == b'#' || line.starts_with(b"track") || line.starts_with(b"browser")
}

/// Decode a field as UTF-8 text.
pub fn field_str<'a>(bytes: &'a [u8], field_name: &str, line: usize) -> Result<&'a str> {
    std::str::from_utf8(bytes).map_err(|_| SlideError::Parse {
        line,
        message: format!("Invalid UTF-8 in {} field", field_name),
    })
}

/// Parse a coordinate field.
pub fn parse_position(bytes: &[u8], field_name: &str, line: usize) -> Result<f64> {
    let text = field_str(bytes, field_name, line)?;
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SlideError::Parse {
            line,
            message: format!("Invalid {} position: '{}'", field_name, text),
        }),
    }
}

/// Parse a value field; the literal `-nan` (and `nan`/`NA`) means missing.
pub fn parse_value(bytes: &[u8], field_name: &str, line: usize) -> Result<f64> {
    if is_missing_token(bytes) {
        return Ok(f64::NAN);
    }
    let text = field_str(bytes, field_name, line)?;
    text.parse::<f64>().map_err(|_| SlideError::Parse {
        line,
        message: format!("Invalid {} value: '{}'", field_name, text),
    })
}

#[inline]
fn is_missing_token(bytes: &[u8]) -> bool {
    matches!(bytes, b"-nan" | b"nan" | b"NaN" | b"NA")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_fields() {
        let fields: Vec<&[u8]> = tab_fields(b"chr1\t100\t200\t1.5").collect();
        assert_eq!(fields, vec![&b"chr1"[..], b"100", b"200", b"1.5"]);

        let fields: Vec<&[u8]> = tab_fields(b"chr1\t\t5").collect();
        assert_eq!(fields, vec![&b"chr1"[..], b"", b"5"]);

        assert_eq!(tab_fields(b"single").count(), 1);
    }

    #[test]
    fn test_line_reader_strips_terminators() {
        let input = "chr1\t1\t2\t3\r\n\nchr1\t2\t3\t4";
        let mut reader = LineReader::new(input.as_bytes());

        let (n, line) = reader.next_line().unwrap().unwrap();
        assert_eq!(n, 1);
        assert_eq!(line, b"chr1\t1\t2\t3");

        // Blank line 2 is skipped but still counted
        let (n, line) = reader.next_line().unwrap().unwrap();
        assert_eq!(n, 3);
        assert_eq!(line, b"chr1\t2\t3\t4");

        assert!(reader.next_line().unwrap().is_none());
    }

    #[test]
    fn test_should_skip_line() {
        assert!(should_skip_line(b""));
        assert!(should_skip_line(b"#comment"));
        assert!(should_skip_line(b"track name=foo"));
        assert!(should_skip_line(b"browser position chr1:1-100"));
        assert!(!should_skip_line(b"chr1\t100\t200\t1"));
    }

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position(b"100", "start", 1).unwrap(), 100.0);
        assert_eq!(parse_position(b"2.5", "end", 1).unwrap(), 2.5);
        assert!(parse_position(b"abc", "start", 7).is_err());
        assert!(parse_position(b"nan", "start", 1).is_err());
        assert!(parse_position(b"", "start", 1).is_err());
    }

    #[test]
    fn test_parse_value_missing() {
        assert!(parse_value(b"-nan", "value", 1).unwrap().is_nan());
        assert!(parse_value(b"NA", "value", 1).unwrap().is_nan());
        assert_eq!(parse_value(b"-3.25", "value", 1).unwrap(), -3.25);

        match parse_value(b"x1", "value", 4) {
            Err(SlideError::Parse { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
