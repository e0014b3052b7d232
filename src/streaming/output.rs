//! Output formatting for window aggregates.
//!
//! Uses itoa for coordinates and integral values and ryu for everything
//! else, so the hot path never allocates.

use crate::bed::Result;
use crate::reducer::Aggregate;
use std::io::{BufWriter, Write};

use super::buffers::DEFAULT_OUTPUT_BUFFER;

/// Integral values below this magnitude are printed without a fraction.
const INTEGRAL_LIMIT: f64 = 1e15;

/// Tab-delimited writer for `chrom left right value [extra...]` lines.
pub struct WindowWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    ryu_buf: ryu::Buffer,
}

impl<W: Write> WindowWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            ryu_buf: ryu::Buffer::new(),
        }
    }

    /// Write one window line. Undefined aggregates print as `NA`.
    #[inline]
    pub fn write_window(&mut self, chrom: &str, left: f64, right: f64, agg: Aggregate) -> Result<()> {
        self.write_window_with_extra(chrom, left, right, agg, &[])
    }

    /// Write one window line followed by computed extra columns.
    ///
    /// Extra columns are printed verbatim, so a NaN extra appears as `NaN`
    /// rather than `NA`.
    pub fn write_window_with_extra(
        &mut self,
        chrom: &str,
        left: f64,
        right: f64,
        agg: Aggregate,
        extras: &[f64],
    ) -> Result<()> {
        self.writer.write_all(chrom.as_bytes())?;
        self.writer.write_all(b"\t")?;
        self.write_coord(left)?;
        self.writer.write_all(b"\t")?;
        self.write_coord(right)?;
        self.writer.write_all(b"\t")?;
        if agg.defined {
            self.write_value(agg.value)?;
        } else {
            self.writer.write_all(b"NA")?;
        }
        for &extra in extras {
            self.writer.write_all(b"\t")?;
            self.write_value(extra)?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Write a window coordinate as `floor(x)`.
    #[inline]
    fn write_coord(&mut self, x: f64) -> Result<()> {
        let n = x.floor() as i64;
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        Ok(())
    }

    #[inline]
    fn write_value(&mut self, v: f64) -> Result<()> {
        if v.is_nan() {
            self.writer.write_all(b"NaN")?;
        } else if v.is_infinite() {
            let text: &[u8] = if v > 0.0 { b"+Inf" } else { b"-Inf" };
            self.writer.write_all(text)?;
        } else if v.fract() == 0.0 && v.abs() < INTEGRAL_LIMIT {
            self.writer
                .write_all(self.itoa_buf.format(v as i64).as_bytes())?;
        } else {
            self.writer.write_all(self.ryu_buf.format(v).as_bytes())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::bed::SlideError::Io(e.into_error()))
    }
}
