//! Window configuration.
//!
//! Size and step are supplied once per run and validated before any record
//! is read. There are no defaults: a missing or unparseable value is a
//! configuration error.

use crate::bed::{Result, SlideError};

/// Window size and step, both finite and strictly positive.
///
/// `step` need not divide `size`; windows overlap when `step < size` and
/// leave gaps when `step > size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowConfig {
    pub size: f64,
    pub step: f64,
}

impl WindowConfig {
    /// Validate a size/step pair.
    ///
    /// # Example
    ///
    /// ```
    /// use slide_genomics::config::WindowConfig;
    ///
    /// let config = WindowConfig::new(1000.0, 500.0).unwrap();
    /// assert_eq!(config.size, 1000.0);
    /// assert!(WindowConfig::new(0.0, 1.0).is_err());
    /// ```
    pub fn new(size: f64, step: f64) -> Result<Self> {
        check_positive("size", size)?;
        check_positive("step", step)?;
        Ok(Self { size, step })
    }

    /// Parse size and step from raw text (e.g. command-line values).
    pub fn parse(size: &str, step: &str) -> Result<Self> {
        Self::new(parse_number("size", size)?, parse_number("step", step)?)
    }
}

fn parse_number(name: &str, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SlideError::Config(format!("window {} is required", name)));
    }
    trimmed.parse::<f64>().map_err(|_| {
        SlideError::Config(format!("window {} '{}' is not a number", name, text))
    })
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SlideError::Config(format!(
            "window {} must be a positive number, got {}",
            name, value
        )))
    }
}
