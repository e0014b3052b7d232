//! Sort validation for streaming operations.
//!
//! The windowing engine makes a single forward pass and never revisits a
//! chromosome, so it requires input where:
//! 1. All records for a chromosome are contiguous (no interleaving)
//! 2. Within a chromosome, `left` is non-decreasing
//!
//! Any chromosome order is accepted (lexicographic, genome order, ...).

use crate::bed::{Result, SlideError};
use rustc_hash::FxHashSet;

/// Inline sort validator for use within streaming loops.
///
/// Validates records as they are pulled instead of reading the input twice.
#[derive(Debug, Default)]
pub struct SortValidator {
    prev_chrom: Option<String>,
    prev_left: f64,
    seen_chroms: FxHashSet<String>,
    record_count: usize,
}

impl SortValidator {
    /// Create a new sort validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate that the given record maintains sort order.
    #[inline]
    pub fn validate(&mut self, chrom: &str, left: f64) -> Result<()> {
        self.record_count += 1;

        match self.prev_chrom.as_deref() {
            Some(pc) if pc == chrom => {
                if left < self.prev_left {
                    return Err(SlideError::Unsorted(format!(
                        "position {} at record {} comes after {} on {}",
                        left, self.record_count, self.prev_left, chrom
                    )));
                }
            }
            prev => {
                // Switching chromosomes - check we haven't seen this one before
                if self.seen_chroms.contains(chrom) {
                    return Err(SlideError::Unsorted(format!(
                        "chromosome '{}' at record {} was seen earlier (chromosomes must be contiguous)",
                        chrom, self.record_count
                    )));
                }
                if let Some(pc) = prev {
                    self.seen_chroms.insert(pc.to_string());
                }
                self.prev_chrom = Some(chrom.to_string());
            }
        }

        self.prev_left = left;
        Ok(())
    }

    /// Reset validator state.
    pub fn reset(&mut self) {
        self.prev_chrom = None;
        self.prev_left = 0.0;
        self.seen_chroms.clear();
        self.record_count = 0;
    }

    /// Get the number of records validated.
    pub fn record_count(&self) -> usize {
        self.record_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_input_passes() {
        let mut v = SortValidator::new();
        v.validate("chr1", 0.0).unwrap();
        v.validate("chr1", 0.0).unwrap();
        v.validate("chr1", 10.0).unwrap();
        v.validate("chr10", 0.0).unwrap();
        v.validate("chr2", 5.0).unwrap();
        assert_eq!(v.record_count(), 5);
    }

    #[test]
    fn test_new_chromosome_may_start_lower() {
        let mut v = SortValidator::new();
        v.validate("chr9", 5000.0).unwrap();
        v.validate("chr10", 1.0).unwrap();
    }

    #[test]
    fn test_position_regression_detected() {
        let mut v = SortValidator::new();
        v.validate("chr1", 200.0).unwrap();
        let err = v.validate("chr1", 100.0).unwrap_err();
        assert!(err.to_string().contains("comes after"));
    }

    #[test]
    fn test_interleaved_chromosomes_detected() {
        let mut v = SortValidator::new();
        v.validate("chr1", 0.0).unwrap();
        v.validate("chr2", 0.0).unwrap();
        let err = v.validate("chr1", 50.0).unwrap_err();
        assert!(err.to_string().contains("contiguous"));
    }

    #[test]
    fn test_reset() {
        let mut v = SortValidator::new();
        v.validate("chr1", 0.0).unwrap();
        v.validate("chr2", 0.0).unwrap();
        v.reset();
        assert_eq!(v.record_count(), 0);
        v.validate("chr1", 0.0).unwrap();
    }
}
