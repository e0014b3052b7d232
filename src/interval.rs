//! Core interval record and the half-open range relations used by the
//! windowing engine.

use std::fmt;

/// True when the half-open ranges `[q_left, q_right)` and `[s_left, s_right)`
/// share at least one point.
///
/// Zero-length ranges never intersect anything.
#[inline]
pub fn intersects(q_left: f64, q_right: f64, s_left: f64, s_right: f64) -> bool {
    q_left.max(s_left) < q_right.min(s_right)
}

/// True when the query ends at or before the subject starts.
#[inline]
pub fn is_behind(q_right: f64, s_left: f64) -> bool {
    q_right <= s_left
}

/// True when the query starts at or after the subject ends.
#[inline]
pub fn is_ahead(q_left: f64, s_right: f64) -> bool {
    q_left >= s_right
}

/// A genomic interval carrying a numeric value.
///
/// Coordinates are 0-based and half-open (`[left, right)`). A NaN `value`
/// marks missing data: the record still occupies a window but does not
/// contribute to numeric aggregates. `aux` is carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval<A = ()> {
    pub chrom: String,
    pub left: f64,
    pub right: f64,
    pub value: f64,
    pub aux: A,
}

impl Interval<()> {
    /// Create an interval without an auxiliary payload.
    #[inline]
    pub fn new(chrom: impl Into<String>, left: f64, right: f64, value: f64) -> Self {
        Self::with_aux(chrom, left, right, value, ())
    }
}

impl<A> Interval<A> {
    /// Create an interval with an auxiliary payload.
    #[inline]
    pub fn with_aux(chrom: impl Into<String>, left: f64, right: f64, value: f64, aux: A) -> Self {
        Self {
            chrom: chrom.into(),
            left,
            right,
            value,
            aux,
        }
    }

    /// Length of the range; zero for degenerate or inverted ranges.
    #[inline]
    pub fn len(&self) -> f64 {
        (self.right - self.left).max(0.0)
    }

    /// Returns true if the range covers no positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left >= self.right
    }

    /// Returns true unless the value is missing (NaN).
    #[inline]
    pub fn has_value(&self) -> bool {
        !self.value.is_nan()
    }

    #[inline]
    pub fn intersects(&self, left: f64, right: f64) -> bool {
        intersects(self.left, self.right, left, right)
    }

    #[inline]
    pub fn is_behind(&self, left: f64) -> bool {
        is_behind(self.right, left)
    }

    #[inline]
    pub fn is_ahead(&self, right: f64) -> bool {
        is_ahead(self.left, right)
    }

    /// Replace the value, keeping everything else.
    pub fn map_value<F: FnOnce(f64) -> f64>(mut self, f: F) -> Self {
        self.value = f(self.value);
        self
    }
}

impl<A> fmt::Display for Interval<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t",
            self.chrom,
            self.left.floor(),
            self.right.floor()
        )?;
        if self.value.is_nan() {
            write!(f, "NA")
        } else {
            write!(f, "{}", self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        assert!(intersects(0.0, 10.0, 5.0, 15.0));
        assert!(intersects(5.0, 15.0, 0.0, 10.0));
        assert!(intersects(2.0, 3.0, 0.0, 10.0));
        assert!(!intersects(0.0, 10.0, 10.0, 20.0)); // Adjacent
        assert!(!intersects(10.0, 20.0, 0.0, 10.0));
    }

    #[test]
    fn test_zero_length_never_intersects() {
        assert!(!intersects(5.0, 5.0, 0.0, 10.0));
        assert!(!intersects(0.0, 0.0, 0.0, 10.0));
        assert!(!intersects(10.0, 10.0, 0.0, 10.0));
    }

    #[test]
    fn test_behind_and_ahead() {
        assert!(is_behind(10.0, 10.0));
        assert!(is_behind(5.0, 10.0));
        assert!(!is_behind(11.0, 10.0));

        assert!(is_ahead(20.0, 20.0));
        assert!(is_ahead(25.0, 20.0));
        assert!(!is_ahead(19.0, 20.0));
    }

    #[test]
    fn test_relations_exclusive_for_well_formed() {
        let (s_left, s_right) = (10.0, 20.0);
        for (l, r) in [(0.0, 5.0), (0.0, 10.0), (5.0, 15.0), (12.0, 18.0), (15.0, 30.0), (20.0, 25.0)] {
            let hits = [
                intersects(l, r, s_left, s_right),
                is_behind(r, s_left),
                is_ahead(l, s_right),
            ];
            assert_eq!(hits.iter().filter(|&&b| b).count(), 1, "range {l}..{r}");
        }
    }

    #[test]
    fn test_interval_methods() {
        let iv = Interval::new("chr1", 100.0, 200.0, 3.5);
        assert_eq!(iv.len(), 100.0);
        assert!(!iv.is_empty());
        assert!(iv.has_value());
        assert!(iv.intersects(150.0, 250.0));
        assert!(iv.is_behind(200.0));
        assert!(iv.is_ahead(100.0));

        let missing = Interval::new("chr1", 0.0, 1.0, f64::NAN);
        assert!(!missing.has_value());
    }

    #[test]
    fn test_display() {
        let iv = Interval::new("chr1", 10.0, 20.0, 1.5);
        assert_eq!(iv.to_string(), "chr1\t10\t20\t1.5");

        let missing = Interval::new("chr2", 0.0, 5.0, f64::NAN);
        assert_eq!(missing.to_string(), "chr2\t0\t5\tNA");
    }

    #[test]
    fn test_map_value_keeps_aux() {
        let iv = Interval::with_aux("chr1", 0.0, 1.0, -2.0, "tag");
        let mapped = iv.map_value(f64::abs);
        assert_eq!(mapped.value, 2.0);
        assert_eq!(mapped.aux, "tag");
    }
}
