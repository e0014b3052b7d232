//! Pull-based interval sources.
//!
//! A source hands out records one at a time, sorted by chromosome (groups
//! contiguous, in any order) and by ascending `left` within a chromosome.
//! `Ok(None)` means the source is permanently exhausted; an `Err` ends the
//! run.

use crate::bed::Result;
use crate::interval::Interval;
use crate::streaming::validation::SortValidator;
use crossbeam_channel::Receiver;
use std::collections::VecDeque;

/// A producer of sorted interval records.
pub trait IntervalSource {
    /// Payload carried by each record.
    type Aux;

    /// Pull the next record, transferring ownership to the caller.
    fn next_interval(&mut self) -> Result<Option<Interval<Self::Aux>>>;

    /// Adapt the source into an iterator of records.
    fn records(self) -> Records<Self>
    where
        Self: Sized,
    {
        Records {
            source: self,
            done: false,
        }
    }
}

impl<S: IntervalSource + ?Sized> IntervalSource for &mut S {
    type Aux = S::Aux;

    fn next_interval(&mut self) -> Result<Option<Interval<Self::Aux>>> {
        (**self).next_interval()
    }
}

impl<S: IntervalSource + ?Sized> IntervalSource for Box<S> {
    type Aux = S::Aux;

    fn next_interval(&mut self) -> Result<Option<Interval<Self::Aux>>> {
        (**self).next_interval()
    }
}

/// Iterator over the records of a source. Stops after the first error.
pub struct Records<S> {
    source: S,
    done: bool,
}

impl<S: IntervalSource> Iterator for Records<S> {
    type Item = Result<Interval<S::Aux>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.source.next_interval() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// In-memory source over records that are already sorted.
#[derive(Debug, Clone)]
pub struct VecSource<A = ()> {
    records: VecDeque<Interval<A>>,
}

impl<A> VecSource<A> {
    pub fn new(records: Vec<Interval<A>>) -> Self {
        Self {
            records: records.into(),
        }
    }

    /// Records not yet handed out.
    pub fn remaining(&self) -> usize {
        self.records.len()
    }
}

impl<A> From<Vec<Interval<A>>> for VecSource<A> {
    fn from(records: Vec<Interval<A>>) -> Self {
        Self::new(records)
    }
}

impl<A> FromIterator<Interval<A>> for VecSource<A> {
    fn from_iter<I: IntoIterator<Item = Interval<A>>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<A> IntervalSource for VecSource<A> {
    type Aux = A;

    fn next_interval(&mut self) -> Result<Option<Interval<A>>> {
        Ok(self.records.pop_front())
    }
}

/// Source fed by an upstream pipeline stage.
///
/// A disconnected queue is treated as exhaustion; errors sent by the
/// producer are returned as-is.
pub struct ChannelSource<A> {
    receiver: Receiver<Result<Interval<A>>>,
}

impl<A> ChannelSource<A> {
    pub fn new(receiver: Receiver<Result<Interval<A>>>) -> Self {
        Self { receiver }
    }
}

impl<A> IntervalSource for ChannelSource<A> {
    type Aux = A;

    fn next_interval(&mut self) -> Result<Option<Interval<A>>> {
        match self.receiver.recv() {
            Ok(Ok(record)) => Ok(Some(record)),
            Ok(Err(e)) => Err(e),
            Err(_) => Ok(None),
        }
    }
}

/// Source adapter that checks sort order as records pass through.
pub struct Validated<S> {
    inner: S,
    validator: Option<SortValidator>,
}

impl<S: IntervalSource> Validated<S> {
    /// Wrap a source; when `enabled` is false records pass through unchecked.
    pub fn new(inner: S, enabled: bool) -> Self {
        Self {
            inner,
            validator: enabled.then(SortValidator::new),
        }
    }
}

impl<S: IntervalSource> IntervalSource for Validated<S> {
    type Aux = S::Aux;

    fn next_interval(&mut self) -> Result<Option<Interval<S::Aux>>> {
        let record = self.inner.next_interval()?;
        if let (Some(validator), Some(rec)) = (self.validator.as_mut(), record.as_ref()) {
            validator.validate(&rec.chrom, rec.left)?;
        }
        Ok(record)
    }
}

/// Drain a source into a vector.
pub fn collect_source<S: IntervalSource>(source: S) -> Result<Vec<Interval<S::Aux>>> {
    source.records().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::SlideError;
    use crossbeam_channel::bounded;

    fn iv(chrom: &str, left: f64, right: f64) -> Interval {
        Interval::new(chrom, left, right, 1.0)
    }

    #[test]
    fn test_vec_source_drains_in_order() {
        let mut source = VecSource::new(vec![iv("chr1", 0.0, 1.0), iv("chr1", 5.0, 6.0)]);
        assert_eq!(source.remaining(), 2);
        assert_eq!(source.next_interval().unwrap().unwrap().left, 0.0);
        assert_eq!(source.next_interval().unwrap().unwrap().left, 5.0);
        assert!(source.next_interval().unwrap().is_none());
        assert!(source.next_interval().unwrap().is_none());
    }

    #[test]
    fn test_records_iterator() {
        let source: VecSource = vec![iv("chr1", 0.0, 1.0), iv("chr2", 0.0, 1.0)].into();
        let records = collect_source(source).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].chrom, "chr2");
    }

    #[test]
    fn test_channel_source() {
        let (tx, rx) = bounded(4);
        tx.send(Ok(iv("chr1", 0.0, 1.0))).unwrap();
        tx.send(Err(SlideError::Parse {
            line: 2,
            message: "bad".to_string(),
        }))
        .unwrap();
        drop(tx);

        let mut source = ChannelSource::new(rx);
        assert!(source.next_interval().unwrap().is_some());
        assert!(source.next_interval().is_err());
        assert!(source.next_interval().unwrap().is_none());
    }

    #[test]
    fn test_validated_rejects_unsorted_positions() {
        let source = VecSource::new(vec![iv("chr1", 10.0, 20.0), iv("chr1", 5.0, 6.0)]);
        let result = collect_source(Validated::new(source, true));
        assert!(matches!(result, Err(SlideError::Unsorted(_))));
    }

    #[test]
    fn test_validated_rejects_interleaved_chromosomes() {
        let source = VecSource::new(vec![
            iv("chr1", 0.0, 1.0),
            iv("chr2", 0.0, 1.0),
            iv("chr1", 5.0, 6.0),
        ]);
        let result = collect_source(Validated::new(source, true));
        assert!(matches!(result, Err(SlideError::Unsorted(_))));
    }

    #[test]
    fn test_validated_disabled_passes_through() {
        let source = VecSource::new(vec![iv("chr1", 10.0, 20.0), iv("chr1", 5.0, 6.0)]);
        let records = collect_source(Validated::new(source, false)).unwrap();
        assert_eq!(records.len(), 2);
    }
}
