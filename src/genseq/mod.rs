//! Candidate generator-value sequences.
//!
//! A search scans, for each dimension, a finite sequence of syntactically
//! valid generator values. Sequences are indexed: `element(i)` is a pure
//! function of the index, so any sequence can be restarted or traversed in a
//! random order without hidden iterator state.

mod coprime;
mod power;
mod random;

pub use coprime::CoprimeIntegers;
pub use power::PowerSeq;
pub use random::{RandomSample, SeedStream};

/// A finite, indexable sequence of candidate generator values.
pub trait GeneratorSequence {
    /// Number of candidates.
    fn size(&self) -> usize;

    /// The candidate at index `i`; pure, so traversal is restartable.
    fn element(&self, i: usize) -> u64;

    /// Iterates over the candidates in index order.
    fn values(&self) -> SequenceIter<'_, Self>
    where
        Self: Sized,
    {
        SequenceIter { seq: self, next: 0 }
    }
}

/// Iterator over a [`GeneratorSequence`].
pub struct SequenceIter<'a, S> {
    seq: &'a S,
    next: usize,
}

impl<S: GeneratorSequence> Iterator for SequenceIter<'_, S> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.seq.size() {
            return None;
        }
        let value = self.seq.element(self.next);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.seq.size() - self.next;
        (remaining, Some(remaining))
    }
}
