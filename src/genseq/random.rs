//! Random sub-sequences for randomized search strategies.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::genseq::GeneratorSequence;

/// Seeded random stream used to draw candidate indices.
///
/// Backed by xoshiro256**, whose period (2^256 − 1) and `jump()` operation
/// (equivalent to 2^128 draws) give independent, reproducible streams to
/// parallel search branches: seed once, then hand each branch a jumped
/// clone.
#[derive(Debug, Clone)]
pub struct SeedStream {
    rng: Xoshiro256StarStar,
}

impl SeedStream {
    /// Creates a stream from a seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
        }
    }

    /// Returns a stream 2^128 draws ahead, advancing this one equally;
    /// streams obtained by successive splits never overlap in practice.
    pub fn split(&mut self) -> Self {
        let branch = self.clone();
        self.rng.jump();
        branch
    }

    /// Uniform draw from `0..bound`.
    pub fn draw_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// A fixed-size random sample of a base sequence.
///
/// The sampled indices are drawn once at construction, so `element(i)` is
/// pure and the sample is restartable like any other sequence. Draws are
/// with replacement, matching a random traversal of the base sequence.
#[derive(Debug, Clone)]
pub struct RandomSample<S> {
    base: S,
    indices: Vec<usize>,
}

impl<S: GeneratorSequence> RandomSample<S> {
    /// Draws `count` random elements of `base` using `stream`.
    pub fn new(base: S, count: usize, stream: &mut SeedStream) -> Self {
        let bound = base.size();
        let indices = if bound == 0 {
            Vec::new()
        } else {
            (0..count).map(|_| stream.draw_index(bound)).collect()
        };
        Self { base, indices }
    }
}

impl<S: GeneratorSequence> GeneratorSequence for RandomSample<S> {
    fn size(&self) -> usize {
        self.indices.len()
    }

    fn element(&self, i: usize) -> u64 {
        self.base.element(self.indices[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genseq::CoprimeIntegers;
    use crate::storage::Compression;
    use crate::util::gcd;

    #[test]
    fn test_sample_is_reproducible() {
        let base = CoprimeIntegers::new(101, Compression::None);
        let a: Vec<u64> = RandomSample::new(base.clone(), 10, &mut SeedStream::new(42))
            .values()
            .collect();
        let b: Vec<u64> = RandomSample::new(base, 10, &mut SeedStream::new(42))
            .values()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_values_are_coprime() {
        let base = CoprimeIntegers::new(100, Compression::None);
        let sample = RandomSample::new(base, 20, &mut SeedStream::new(7));
        assert_eq!(sample.size(), 20);
        for v in sample.values() {
            assert_eq!(gcd(v, 100), 1);
        }
    }

    #[test]
    fn test_split_streams_differ() {
        let mut root = SeedStream::new(1);
        let mut a = root.split();
        let mut b = root.split();
        let da: Vec<usize> = (0..8).map(|_| a.draw_index(1000)).collect();
        let db: Vec<usize> = (0..8).map(|_| b.draw_index(1000)).collect();
        assert_ne!(da, db);
    }

    #[test]
    fn test_sample_restartable() {
        let base = CoprimeIntegers::new(64, Compression::None);
        let sample = RandomSample::new(base, 5, &mut SeedStream::new(3));
        let first: Vec<u64> = sample.values().collect();
        let second: Vec<u64> = sample.values().collect();
        assert_eq!(first, second);
    }
}
