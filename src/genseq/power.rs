//! Power sequences for Korobov-style constructions.

use crate::genseq::GeneratorSequence;
use crate::util::pow_mod;

/// Raises every element of a base sequence to a fixed power modulo the
/// lattice size.
///
/// A Korobov rule with parameter `a` has generating vector
/// `(1, a, a², ...)`; the candidates for dimension `j` are therefore the
/// base candidates raised to the power `j − 1`.
#[derive(Debug, Clone)]
pub struct PowerSeq<S> {
    base: S,
    power: u32,
    modulus: u64,
}

impl<S: GeneratorSequence> PowerSeq<S> {
    /// Wraps `base`, raising each element to `power` modulo `modulus`.
    pub fn new(base: S, power: u32, modulus: u64) -> Self {
        Self {
            base,
            power,
            modulus,
        }
    }

    /// Returns the underlying sequence.
    pub fn base(&self) -> &S {
        &self.base
    }

    /// Returns the exponent.
    pub fn power(&self) -> u32 {
        self.power
    }
}

impl<S: GeneratorSequence> GeneratorSequence for PowerSeq<S> {
    fn size(&self) -> usize {
        self.base.size()
    }

    fn element(&self, i: usize) -> u64 {
        pow_mod(self.base.element(i), self.power, self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genseq::CoprimeIntegers;
    use crate::storage::Compression;

    #[test]
    fn test_squares_mod_13() {
        let base = CoprimeIntegers::new(13, Compression::None);
        let seq = PowerSeq::new(base, 2, 13);
        assert_eq!(seq.size(), 12);
        for i in 0..seq.size() {
            let b = seq.base().element(i);
            assert_eq!(seq.element(i), b * b % 13);
        }
    }

    #[test]
    fn test_power_zero_is_one() {
        let base = CoprimeIntegers::new(7, Compression::None);
        let seq = PowerSeq::new(base, 0, 7);
        assert!(seq.values().all(|v| v == 1));
    }
}
