//! Integers coprime with a modulus, indexed through the Chinese remainder
//! theorem.
//!
//! Writing `n = b_1^{p_1} ... b_l^{p_l}`, the units modulo `n` are in
//! bijection with tuples of units modulo each prime power. Index `i` is
//! decomposed into mixed-radix digits with radix `φ(b_j^{p_j})`; each digit
//! selects a unit modulo its prime power and the tuple is recombined with
//! the CRT basis. This gives a pure `element(i)` without enumerating the
//! sequence.
//!
//! Under symmetric compression the values `k` and `n − k` produce the same
//! merit, and the CRT ordering places exactly one member of each mirror
//! pair in the first half of the sequence, so the sequence is halved and
//! every element is mapped to its representative `min(k, n − k)`.

use crate::genseq::GeneratorSequence;
use crate::storage::Compression;
use crate::util::{mod_inverse, prime_factors};

#[derive(Debug, Clone)]
struct BasisElement {
    /// φ(b^p), the mixed radix of this digit.
    totient: u64,
    /// b − 1; every `leap`-th unit candidate skips a multiple of b.
    leap: u64,
    /// CRT basis element: (n / b^p) · ((n / b^p)^{-1} mod b^p), taken mod n.
    elem: u64,
}

/// Indexed sequence of the integers in `[1, n)` coprime with `n`.
#[derive(Debug, Clone)]
pub struct CoprimeIntegers {
    modulus: u64,
    compression: Compression,
    size: usize,
    basis: Vec<BasisElement>,
}

impl CoprimeIntegers {
    /// Creates the sequence of units modulo `modulus`, which must be
    /// nonzero; a zero modulus has no unit group and panics here rather
    /// than in `element`.
    ///
    /// With `Compression::Symmetric` only one member of each mirror pair
    /// `{k, n − k}` is produced, as its representative `min(k, n − k)`.
    pub fn new(modulus: u64, compression: Compression) -> Self {
        assert!(modulus > 0, "CoprimeIntegers: modulus must be nonzero");
        let mut size = 1u64;
        let mut basis = Vec::new();
        for (b, p) in prime_factors(modulus) {
            let bk = b.pow(p);
            // The cofactor is coprime with b^p, so it has an inverse there.
            let m = modulus / bk;
            let totient = bk / b * (b - 1);
            let elem = (m as u128 * mod_inverse(m % bk, bk) as u128 % modulus as u128) as u64;
            size *= totient;
            basis.push(BasisElement {
                totient,
                leap: b - 1,
                elem,
            });
        }
        let size = match compression {
            Compression::None => size,
            Compression::Symmetric => compression.size(size + 1) - 1,
        };
        Self {
            modulus,
            compression,
            size: size as usize,
            basis,
        }
    }

    /// Returns the modulus.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl GeneratorSequence for CoprimeIntegers {
    fn size(&self) -> usize {
        self.size
    }

    fn element(&self, i: usize) -> u64 {
        let mut i = i as u64;
        let mut ret = 0u128;
        for e in &self.basis {
            let rem = i % e.totient;
            i /= e.totient;
            let unit = rem + rem / e.leap + 1;
            ret += unit as u128 * e.elem as u128;
        }
        let value = (ret % self.modulus as u128) as u64;
        self.compression.compress_index(value, self.modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::gcd;

    fn collect(seq: &CoprimeIntegers) -> Vec<u64> {
        seq.values().collect()
    }

    #[test]
    fn test_prime_modulus() {
        let seq = CoprimeIntegers::new(13, Compression::None);
        assert_eq!(seq.size(), 12);
        let mut values = collect(&seq);
        values.sort_unstable();
        assert_eq!(values, (1..13).collect::<Vec<u64>>());
    }

    #[test]
    fn test_composite_modulus() {
        let seq = CoprimeIntegers::new(12, Compression::None);
        assert_eq!(seq.size(), 4);
        let mut values = collect(&seq);
        values.sort_unstable();
        assert_eq!(values, vec![1, 5, 7, 11]);
    }

    #[test]
    fn test_prime_power_modulus() {
        let seq = CoprimeIntegers::new(16, Compression::None);
        assert_eq!(seq.size(), 8);
        for value in collect(&seq) {
            assert_eq!(gcd(value, 16), 1);
        }
    }

    #[test]
    fn test_symmetric_halving_prime() {
        let seq = CoprimeIntegers::new(13, Compression::Symmetric);
        assert_eq!(seq.size(), 6);
        let mut values = collect(&seq);
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_symmetric_halving_covers_all_pairs() {
        for n in [8u64, 12, 13, 27, 100] {
            let full: Vec<u64> = CoprimeIntegers::new(n, Compression::None)
                .values()
                .map(|k| k.min(n - k))
                .collect();
            let mut expected: Vec<u64> = full;
            expected.sort_unstable();
            expected.dedup();

            let mut half: Vec<u64> = CoprimeIntegers::new(n, Compression::Symmetric)
                .values()
                .collect();
            half.sort_unstable();
            assert_eq!(half, expected, "modulus {}", n);
        }
    }

    #[test]
    fn test_element_is_pure() {
        let seq = CoprimeIntegers::new(100, Compression::None);
        for i in 0..seq.size() {
            assert_eq!(seq.element(i), seq.element(i));
        }
    }

    #[test]
    #[should_panic(expected = "modulus must be nonzero")]
    fn test_zero_modulus_panics() {
        let _ = CoprimeIntegers::new(0, Compression::None);
    }

    #[test]
    fn test_trivial_modulus() {
        let seq = CoprimeIntegers::new(1, Compression::None);
        assert_eq!(seq.size(), 1);
        assert_eq!(seq.element(0), 0);
    }
}
