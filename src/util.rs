//! Integer and vector helpers shared across the crate.

use wide::f64x4;

use crate::error::SearchError;

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Extended Euclid on signed integers: returns (g, x, y) with a*x + b*y = g.
fn egcd(a: i128, b: i128) -> (i128, i128, i128) {
    if b == 0 {
        (a, 1, 0)
    } else {
        let (g, x, y) = egcd(b, a % b);
        (g, y, x - (a / b) * y)
    }
}

/// Modular inverse of `a` modulo `m`. Requires gcd(a, m) == 1.
pub fn mod_inverse(a: u64, m: u64) -> u64 {
    let (_, x, _) = egcd(a as i128, m as i128);
    (x.rem_euclid(m as i128)) as u64
}

/// Modular exponentiation with 128-bit intermediates, so any u64 modulus
/// is safe.
pub fn pow_mod(base: u64, mut exp: u32, modulus: u64) -> u64 {
    debug_assert!(modulus > 0);
    let m = modulus as u128;
    let mut b = base as u128 % m;
    let mut result = 1u128 % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exp >>= 1;
    }
    result as u64
}

/// Product modulo `modulus` with a 128-bit intermediate.
#[inline]
pub fn mul_mod(a: u64, b: u64, modulus: u64) -> u64 {
    (a as u128 * b as u128 % modulus as u128) as u64
}

/// Integer power that fails with `NumericOverflow` instead of wrapping.
pub fn checked_pow(base: u64, exponent: u32) -> Result<u64, SearchError> {
    base.checked_pow(exponent)
        .ok_or(SearchError::NumericOverflow { base, exponent })
}

/// Prime factorization as (prime, multiplicity) pairs in increasing prime
/// order. Trial division; moduli in lattice searches are small enough.
pub fn prime_factors(mut n: u64) -> Vec<(u64, u32)> {
    let mut factors = Vec::new();
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            let mut mult = 0;
            while n % p == 0 {
                n /= p;
                mult += 1;
            }
            factors.push((p, mult));
        }
        p += if p == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push((n, 1));
    }
    factors
}

/// Whether `n` is prime.
pub fn is_prime(n: u64) -> bool {
    n > 1 && prime_factors(n) == [(n, 1)]
}

/// Euler's totient.
pub fn totient(n: u64) -> u64 {
    prime_factors(n)
        .iter()
        .fold(n, |acc, &(p, _)| acc / p * (p - 1))
}

/// Sum of a slice, vectorized in batches of 4 with a scalar remainder.
pub fn vec_sum(v: &[f64]) -> f64 {
    let chunks = v.len() / 4;
    let mut acc = f64x4::ZERO;
    for i in 0..chunks {
        let j = i * 4;
        acc += f64x4::new([v[j], v[j + 1], v[j + 2], v[j + 3]]);
    }
    let mut sum = acc.reduce_add();
    for &x in &v[chunks * 4..] {
        sum += x;
    }
    sum
}

/// `y[i] += alpha * x[i]`, vectorized in batches of 4 with a scalar
/// remainder.
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    debug_assert_eq!(x.len(), y.len());
    let a = f64x4::splat(alpha);
    let chunks = x.len() / 4;
    for i in 0..chunks {
        let j = i * 4;
        let xv = f64x4::new([x[j], x[j + 1], x[j + 2], x[j + 3]]);
        let yv = f64x4::new([y[j], y[j + 1], y[j + 2], y[j + 3]]);
        let r = a.mul_add(xv, yv);
        y[j..j + 4].copy_from_slice(&r.to_array());
    }
    for i in chunks * 4..x.len() {
        y[i] += alpha * x[i];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(12, 8), 4);
        assert_eq!(gcd(13, 5), 1);
        assert_eq!(gcd(0, 7), 7);
    }

    #[test]
    fn test_mod_inverse() {
        for n in [7u64, 13, 101] {
            for a in 1..n {
                let inv = mod_inverse(a, n);
                assert_eq!(a * inv % n, 1, "inverse of {} mod {}", a, n);
            }
        }
    }

    #[test]
    fn test_pow_mod() {
        assert_eq!(pow_mod(3, 4, 13), 81 % 13);
        assert_eq!(pow_mod(2, 0, 7), 1);
        // Large modulus exercises the 128-bit path
        let m = (1u64 << 62) + 1;
        assert_eq!(pow_mod(m - 1, 2, m), 1);
    }

    #[test]
    fn test_checked_pow_overflow() {
        assert_eq!(checked_pow(2, 10), Ok(1024));
        assert_eq!(
            checked_pow(2, 64),
            Err(SearchError::NumericOverflow {
                base: 2,
                exponent: 64
            })
        );
    }

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(1), vec![]);
        assert_eq!(prime_factors(12), vec![(2, 2), (3, 1)]);
        assert_eq!(prime_factors(13), vec![(13, 1)]);
        assert_eq!(prime_factors(1024), vec![(2, 10)]);
    }

    #[test]
    fn test_totient() {
        assert_eq!(totient(13), 12);
        assert_eq!(totient(12), 4);
        assert_eq!(totient(1024), 512);
    }

    #[test]
    fn test_vec_sum_matches_scalar() {
        let v: Vec<f64> = (0..23).map(|i| i as f64 * 0.37).collect();
        let expected: f64 = v.iter().sum();
        assert!((vec_sum(&v) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_axpy_matches_scalar() {
        let x: Vec<f64> = (0..13).map(|i| (i as f64).sin()).collect();
        let mut y: Vec<f64> = (0..13).map(|i| (i as f64).cos()).collect();
        let mut expected = y.clone();
        for i in 0..13 {
            expected[i] += 2.5 * x[i];
        }
        axpy(2.5, &x, &mut y);
        for i in 0..13 {
            assert!((y[i] - expected[i]).abs() < 1e-12);
        }
    }
}
