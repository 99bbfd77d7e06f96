//! Bernoulli polynomials of even degree.
//!
//! The first few Bernoulli polynomials:
//!
//! ```text
//! B0(x) = 1
//! B2(x) = x^2 - x + 1/6
//! B4(x) = x^4 - 2x^3 + x^2 - 1/30
//! B6(x) = x^6 - 3x^5 + 5x^4/2 - x^2/2 + 1/42
//! B8(x) = x^8 - 4x^7 + 14x^6/3 - 7x^4/3 + 2x^2/3 - 1/30
//! ```
//!
//! Only the even degrees appearing in the P-alpha figure of merit are
//! provided. All are symmetric about x = 1/2.

/// Evaluates the Bernoulli polynomial of degree 2.
#[inline]
pub fn bernoulli2(x: f64) -> f64 {
    x * (x - 1.0) + (1.0 / 6.0)
}

/// Evaluates the Bernoulli polynomial of degree 4.
#[inline]
pub fn bernoulli4(x: f64) -> f64 {
    ((x - 2.0) * x + 1.0) * x * x - (1.0 / 30.0)
}

/// Evaluates the Bernoulli polynomial of degree 6.
#[inline]
pub fn bernoulli6(x: f64) -> f64 {
    (((x - 3.0) * x + 2.5) * x * x - 0.5) * x * x + (1.0 / 42.0)
}

/// Evaluates the Bernoulli polynomial of degree 8.
#[inline]
pub fn bernoulli8(x: f64) -> f64 {
    ((((x - 4.0) * x + (14.0 / 3.0)) * x * x - (7.0 / 3.0)) * x * x + (2.0 / 3.0)) * x * x
        - (1.0 / 30.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_known_values() {
        assert!(approx_eq(bernoulli2(0.0), 1.0 / 6.0, 1e-15));
        assert!(approx_eq(bernoulli2(0.5), -1.0 / 12.0, 1e-15));
        assert!(approx_eq(bernoulli4(0.0), -1.0 / 30.0, 1e-15));
        assert!(approx_eq(bernoulli6(0.0), 1.0 / 42.0, 1e-15));
        assert!(approx_eq(bernoulli8(0.0), -1.0 / 30.0, 1e-15));
    }

    #[test]
    fn test_symmetry() {
        for f in [bernoulli2, bernoulli4, bernoulli6, bernoulli8] {
            for i in 0..50 {
                let x = i as f64 / 50.0;
                assert!(approx_eq(f(x), f(1.0 - x), 1e-12));
            }
        }
    }

    #[test]
    fn test_zero_mean() {
        // Bernoulli polynomials integrate to zero over [0, 1]; check with a
        // midpoint rule fine enough for 1e-6.
        for f in [bernoulli2, bernoulli4, bernoulli6, bernoulli8] {
            let steps = 100_000;
            let sum: f64 = (0..steps)
                .map(|i| f((i as f64 + 0.5) / steps as f64))
                .sum();
            assert!((sum / steps as f64).abs() < 1e-6);
        }
    }
}
