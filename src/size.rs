//! Lattice size parameters.
//!
//! A size parameter is fixed for the whole duration of a search. Ordinary
//! lattices have a single level with `n` points; embedded lattices are a
//! nested hierarchy of `max_level + 1` sub-lattices with `base^level` points
//! each, every level a sub-lattice of the next.

use crate::error::SearchError;
use crate::merit::MeritValue;
use crate::util::{checked_pow, is_prime, prime_factors, totient};

/// Number of points and level structure of a lattice.
///
/// Invalid parameters are rejected at construction, so a `SizeParam` held by
/// a search is always well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeParam {
    /// Single-level lattice with `num_points` points.
    Ordinary {
        /// Number of lattice points.
        num_points: u64,
    },
    /// Nested hierarchy of lattices with `base^level` points on each level.
    Embedded {
        /// Prime base of the hierarchy.
        base: u64,
        /// Deepest level; the full lattice has `base^max_level` points.
        max_level: u32,
        /// Cached `base^max_level`.
        num_points: u64,
    },
}

impl SizeParam {
    /// Creates an ordinary (single-level) size parameter.
    pub fn ordinary(num_points: u64) -> Result<Self, SearchError> {
        if num_points == 0 {
            return Err(SearchError::InvalidConfiguration(
                "number of points must be positive".into(),
            ));
        }
        Ok(SizeParam::Ordinary { num_points })
    }

    /// Creates an embedded size parameter from a prime base and a maximum
    /// level.
    pub fn embedded(base: u64, max_level: u32) -> Result<Self, SearchError> {
        if !is_prime(base) {
            return Err(SearchError::InvalidConfiguration(format!(
                "embedded base {} is not prime",
                base
            )));
        }
        let num_points = checked_pow(base, max_level)?;
        Ok(SizeParam::Embedded {
            base,
            max_level,
            num_points,
        })
    }

    /// Creates an embedded size parameter from a point count, which must be
    /// an integer power of a prime.
    pub fn embedded_from_points(num_points: u64) -> Result<Self, SearchError> {
        let factors = prime_factors(num_points);
        match factors.as_slice() {
            [(base, max_level)] => SizeParam::embedded(*base, *max_level),
            _ => Err(SearchError::InvalidConfiguration(format!(
                "{} is not an integer power of a prime base",
                num_points
            ))),
        }
    }

    /// Total number of lattice points.
    pub fn num_points(&self) -> u64 {
        match *self {
            SizeParam::Ordinary { num_points } => num_points,
            SizeParam::Embedded { num_points, .. } => num_points,
        }
    }

    /// Number of levels minus one; zero for ordinary lattices.
    pub fn max_level(&self) -> u32 {
        match *self {
            SizeParam::Ordinary { .. } => 0,
            SizeParam::Embedded { max_level, .. } => max_level,
        }
    }

    /// Number of points on an embedded level.
    pub fn num_points_on_level(&self, level: u32) -> Result<u64, SearchError> {
        match *self {
            SizeParam::Ordinary { num_points } => {
                if level > 0 {
                    return Err(SearchError::InvalidConfiguration(
                        "ordinary lattices have a single level".into(),
                    ));
                }
                Ok(num_points)
            }
            SizeParam::Embedded {
                base, max_level, ..
            } => {
                if level > max_level {
                    return Err(SearchError::InvalidConfiguration(format!(
                        "level {} exceeds maximum level {}",
                        level, max_level
                    )));
                }
                checked_pow(base, level)
            }
        }
    }

    /// Number of integers in `1..num_points` coprime with the modulus, i.e.
    /// the number of admissible generator values per dimension.
    pub fn totient(&self) -> u64 {
        match *self {
            SizeParam::Ordinary { num_points } => totient(num_points),
            SizeParam::Embedded {
                base, num_points, ..
            } => num_points / base * (base - 1),
        }
    }

    /// Divides a raw merit contribution by the number of points, per level
    /// for embedded lattices.
    pub fn normalize(&self, merit: &mut MeritValue) {
        match (self, merit) {
            (&SizeParam::Ordinary { num_points }, MeritValue::Scalar(v)) => {
                *v /= num_points as f64;
            }
            (&SizeParam::Embedded { base, .. }, MeritValue::PerLevel(values)) => {
                let mut points = 1u64;
                for v in values.iter_mut() {
                    *v /= points as f64;
                    points *= base;
                }
            }
            _ => unreachable!("merit value shape does not match size parameter"),
        }
    }
}

impl std::fmt::Display for SizeParam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            SizeParam::Ordinary { num_points } => write!(f, "{}", num_points),
            SizeParam::Embedded {
                base, max_level, ..
            } => write!(f, "{}^{}", base, max_level),
        }
    }
}
