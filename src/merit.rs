//! Merit values.
//!
//! Ordinary lattices produce a single scalar figure of merit; embedded
//! lattices produce one value per level. Merit values are derived from the
//! evaluation engine and never mutated independently.

/// A figure-of-merit value for one lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum MeritValue {
    /// Single-level merit.
    Scalar(f64),
    /// One merit per embedded level, index 0 being the coarsest.
    PerLevel(Vec<f64>),
}

impl MeritValue {
    /// Adds another merit value of the same shape, elementwise.
    pub fn add(&self, other: &MeritValue) -> MeritValue {
        match (self, other) {
            (MeritValue::Scalar(a), MeritValue::Scalar(b)) => MeritValue::Scalar(a + b),
            (MeritValue::PerLevel(a), MeritValue::PerLevel(b)) => {
                debug_assert_eq!(a.len(), b.len());
                MeritValue::PerLevel(a.iter().zip(b).map(|(x, y)| x + y).collect())
            }
            _ => unreachable!("mismatched merit value shapes"),
        }
    }

    /// Returns the scalar value, or the value on the deepest level for
    /// per-level merits.
    pub fn last(&self) -> f64 {
        match self {
            MeritValue::Scalar(v) => *v,
            MeritValue::PerLevel(values) => *values.last().expect("empty per-level merit"),
        }
    }
}
