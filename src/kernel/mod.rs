//! One-dimensional merit kernels.
//!
//! A coordinate-uniform figure of merit is a weighted sum over coordinate
//! subsets of `(1/n) Σ_i Π_j ω(x_ij)` for a kernel `ω` on [0, 1). The kernel
//! determines whether symmetric compression is sound: only kernels with
//! ω(x) = ω(1 − x) may share storage between mirror-image points.

mod bernoulli;

pub use bernoulli::{bernoulli2, bernoulli4, bernoulli6, bernoulli8};

use crate::error::SearchError;
use crate::storage::{Compression, Storage};

/// A one-dimensional merit kernel ω.
pub trait Kernel {
    /// Evaluates ω at a point of [0, 1).
    fn eval(&self, x: f64) -> f64;

    /// Whether ω(x) = ω(1 − x); governs compression eligibility.
    fn symmetric(&self) -> bool;

    /// Short name for logging.
    fn name(&self) -> String;

    /// The compression policy this kernel allows.
    fn suggested_compression(&self) -> Compression {
        if self.symmetric() {
            Compression::Symmetric
        } else {
            Compression::None
        }
    }

    /// Kernel values at every lattice point, in stored order: entry `i`
    /// holds ω evaluated at the representative point of stored index `i`.
    fn values(&self, storage: &Storage) -> Vec<f64> {
        let n = storage.virtual_size() as f64;
        (0..storage.size())
            .map(|i| self.eval(storage.virtual_index(i) as f64 / n))
            .collect()
    }
}

/// The kernel of the P-alpha discrepancy,
/// `ω(x) = -(-4π²)^(α/2) / α! · B_α(x)`, for even α, where `B_α` is the
/// Bernoulli polynomial of degree α.
#[derive(Debug, Clone, Copy)]
pub struct PAlpha {
    alpha: u32,
    scaling: f64,
}

impl PAlpha {
    /// Creates the P-alpha kernel. `alpha` must be 2, 4, 6 or 8.
    pub fn new(alpha: u32) -> Result<Self, SearchError> {
        if !matches!(alpha, 2 | 4 | 6 | 8) {
            return Err(SearchError::InvalidConfiguration(format!(
                "PAlpha: alpha must be 2, 4, 6 or 8, got {}",
                alpha
            )));
        }
        let sign = if (alpha / 2) % 2 == 0 { -1.0 } else { 1.0 };
        let factorial: f64 = (1..=alpha).map(|k| k as f64).product();
        let two_pi = 2.0 * std::f64::consts::PI;
        let scaling = sign * two_pi.powi(alpha as i32) / factorial;
        Ok(Self { alpha, scaling })
    }

    /// Returns α.
    pub fn alpha(&self) -> u32 {
        self.alpha
    }
}

impl Kernel for PAlpha {
    fn eval(&self, x: f64) -> f64 {
        let b = match self.alpha {
            2 => bernoulli2(x),
            4 => bernoulli4(x),
            6 => bernoulli6(x),
            8 => bernoulli8(x),
            _ => unreachable!("alpha validated at construction"),
        };
        self.scaling * b
    }

    fn symmetric(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        format!("P{}", self.alpha)
    }
}

/// Adapts an arbitrary function to the [`Kernel`] trait; the caller asserts
/// symmetry.
pub struct FunctorKernel<F> {
    f: F,
    symmetric: bool,
    name: String,
}

impl<F: Fn(f64) -> f64> FunctorKernel<F> {
    /// Wraps `f` as a kernel. `symmetric` must only be set when
    /// f(x) = f(1 − x) holds.
    pub fn new(f: F, symmetric: bool, name: impl Into<String>) -> Self {
        Self {
            f,
            symmetric,
            name: name.into(),
        }
    }
}

impl<F: Fn(f64) -> f64> Kernel for FunctorKernel<F> {
    fn eval(&self, x: f64) -> f64 {
        (self.f)(x)
    }

    fn symmetric(&self) -> bool {
        self.symmetric
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}
