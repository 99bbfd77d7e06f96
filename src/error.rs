//! Error types for lattice search operations.

use thiserror::Error;

/// Errors that can occur while configuring or running a lattice search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// The search was configured with parameters that can never produce a
    /// valid lattice (zero modulus, composite embedded base, zero dimension).
    /// Surfaced before the search starts.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The candidate sequence for a dimension was empty.
    #[error("no candidate generator values for dimension {dimension}")]
    ExhaustedCandidates {
        /// 1-based dimension at which the sequence ran dry.
        dimension: usize,
    },

    /// Every candidate at a dimension failed the post-selection filters.
    /// Fatal for the branch; multi-branch drivers abandon the branch.
    #[error("all candidates rejected by filters at dimension {dimension}")]
    FilterRejection {
        /// 1-based dimension at which filtering rejected everything.
        dimension: usize,
    },

    /// Integer arithmetic on the modulus or a candidate exceeded the
    /// representable range.
    #[error("integer overflow computing {base}^{exponent}")]
    NumericOverflow {
        /// Base of the offending power.
        base: u64,
        /// Exponent of the offending power.
        exponent: u32,
    },
}
