//! Search drivers over candidate generating vectors.
//!
//! Every driver walks the same state machine, one dimension at a time: build
//! the candidate merit sequence, scan it through the configured filters,
//! select the best candidate by the configured objective, commit, advance.
//! Drivers differ only in which candidates they scan.

mod cbc;
mod exhaustive;
mod filters;
mod korobov;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub use cbc::{CbcSearch, RandomCbcSearch};
pub use exhaustive::{ExhaustiveSearch, RandomVectorSearch};
pub use filters::{Combiner, MeritFilter, MeritFilterList};
pub use korobov::{KorobovSearch, RandomKorobovSearch};

use crate::error::SearchError;
use crate::genseq::SeedStream;
use crate::merit::MeritValue;
use crate::rule::LatticeRule;
use crate::storage::Compression;

/// Direction of the merit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Objective {
    /// Smaller merit is better (most norms).
    #[default]
    Minimize,
    /// Larger merit is better (max-norm style figures).
    Maximize,
}

impl Objective {
    /// Whether `candidate` beats `incumbent`.
    pub fn better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Minimize => candidate < incumbent,
            Objective::Maximize => candidate > incumbent,
        }
    }
}

/// Cooperative cancellation flag, checked at dimension boundaries only.
///
/// Clones share the flag; hand a clone to the driver and keep one to signal
/// from outside. A cancelled search finishes the dimension it is scanning
/// and returns the rule built so far.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates an unsignalled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Driver configuration, fixed at construction.
///
/// There is no global state: everything a driver needs beyond its kernel and
/// weights travels in this struct, and clones share only the cancellation
/// flag.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of generator components to select.
    pub dimension: usize,
    /// Storage compression for the evaluation engine and candidate sets.
    pub compression: Compression,
    /// Merit comparison direction.
    pub objective: Objective,
    /// Per-level to scalar reduction for embedded merits.
    pub combiner: Combiner,
    /// Candidate rejection filters.
    pub filters: MeritFilterList,
    /// Cooperative cancellation flag.
    pub cancel: CancelToken,
}

impl SearchConfig {
    /// Creates a default-everything configuration for `dimension` components.
    pub fn new(dimension: usize) -> Result<Self, SearchError> {
        if dimension == 0 {
            return Err(SearchError::InvalidConfiguration(
                "search dimension must be at least 1".into(),
            ));
        }
        Ok(Self {
            dimension,
            compression: Compression::None,
            objective: Objective::Minimize,
            combiner: Combiner::default(),
            filters: MeritFilterList::default(),
            cancel: CancelToken::new(),
        })
    }

    /// Sets the storage compression.
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Sets the merit comparison direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the per-level combiner.
    pub fn with_combiner(mut self, combiner: Combiner) -> Self {
        self.combiner = combiner;
        self
    }

    /// Appends a merit filter.
    pub fn with_filter(mut self, filter: MeritFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Installs a cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Outcome of a completed (or cancelled) search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The winning lattice rule.
    pub rule: LatticeRule,
    /// Its cumulative merit.
    pub merit: MeritValue,
}

impl SearchResult {
    /// The combined scalar merit under `combiner`.
    pub fn combined_merit(&self, combiner: Combiner) -> f64 {
        combiner.apply(&self.merit)
    }
}

/// Runs independent search branches and keeps the best surviving result.
///
/// Each branch receives its own jumped random stream, so results are
/// reproducible from `seed` regardless of how branches would be scheduled.
/// A branch failing with [`SearchError::FilterRejection`] or
/// [`SearchError::ExhaustedCandidates`] is abandoned; any other error aborts
/// the whole run. If every branch is abandoned, the last branch error is
/// returned.
pub fn random_restarts<F>(
    branches: usize,
    seed: u64,
    objective: Objective,
    combiner: Combiner,
    mut run_branch: F,
) -> Result<SearchResult, SearchError>
where
    F: FnMut(SeedStream) -> Result<SearchResult, SearchError>,
{
    let mut root = SeedStream::new(seed);
    let mut best: Option<(f64, SearchResult)> = None;
    let mut last_error = SearchError::ExhaustedCandidates { dimension: 1 };
    for branch in 0..branches {
        let stream = root.split();
        match run_branch(stream) {
            Ok(result) => {
                let value = result.combined_merit(combiner);
                if best.as_ref().map_or(true, |(b, _)| objective.better(value, *b)) {
                    best = Some((value, result));
                }
            }
            Err(err @ (SearchError::FilterRejection { .. }
            | SearchError::ExhaustedCandidates { .. })) => {
                tracing::debug!(branch, error = %err, "branch abandoned");
                last_error = err;
            }
            Err(err) => return Err(err),
        }
    }
    match best {
        Some((_, result)) => Ok(result),
        None => Err(last_error),
    }
}
