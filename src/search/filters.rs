//! Merit combiners and candidate rejection filters.

use crate::error::SearchError;
use crate::merit::MeritValue;
use crate::size::SizeParam;

/// Reduces a per-level merit to the scalar the search compares on.
///
/// Scalar merits pass through unchanged whatever the combiner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Combiner {
    /// Worst (largest) level value.
    #[default]
    Max,
    /// Sum over levels.
    Sum,
    /// A single level.
    SelectLevel(usize),
    /// The deepest level.
    SelectMaxLevel,
}

impl Combiner {
    /// Checks the combiner against a size parameter. A selected level past
    /// the deepest level can never be applied; drivers reject it before the
    /// search starts.
    pub fn validate(&self, size: &SizeParam) -> Result<(), SearchError> {
        if let Combiner::SelectLevel(level) = self {
            if *level as u64 > size.max_level() as u64 {
                return Err(SearchError::InvalidConfiguration(format!(
                    "combiner selects level {} but the deepest level is {}",
                    level,
                    size.max_level()
                )));
            }
        }
        Ok(())
    }

    /// Applies the reduction.
    pub fn apply(&self, merit: &MeritValue) -> f64 {
        match merit {
            MeritValue::Scalar(v) => *v,
            MeritValue::PerLevel(levels) => match self {
                Combiner::Max => levels.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                Combiner::Sum => levels.iter().sum(),
                Combiner::SelectLevel(level) => levels[*level],
                Combiner::SelectMaxLevel => merit.last(),
            },
        }
    }
}

/// A single candidate rejection rule, applied to the combined scalar merit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeritFilter {
    /// Rejects candidates with merit strictly above the threshold.
    LowPass(f64),
}

impl MeritFilter {
    fn accepts(&self, value: f64) -> bool {
        match self {
            MeritFilter::LowPass(threshold) => value <= *threshold,
        }
    }
}

/// An ordered list of filters; a candidate must pass all of them.
#[derive(Debug, Clone, Default)]
pub struct MeritFilterList {
    filters: Vec<MeritFilter>,
}

impl MeritFilterList {
    /// Appends a filter.
    pub fn push(&mut self, filter: MeritFilter) {
        self.filters.push(filter);
    }

    /// Whether the combined merit passes every filter.
    pub fn accepts(&self, value: f64) -> bool {
        self.filters.iter().all(|f| f.accepts(value))
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
