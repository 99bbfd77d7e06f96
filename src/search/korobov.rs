//! Korobov search drivers.
//!
//! A Korobov rule is fully determined by one parameter `a`: its generating
//! vector is `(1, a, a², ...) mod n`. The drivers score whole vectors, one
//! candidate parameter at a time, on a single evaluation engine.

use tracing::{debug, info};

use crate::error::SearchError;
use crate::genseq::{CoprimeIntegers, GeneratorSequence, RandomSample, SeedStream};
use crate::kernel::Kernel;
use crate::meritseq::CoordUniformCbc;
use crate::rule::LatticeRule;
use crate::search::{SearchConfig, SearchResult};
use crate::size::SizeParam;
use crate::storage::Storage;
use crate::weights::Weights;

/// Scores every candidate parameter in `seq` as a full Korobov vector and
/// returns the best surviving result.
pub(crate) fn scan_vectors<S, F>(
    cbc: &mut CoordUniformCbc,
    seq: &S,
    config: &SearchConfig,
    mut vector_of: F,
) -> Result<SearchResult, SearchError>
where
    S: GeneratorSequence,
    F: FnMut(u64) -> Vec<u64>,
{
    if seq.size() == 0 {
        return Err(SearchError::ExhaustedCandidates { dimension: 1 });
    }
    let mut best: Option<(f64, SearchResult)> = None;
    for candidate in seq.values() {
        let generator = vector_of(candidate);
        let merit = cbc.evaluate_vector(&generator);
        let value = config.combiner.apply(&merit);
        if !config.filters.accepts(value) {
            continue;
        }
        if best
            .as_ref()
            .map_or(true, |(incumbent, _)| config.objective.better(value, *incumbent))
        {
            debug!(candidate, merit = value, "new best vector");
            let rule =
                LatticeRule::with_generator(cbc.storage().size_param().clone(), generator);
            best = Some((value, SearchResult { rule, merit }));
        }
        if config.cancel.is_cancelled() {
            info!("search cancelled at candidate boundary");
            break;
        }
    }
    let result = best
        .map(|(_, result)| result)
        .ok_or(SearchError::FilterRejection {
            dimension: config.dimension,
        })?;
    info!(rule = %result.rule, merit = result.combined_merit(config.combiner), "search complete");
    Ok(result)
}

fn korobov_vector(size: &SizeParam, a: u64, dimension: usize) -> Vec<u64> {
    LatticeRule::korobov(size.clone(), a, dimension)
        .generator()
        .to_vec()
}

/// Exhaustive Korobov search over all parameters coprime to the modulus.
pub struct KorobovSearch {
    cbc: CoordUniformCbc,
    config: SearchConfig,
}

impl KorobovSearch {
    /// Builds the driver; the storage and evaluation engine are fixed here.
    pub fn new(
        size: SizeParam,
        kernel: &dyn Kernel,
        weights: &Weights,
        config: SearchConfig,
    ) -> Result<Self, SearchError> {
        config.combiner.validate(&size)?;
        let storage = Storage::new(size, config.compression);
        let cbc = CoordUniformCbc::new(storage, kernel, weights)?;
        Ok(Self { cbc, config })
    }

    /// Runs the search to completion (or cancellation).
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        let size = self.cbc.storage().size_param().clone();
        // Mirror parameters generate mirrored per-coordinate strides, so
        // symmetric compression halves the candidate set soundly.
        let seq = CoprimeIntegers::new(size.num_points(), self.config.compression);
        let config = self.config.clone();
        let dimension = config.dimension;
        scan_vectors(&mut self.cbc, &seq, &config, |a| {
            korobov_vector(&size, a, dimension)
        })
    }
}

/// Korobov search over a random sample of the coprime parameters.
pub struct RandomKorobovSearch {
    cbc: CoordUniformCbc,
    config: SearchConfig,
    trials: usize,
    stream: SeedStream,
}

impl RandomKorobovSearch {
    /// Builds the driver with `trials` candidate parameters drawn from
    /// `stream`.
    pub fn new(
        size: SizeParam,
        kernel: &dyn Kernel,
        weights: &Weights,
        config: SearchConfig,
        trials: usize,
        stream: SeedStream,
    ) -> Result<Self, SearchError> {
        if trials == 0 {
            return Err(SearchError::InvalidConfiguration(
                "random Korobov needs at least one trial".into(),
            ));
        }
        config.combiner.validate(&size)?;
        let storage = Storage::new(size, config.compression);
        let cbc = CoordUniformCbc::new(storage, kernel, weights)?;
        Ok(Self {
            cbc,
            config,
            trials,
            stream,
        })
    }

    /// Runs the search to completion (or cancellation).
    pub fn run(&mut self) -> Result<SearchResult, SearchError> {
        let size = self.cbc.storage().size_param().clone();
        let base = CoprimeIntegers::new(size.num_points(), self.config.compression);
        let seq = RandomSample::new(base, self.trials, &mut self.stream);
        let config = self.config.clone();
        let dimension = config.dimension;
        scan_vectors(&mut self.cbc, &seq, &config, |a| {
            korobov_vector(&size, a, dimension)
        })
    }
}
