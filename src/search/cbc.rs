//! Component-by-component search drivers.

use tracing::{debug, info};

use crate::error::SearchError;
use crate::genseq::{CoprimeIntegers, GeneratorSequence, RandomSample, SeedStream};
use crate::kernel::Kernel;
use crate::merit::MeritValue;
use crate::meritseq::CoordUniformCbc;
use crate::search::{SearchConfig, SearchResult};
use crate::size::SizeParam;
use crate::storage::Storage;
use crate::weights::Weights;

/// Scans one dimension's merit sequence through the filters and returns the
/// best surviving candidate.
pub(crate) fn scan_dimension<S: GeneratorSequence>(
    cbc: &CoordUniformCbc,
    seq: &S,
    config: &SearchConfig,
    dimension: usize,
) -> Result<(u64, MeritValue), SearchError> {
    if seq.size() == 0 {
        return Err(SearchError::ExhaustedCandidates { dimension });
    }
    let mut best: Option<(f64, u64, MeritValue)> = None;
    for (gen, merit) in cbc.merit_seq(seq) {
        let value = config.combiner.apply(&merit);
        if !config.filters.accepts(value) {
            continue;
        }
        if best
            .as_ref()
            .map_or(true, |(incumbent, _, _)| config.objective.better(value, *incumbent))
        {
            best = Some((value, gen, merit));
        }
    }
    best.map(|(_, gen, merit)| (gen, merit))
        .ok_or(SearchError::FilterRejection { dimension })
}

/// Runs the per-dimension select loop over candidate sequences produced by
/// `candidates(dimension)`.
fn run_cbc<S, F>(
    cbc: &mut CoordUniformCbc,
    config: &SearchConfig,
    mut candidates: F,
) -> Result<SearchResult, SearchError>
where
    S: GeneratorSequence,
    F: FnMut(usize) -> S,
{
    cbc.reset();
    for dimension in 1..=config.dimension {
        let seq = candidates(dimension);
        let (gen, merit) = scan_dimension(cbc, &seq, config, dimension)?;
        debug!(
            dimension,
            component = gen,
            merit = config.combiner.apply(&merit),
            "selected component"
        );
        cbc.select(gen, merit);
        if config.cancel.is_cancelled() {
            info!(dimension, "search cancelled at dimension boundary");
            break;
        }
    }
    let result = SearchResult {
        rule: cbc.rule().clone(),
        merit: cbc.merit().clone(),
    };
    info!(rule = %result.rule, merit = result.combined_merit(config.combiner), "search complete");
    Ok(result)
}

/// Greedy CBC search: per dimension, scan every integer coprime to the
/// modulus and commit the best.
pub struct CbcSearch {
    cbc: CoordUniformCbc,
    config: SearchConfig,
}

impl CbcSearch {
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
        let modulus = self.cbc.storage().size_param().num_points();
        let compression = self.config.compression;
        let config = self.config.clone();
        run_cbc(&mut self.cbc, &config, |_dimension| {
            CoprimeIntegers::new(modulus, compression)
        })
    }
}

/// Random CBC search: per dimension, scan a fixed-size random sample of the
/// coprime candidates instead of all of them.
pub struct RandomCbcSearch {
    cbc: CoordUniformCbc,
    config: SearchConfig,
    trials: usize,
    stream: SeedStream,
}

impl RandomCbcSearch {
    /// Builds the driver with `trials` candidates per dimension drawn from
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
                "random CBC needs at least one trial per dimension".into(),
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
        let modulus = self.cbc.storage().size_param().num_points();
        let compression = self.config.compression;
        let trials = self.trials;
        let config = self.config.clone();
        let stream = &mut self.stream;
        run_cbc(&mut self.cbc, &config, |_dimension| {
            RandomSample::new(CoprimeIntegers::new(modulus, compression), trials, stream)
        })
    }
}
