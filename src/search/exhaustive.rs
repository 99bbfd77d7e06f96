//! Full-vector enumeration drivers.

use tracing::{debug, info};

use crate::error::SearchError;
use crate::genseq::{CoprimeIntegers, GeneratorSequence, SeedStream};
use crate::kernel::Kernel;
use crate::meritseq::CoordUniformCbc;
use crate::rule::LatticeRule;
use crate::search::{SearchConfig, SearchResult};
use crate::size::SizeParam;
use crate::storage::Storage;
use crate::weights::Weights;

/// Tracks the best filtered full-vector result during a scan.
struct BestVector<'a> {
    config: &'a SearchConfig,
    best: Option<(f64, SearchResult)>,
}

impl<'a> BestVector<'a> {
    fn new(config: &'a SearchConfig) -> Self {
        Self { config, best: None }
    }

    fn offer(&mut self, cbc: &mut CoordUniformCbc, generator: Vec<u64>) {
        let merit = cbc.evaluate_vector(&generator);
        let value = self.config.combiner.apply(&merit);
        if !self.config.filters.accepts(value) {
            return;
        }
        if self
            .best
            .as_ref()
            .map_or(true, |(incumbent, _)| self.config.objective.better(value, *incumbent))
        {
            debug!(generator = ?generator, merit = value, "new best vector");
            let rule =
                LatticeRule::with_generator(cbc.storage().size_param().clone(), generator);
            self.best = Some((value, SearchResult { rule, merit }));
        }
    }

    fn finish(self) -> Result<SearchResult, SearchError> {
        let result = self
            .best
            .map(|(_, result)| result)
            .ok_or(SearchError::FilterRejection {
                dimension: self.config.dimension,
            })?;
        info!(
            rule = %result.rule,
            merit = result.combined_merit(self.config.combiner),
            "search complete"
        );
        Ok(result)
    }
}

/// Exhaustive search over every generating vector whose components are
/// coprime to the modulus.
///
/// The candidate count grows as `φ(n)^s`; practical only for small sizes
/// and dimensions, and mainly useful as a reference for the other drivers.
pub struct ExhaustiveSearch {
    cbc: CoordUniformCbc,
    config: SearchConfig,
}

impl ExhaustiveSearch {
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
        let config = self.config.clone();
        let modulus = self.cbc.storage().size_param().num_points();
        let seq = CoprimeIntegers::new(modulus, config.compression);
        if seq.size() == 0 {
            return Err(SearchError::ExhaustedCandidates { dimension: 1 });
        }
        let mut best = BestVector::new(&config);
        let mut indices = vec![0usize; config.dimension];
        loop {
            let generator: Vec<u64> = indices.iter().map(|&i| seq.element(i)).collect();
            best.offer(&mut self.cbc, generator);
            if config.cancel.is_cancelled() {
                info!("search cancelled at vector boundary");
                break;
            }
            // Odometer increment, most significant coordinate last.
            let mut coordinate = 0;
            loop {
                if coordinate == indices.len() {
                    return best.finish();
                }
                indices[coordinate] += 1;
                if indices[coordinate] < seq.size() {
                    break;
                }
                indices[coordinate] = 0;
                coordinate += 1;
            }
        }
        best.finish()
    }
}

/// Search over randomly drawn full generating vectors.
pub struct RandomVectorSearch {
    cbc: CoordUniformCbc,
    config: SearchConfig,
    trials: usize,
    stream: SeedStream,
}

impl RandomVectorSearch {
    /// Builds the driver with `trials` random vectors drawn from `stream`.
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
                "random vector search needs at least one trial".into(),
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
        let config = self.config.clone();
        let modulus = self.cbc.storage().size_param().num_points();
        let seq = CoprimeIntegers::new(modulus, config.compression);
        if seq.size() == 0 {
            return Err(SearchError::ExhaustedCandidates { dimension: 1 });
        }
        let mut best = BestVector::new(&config);
        for _ in 0..self.trials {
            let generator: Vec<u64> = (0..config.dimension)
                .map(|_| seq.element(self.stream.draw_index(seq.size())))
                .collect();
            best.offer(&mut self.cbc, generator);
            if config.cancel.is_cancelled() {
                info!("search cancelled at vector boundary");
                break;
            }
        }
        best.finish()
    }
}
