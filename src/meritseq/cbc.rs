//! Component-by-component merit evaluation.

use crate::error::SearchError;
use crate::genseq::GeneratorSequence;
use crate::kernel::Kernel;
use crate::merit::MeritValue;
use crate::meritseq::CoordUniformState;
use crate::rule::LatticeRule;
use crate::storage::{compressed_sum, Storage};
use crate::weights::Weights;

/// Incremental merit evaluation engine for one search branch.
///
/// Holds the kernel values in stored order, the coordinate-uniform state
/// accumulated from committed dimensions, and the best rule built so far.
/// Trying candidates for the next dimension goes through [`merit_seq`] or
/// [`trial`] and never mutates; [`select`] commits one candidate and
/// advances the dimension.
///
/// [`merit_seq`]: CoordUniformCbc::merit_seq
/// [`trial`]: CoordUniformCbc::trial
/// [`select`]: CoordUniformCbc::select
pub struct CoordUniformCbc {
    storage: Storage,
    kernel_values: Vec<f64>,
    state: CoordUniformState,
    base_rule: LatticeRule,
    base_merit: MeritValue,
}

impl CoordUniformCbc {
    /// Creates the evaluation engine for one search branch.
    ///
    /// Rejects symmetric compression with an asymmetric kernel: mirror-image
    /// points would share storage without sharing kernel values.
    pub fn new(
        storage: Storage,
        kernel: &dyn Kernel,
        weights: &Weights,
    ) -> Result<Self, SearchError> {
        if storage.compression().symmetric() && !kernel.symmetric() {
            return Err(SearchError::InvalidConfiguration(format!(
                "kernel {} is not symmetric; symmetric compression is unsound",
                kernel.name()
            )));
        }
        let kernel_values = kernel.values(&storage);
        let state = CoordUniformState::new(&storage, weights);
        let base_rule = LatticeRule::new(storage.size_param().clone());
        let base_merit = storage.create_merit_value(0.0);
        Ok(Self {
            storage,
            kernel_values,
            state,
            base_rule,
            base_merit,
        })
    }

    /// Returns the storage configuration.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Returns the rule built so far.
    pub fn rule(&self) -> &LatticeRule {
        &self.base_rule
    }

    /// Returns the accumulated merit of the rule built so far.
    pub fn merit(&self) -> &MeritValue {
        &self.base_merit
    }

    /// Number of committed dimensions.
    pub fn dimension(&self) -> usize {
        self.state.dimension()
    }

    /// Resets to dimension 0, keeping storage and kernel values.
    pub fn reset(&mut self) {
        self.state.reset(&self.storage);
        self.base_rule = LatticeRule::new(self.storage.size_param().clone());
        self.base_merit = self.storage.create_merit_value(0.0);
    }

    fn contribution(&self, weighted: &[f64], gen: u64) -> MeritValue {
        let strided = self.storage.strided(&self.kernel_values, gen);
        let prod: Vec<f64> = weighted
            .iter()
            .enumerate()
            .map(|(i, q)| q * strided.get(i))
            .collect();
        let mut merit = compressed_sum(&self.storage, &prod);
        self.storage.size_param().normalize(&mut merit);
        merit.add(&self.base_merit)
    }

    /// Merit of appending one candidate to the current rule. Side-effect
    /// free and idempotent; repeated calls with the same candidate return
    /// identical values.
    pub fn trial(&self, gen: u64) -> MeritValue {
        self.contribution(&self.state.weighted_state(), gen)
    }

    /// Lazy sequence of `(candidate, merit)` pairs for the next dimension.
    ///
    /// The weighted state is computed once per sequence; each element costs
    /// one elementwise pass over the compressed space. The sequence imposes
    /// no ordering beyond the candidate sequence's own, and is restartable
    /// whenever the candidate sequence is.
    pub fn merit_seq<'a, S: GeneratorSequence>(&'a self, gen_seq: &'a S) -> MeritSeq<'a, S> {
        MeritSeq {
            cbc: self,
            gen_seq,
            weighted: self.state.weighted_state(),
            next: 0,
        }
    }

    /// Commits `gen` as the generator component of the next dimension,
    /// with `merit` as its (already computed) cumulative merit.
    /// Irreversible; the dimension counter advances by one.
    pub fn select(&mut self, gen: u64, merit: MeritValue) {
        self.state.commit(&self.storage, &self.kernel_values, gen);
        self.base_rule.extend(gen);
        self.base_merit = merit;
    }

    /// Evaluates a complete generating vector by resetting and committing
    /// its components in order. Reuses the precomputed kernel values, so
    /// full-vector drivers can score many vectors on one engine.
    pub fn evaluate_vector(&mut self, generator: &[u64]) -> MeritValue {
        self.reset();
        for &gen in generator {
            let merit = self.trial(gen);
            self.select(gen, merit);
        }
        self.base_merit.clone()
    }

    /// Evaluates a complete generating vector on a fresh engine.
    pub fn evaluate(
        storage: Storage,
        kernel: &dyn Kernel,
        weights: &Weights,
        generator: &[u64],
    ) -> Result<MeritValue, SearchError> {
        let mut cbc = CoordUniformCbc::new(storage, kernel, weights)?;
        Ok(cbc.evaluate_vector(generator))
    }
}

/// Lazy merit sequence over candidate generator values; see
/// [`CoordUniformCbc::merit_seq`].
pub struct MeritSeq<'a, S> {
    cbc: &'a CoordUniformCbc,
    gen_seq: &'a S,
    weighted: Vec<f64>,
    next: usize,
}

impl<S: GeneratorSequence> MeritSeq<'_, S> {
    /// Merit of the candidate at index `i`; pure.
    pub fn element(&self, i: usize) -> (u64, MeritValue) {
        let gen = self.gen_seq.element(i);
        (gen, self.cbc.contribution(&self.weighted, gen))
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.gen_seq.size()
    }

    /// Whether the candidate sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.gen_seq.size() == 0
    }
}

impl<S: GeneratorSequence> Iterator for MeritSeq<'_, S> {
    type Item = (u64, MeritValue);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.gen_seq.size() {
            return None;
        }
        let item = self.element(self.next);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.gen_seq.size() - self.next;
        (remaining, Some(remaining))
    }
}

/// Brute-force merit from the definition, O(n * 2^s): weighted sum over
/// nonempty coordinate subsets of the mean kernel product. The oracle for
/// the incremental engine.
#[cfg(test)]
pub(crate) fn brute_force_merit(
    n: u64,
    generator: &[u64],
    kernel: &dyn Kernel,
    weights: &Weights,
) -> f64 {
    let s = generator.len();
    let mut total = 0.0;
    for mask in 1u32..(1 << s) {
        let projection: Vec<usize> = (0..s).filter(|j| mask >> j & 1 == 1).collect();
        let weight = weights.weight_for_projection(&projection);
        if weight == 0.0 {
            continue;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let mut prod = 1.0;
            for &j in &projection {
                let x = (i as u128 * generator[j] as u128 % n as u128) as f64 / n as f64;
                prod *= kernel.eval(x);
            }
            sum += prod;
        }
        total += weight * sum / n as f64;
    }
    total
}
