//! Per-candidate partial-product state for incremental merit evaluation.
//!
//! The state caches, over the compressed index space, the kernel products
//! accumulated from every committed dimension, so that trying a candidate
//! for the next dimension needs a single elementwise pass instead of a full
//! recomputation from dimension 1.
//!
//! Products are accumulated in f64 with no renormalization between
//! dimensions; for very large dimensions combined with steep kernels the
//! entries can underflow. This is a documented limitation, not silently
//! corrected.

use crate::storage::Storage;
use crate::util::axpy;
use crate::weights::{OrderDependentWeights, ProductWeights, Weights};

/// Weight-family-specific accumulators.
#[derive(Debug, Clone)]
enum Accumulator {
    /// Single running product `Π_j (1 + γ_j ω_j)`.
    Product {
        weights: ProductWeights,
        state: Vec<f64>,
    },
    /// One vector per projection order; entry `k` holds the elementary
    /// symmetric sums of order `k` of the committed kernel vectors.
    OrderDependent {
        weights: OrderDependentWeights,
        state: Vec<Vec<f64>>,
    },
    /// Order-dependent accumulators with product weights folded into each
    /// committed kernel vector.
    Pod {
        order: OrderDependentWeights,
        product: ProductWeights,
        state: Vec<Vec<f64>>,
    },
}

/// State of the coordinate-uniform evaluation across committed dimensions.
///
/// Transitions are `Empty -> Dim1 -> Dim2 -> ...`, one [`commit`] per
/// dimension, never skipping and never repeating. Before the first commit
/// the implicit base vector is all ones. Trial evaluation goes through
/// [`weighted_state`] and never mutates.
///
/// [`commit`]: CoordUniformState::commit
/// [`weighted_state`]: CoordUniformState::weighted_state
#[derive(Debug, Clone)]
pub struct CoordUniformState {
    dimension: usize,
    accumulator: Accumulator,
}

impl CoordUniformState {
    /// Creates a dimension-0 state for the given weight family.
    pub fn new(storage: &Storage, weights: &Weights) -> Self {
        let size = storage.size();
        let accumulator = match weights {
            Weights::Product(w) => Accumulator::Product {
                weights: w.clone(),
                state: vec![1.0; size],
            },
            Weights::OrderDependent(w) => Accumulator::OrderDependent {
                weights: w.clone(),
                state: vec![vec![1.0; size]],
            },
            Weights::Pod(order, product) => Accumulator::Pod {
                order: order.clone(),
                product: product.clone(),
                state: vec![vec![1.0; size]],
            },
        };
        Self {
            dimension: 0,
            accumulator,
        }
    }

    /// Number of committed dimensions.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Drops all committed dimensions, returning to the all-ones base.
    pub fn reset(&mut self, storage: &Storage) {
        let size = storage.size();
        self.dimension = 0;
        match &mut self.accumulator {
            Accumulator::Product { state, .. } => {
                state.clear();
                state.resize(size, 1.0);
            }
            Accumulator::OrderDependent { state, .. } | Accumulator::Pod { state, .. } => {
                state.clear();
                state.push(vec![1.0; size]);
            }
        }
    }

    /// Permanently folds the chosen candidate's kernel vector into the
    /// state and advances the dimension counter. Irreversible.
    pub fn commit(&mut self, storage: &Storage, kernel_values: &[f64], gen: u64) {
        let strided = storage.strided(kernel_values, gen);
        let new_coordinate = self.dimension;
        self.dimension += 1;
        match &mut self.accumulator {
            Accumulator::Product { weights, state } => {
                let weight = weights.weight_for_coordinate(new_coordinate);
                for (i, s) in state.iter_mut().enumerate() {
                    *s *= 1.0 + weight * strided.get(i);
                }
            }
            Accumulator::OrderDependent { state, .. } => {
                state.push(vec![0.0; kernel_values.len()]);
                // Update by decreasing order so lower orders are still
                // pre-commit values when read.
                for order in (1..state.len()).rev() {
                    let (lower, upper) = state.split_at_mut(order);
                    let prev = &lower[order - 1];
                    let curr = &mut upper[0];
                    for i in 0..curr.len() {
                        curr[i] += strided.get(i) * prev[i];
                    }
                }
            }
            Accumulator::Pod { product, state, .. } => {
                let pweight = product.weight_for_coordinate(new_coordinate);
                state.push(vec![0.0; kernel_values.len()]);
                for order in (1..state.len()).rev() {
                    let (lower, upper) = state.split_at_mut(order);
                    let prev = &lower[order - 1];
                    let curr = &mut upper[0];
                    for i in 0..curr.len() {
                        curr[i] += pweight * strided.get(i) * prev[i];
                    }
                }
            }
        }
    }

    /// The weighted state vector `q` for the next dimension: the merit
    /// contribution of candidate `a` is the compressed sum of
    /// `q ⊙ strided(ω, a)`. Read-only; safe to call any number of times.
    pub fn weighted_state(&self) -> Vec<f64> {
        let next_coordinate = self.dimension;
        match &self.accumulator {
            Accumulator::Product { weights, state } => {
                let weight = weights.weight_for_coordinate(next_coordinate);
                state.iter().map(|s| weight * s).collect()
            }
            Accumulator::OrderDependent { weights, state } => {
                let mut out = vec![0.0; state[0].len()];
                for (order, vec) in state.iter().enumerate() {
                    let weight = weights.weight_for_order(order + 1);
                    if weight != 0.0 {
                        axpy(weight, vec, &mut out);
                    }
                }
                out
            }
            Accumulator::Pod {
                order: order_weights,
                product,
                state,
            } => {
                let pweight = product.weight_for_coordinate(next_coordinate);
                let mut out = vec![0.0; state[0].len()];
                for (order, vec) in state.iter().enumerate() {
                    let weight = order_weights.weight_for_order(order + 1);
                    if weight != 0.0 {
                        axpy(weight, vec, &mut out);
                    }
                }
                for v in &mut out {
                    *v *= pweight;
                }
                out
            }
        }
    }
}
