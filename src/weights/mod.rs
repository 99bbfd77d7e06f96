//! Projection weights.
//!
//! Weights assign a non-negative importance to every coordinate subset. The
//! core consumes them read-only; only the structured families that admit an
//! incremental coordinate-uniform state are represented:
//!
//! - product weights: `γ_u = Π_{j ∈ u} γ_j`
//! - order-dependent weights: `γ_u = Γ_{|u|}`
//! - POD weights: `γ_u = Γ_{|u|} Π_{j ∈ u} γ_j`

/// Per-coordinate weights with a default for coordinates past the explicit
/// list.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductWeights {
    weights: Vec<f64>,
    default_weight: f64,
}

impl ProductWeights {
    /// Creates product weights from explicit per-coordinate values; further
    /// coordinates get `default_weight`.
    pub fn new(weights: Vec<f64>, default_weight: f64) -> Self {
        Self {
            weights,
            default_weight,
        }
    }

    /// Uniform product weights.
    pub fn uniform(weight: f64) -> Self {
        Self::new(Vec::new(), weight)
    }

    /// Weight of coordinate `j` (0-based).
    pub fn weight_for_coordinate(&self, j: usize) -> f64 {
        self.weights.get(j).copied().unwrap_or(self.default_weight)
    }
}

/// Per-order weights with a default for orders past the explicit list.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDependentWeights {
    weights: Vec<f64>,
    default_weight: f64,
}

impl OrderDependentWeights {
    /// Creates order-dependent weights; entry `k - 1` of `weights` is the
    /// weight of projection order `k`.
    pub fn new(weights: Vec<f64>, default_weight: f64) -> Self {
        Self {
            weights,
            default_weight,
        }
    }

    /// Uniform order-dependent weights.
    pub fn uniform(weight: f64) -> Self {
        Self::new(Vec::new(), weight)
    }

    /// Weight of projection order `k` (1-based).
    pub fn weight_for_order(&self, k: usize) -> f64 {
        debug_assert!(k >= 1);
        self.weights
            .get(k - 1)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

/// The weight families supported by the coordinate-uniform engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Weights {
    /// `γ_u = Π_{j ∈ u} γ_j`.
    Product(ProductWeights),
    /// `γ_u = Γ_{|u|}`.
    OrderDependent(OrderDependentWeights),
    /// `γ_u = Γ_{|u|} Π_{j ∈ u} γ_j`.
    Pod(OrderDependentWeights, ProductWeights),
}

impl Weights {
    /// Weight of an explicit coordinate subset (0-based coordinates).
    /// Used by the brute-force reference evaluation, not by the incremental
    /// engine.
    pub fn weight_for_projection(&self, projection: &[usize]) -> f64 {
        match self {
            Weights::Product(p) => projection
                .iter()
                .map(|&j| p.weight_for_coordinate(j))
                .product(),
            Weights::OrderDependent(o) => o.weight_for_order(projection.len()),
            Weights::Pod(o, p) => {
                o.weight_for_order(projection.len())
                    * projection
                        .iter()
                        .map(|&j| p.weight_for_coordinate(j))
                        .product::<f64>()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_weights() {
        let w = ProductWeights::new(vec![0.9, 0.5], 0.1);
        assert_eq!(w.weight_for_coordinate(0), 0.9);
        assert_eq!(w.weight_for_coordinate(1), 0.5);
        assert_eq!(w.weight_for_coordinate(7), 0.1);
    }

    #[test]
    fn test_order_dependent_weights() {
        let w = OrderDependentWeights::new(vec![1.0, 0.25], 0.0);
        assert_eq!(w.weight_for_order(1), 1.0);
        assert_eq!(w.weight_for_order(2), 0.25);
        assert_eq!(w.weight_for_order(3), 0.0);
    }

    #[test]
    fn test_projection_weights() {
        let w = Weights::Product(ProductWeights::new(vec![0.5, 0.5], 1.0));
        assert_eq!(w.weight_for_projection(&[0, 1]), 0.25);

        let w = Weights::Pod(
            OrderDependentWeights::uniform(2.0),
            ProductWeights::uniform(0.5),
        );
        assert_eq!(w.weight_for_projection(&[0, 3]), 2.0 * 0.25);
    }
}
