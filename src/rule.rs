//! Lattice rule definitions.

use crate::size::SizeParam;

/// A rank-1 lattice rule: a size parameter together with a generating
/// vector.
///
/// During a component-by-component search the generating vector grows by one
/// component per dimension and never shrinks.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeRule {
    size: SizeParam,
    generator: Vec<u64>,
}

impl LatticeRule {
    /// Creates a dimension-0 rule (empty generating vector).
    pub fn new(size: SizeParam) -> Self {
        Self {
            size,
            generator: Vec::new(),
        }
    }

    /// Creates a rule with an explicit generating vector.
    pub fn with_generator(size: SizeParam, generator: Vec<u64>) -> Self {
        Self { size, generator }
    }

    /// Returns the size parameter.
    pub fn size(&self) -> &SizeParam {
        &self.size
    }

    /// Returns the generating vector.
    pub fn generator(&self) -> &[u64] {
        &self.generator
    }

    /// Current dimension (number of generator components).
    pub fn dimension(&self) -> usize {
        self.generator.len()
    }

    /// Appends a generator component for the next dimension.
    pub fn extend(&mut self, component: u64) {
        self.generator.push(component);
    }

    /// Builds the Korobov rule `(1, a, a^2, ...) mod n` of the given
    /// dimension.
    pub fn korobov(size: SizeParam, a: u64, dimension: usize) -> Self {
        let n = size.num_points();
        let mut generator = Vec::with_capacity(dimension);
        let mut power = 1 % n;
        for _ in 0..dimension {
            generator.push(power);
            power = crate::util::mul_mod(power, a, n);
        }
        Self { size, generator }
    }
}

impl std::fmt::Display for LatticeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lattice({}, [", self.size)?;
        for (i, g) in self.generator.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", g)?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend() {
        let size = SizeParam::ordinary(13).unwrap();
        let mut rule = LatticeRule::new(size);
        assert_eq!(rule.dimension(), 0);
        rule.extend(1);
        rule.extend(5);
        assert_eq!(rule.generator(), &[1, 5]);
    }

    #[test]
    fn test_korobov() {
        let size = SizeParam::ordinary(13).unwrap();
        let rule = LatticeRule::korobov(size, 5, 4);
        assert_eq!(rule.generator(), &[1, 5, 25 % 13, 125 % 13]);
    }

    #[test]
    fn test_display() {
        let size = SizeParam::ordinary(8).unwrap();
        let rule = LatticeRule::with_generator(size, vec![1, 3]);
        assert_eq!(rule.to_string(), "lattice(8, [1, 3])");
    }
}
