//! Storage and index compression for merit-contribution vectors.
//!
//! A merit-contribution vector logically has one entry per lattice point
//! ("virtual" indices `0..n`). Symmetric kernels satisfy ω(x) = ω(1 − x), so
//! the entries at virtual indices `i` and `n − i` are equal and only one of
//! them needs to be stored ("actual" indices `0..size()`). A [`Storage`]
//! translates between the two index spaces and provides permuted views over
//! stored vectors without copying.
//!
//! Embedded lattices additionally group the stored entries by level, so that
//! the entries for the `base^m`-point sub-lattice occupy a prefix of the
//! stored vector. [`Storage::level_ranges`] exposes that partition.

mod sum;

pub use sum::compressed_sum;

use crate::merit::MeritValue;
use crate::size::SizeParam;
use crate::util::mul_mod;

/// Index compression policy.
///
/// Symmetric compression is only sound for symmetric kernels; the caller
/// picks the policy when building the storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// Store all `n` entries.
    None,
    /// Identify virtual indices `i` and `n − i`; store `n / 2 + 1` entries.
    Symmetric,
}

impl Compression {
    /// Number of stored entries for a vector of natural size `n`.
    ///
    /// Under symmetric compression every point up to and including the
    /// middle one carries unique information: `(n + 1) / 2` entries for odd
    /// `n`, and `n / 2 + 1` for even `n` (the midpoint `n / 2` is its own
    /// mirror image and is retained once).
    pub fn size(self, n: u64) -> u64 {
        match self {
            Compression::None => n,
            Compression::Symmetric => {
                if n == 0 {
                    0
                } else {
                    n / 2 + 1
                }
            }
        }
    }

    /// Stored index of the `i`-th natural element: `min(i, n − i)`.
    #[inline]
    pub fn compress_index(self, i: u64, n: u64) -> u64 {
        match self {
            Compression::None => i,
            Compression::Symmetric => i.min(n - i),
        }
    }

    /// How many virtual indices the stored element at index `i` stands for,
    /// given natural size `n`.
    ///
    /// Index 0 is never compressed; when `n` is even the midpoint `n / 2` is
    /// its own mirror image and is not compressed either.
    pub fn index_compression_ratio(self, i: u64, n: u64) -> u64 {
        match self {
            Compression::None => 1,
            Compression::Symmetric => {
                if i == 0 || (n % 2 == 0 && i == n / 2) {
                    1
                } else {
                    2
                }
            }
        }
    }

    /// How many virtual indices each stored element on an embedded level
    /// stands for.
    ///
    /// Only the self-mirror points escape doubling: virtual index 0 (level
    /// 0), and in base 2 the midpoint `n / 2`, which is the single new point
    /// of level 1. So doubling starts at level 2 in base 2 and at level 1
    /// otherwise.
    pub fn level_compression_ratio(self, base: u64, level: u32) -> u64 {
        match self {
            Compression::None => 1,
            Compression::Symmetric => {
                let first_doubled = if base == 2 { 2 } else { 1 };
                if level >= first_doubled {
                    2
                } else {
                    1
                }
            }
        }
    }

    /// Whether this policy identifies mirror-image indices.
    pub fn symmetric(self) -> bool {
        matches!(self, Compression::Symmetric)
    }
}

/// Physical layout of the stored index space.
#[derive(Debug, Clone)]
enum Layout {
    /// Ordinary lattices: stored index `i` holds virtual index `i` (which
    /// already is its own compressed representative).
    Flat,
    /// Embedded lattices: entries grouped by level, ordered by compressed
    /// representative within each level.
    Leveled {
        /// Stored index -> compressed virtual representative.
        virt: Vec<u64>,
        /// Compressed virtual representative -> stored index.
        pos: Vec<usize>,
        /// Half-open stored-index ranges, one per level.
        ranges: Vec<std::ops::Range<usize>>,
    },
}

/// Compression-aware index space for one lattice size.
///
/// Built once per search from the size parameter and compression policy;
/// stateless afterwards.
#[derive(Debug, Clone)]
pub struct Storage {
    size_param: SizeParam,
    compression: Compression,
    layout: Layout,
}

impl Storage {
    /// Builds the storage for a size parameter under a compression policy.
    pub fn new(size_param: SizeParam, compression: Compression) -> Self {
        let layout = match size_param {
            SizeParam::Ordinary { .. } => Layout::Flat,
            SizeParam::Embedded {
                base, max_level, ..
            } => Self::leveled_layout(&size_param, compression, base, max_level),
        };
        Self {
            size_param,
            compression,
            layout,
        }
    }

    fn leveled_layout(
        size_param: &SizeParam,
        compression: Compression,
        base: u64,
        max_level: u32,
    ) -> Layout {
        let n = size_param.num_points();
        let stored = compression.size(n) as usize;
        let mut virt = Vec::with_capacity(stored);
        let mut ranges = Vec::with_capacity(max_level as usize + 1);

        // Level l contributes the points i*base^(max_level-l) with i not
        // divisible by base (plus the origin on level 0). Mirror images
        // always live on the same level, so compression stays level-local.
        let mut level_points = 1u64;
        for level in 0..=max_level {
            let step = n / level_points;
            let start = virt.len();
            let mut reps: Vec<u64> = (0..level_points)
                .filter(|i| level == 0 || i % base != 0)
                .map(|i| compression.compress_index(i * step, n))
                .collect();
            reps.sort_unstable();
            reps.dedup();
            virt.extend_from_slice(&reps);
            ranges.push(start..virt.len());
            level_points *= base;
        }
        debug_assert_eq!(virt.len(), stored);

        let mut pos = vec![0usize; stored];
        for (p, &r) in virt.iter().enumerate() {
            pos[r as usize] = p;
        }
        Layout::Leveled { virt, pos, ranges }
    }

    /// Returns the size parameter this storage was built from.
    pub fn size_param(&self) -> &SizeParam {
        &self.size_param
    }

    /// Returns the compression policy.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Number of stored (compressed) entries.
    pub fn size(&self) -> usize {
        self.compression.size(self.size_param.num_points()) as usize
    }

    /// Number of logical entries, i.e. the number of lattice points.
    pub fn virtual_size(&self) -> u64 {
        self.size_param.num_points()
    }

    /// Virtual representative of the stored entry at index `i`.
    #[inline]
    pub fn virtual_index(&self, i: usize) -> u64 {
        match &self.layout {
            Layout::Flat => i as u64,
            Layout::Leveled { virt, .. } => virt[i],
        }
    }

    /// Stored position of a compressed virtual representative.
    #[inline]
    fn position(&self, rep: u64) -> usize {
        match &self.layout {
            Layout::Flat => rep as usize,
            Layout::Leveled { pos, .. } => pos[rep as usize],
        }
    }

    /// Stored index holding the value for stored entry `i` after a stride
    /// permutation by `stride`.
    #[inline]
    pub fn stride_index(&self, i: usize, stride: u64) -> usize {
        let n = self.virtual_size();
        let v = mul_mod(self.virtual_index(i), stride, n);
        self.position(self.compression.compress_index(v, n))
    }

    /// View of `v` permuted by a stride: element `i` is
    /// `v[(i * stride) mod n]` in compressed terms. Realizes Korobov
    /// generators, where a single integer expands to a full vector via its
    /// powers.
    ///
    /// The input length must equal `size()`.
    pub fn strided<'a>(&'a self, v: &'a [f64], stride: u64) -> Strided<'a> {
        assert_eq!(v.len(), self.size(), "strided: vector length != size()");
        Strided {
            storage: self,
            v,
            stride,
        }
    }

    /// View mapping stored order back to natural point order; element `i` of
    /// the view is the value for lattice point `i / n`.
    ///
    /// The input length must equal `size()`.
    pub fn unpermuted<'a>(&'a self, v: &'a [f64]) -> Unpermuted<'a> {
        assert_eq!(v.len(), self.size(), "unpermuted: vector length != size()");
        Unpermuted { storage: self, v }
    }

    /// Ordered stored-index ranges, one per level, partitioning the stored
    /// space. Ordinary lattices have a single level covering everything.
    pub fn level_ranges(&self) -> Vec<std::ops::Range<usize>> {
        match &self.layout {
            Layout::Flat => vec![0..self.size()],
            Layout::Leveled { ranges, .. } => ranges.clone(),
        }
    }

    /// A merit value of the right shape for this storage, filled with
    /// `value`.
    pub fn create_merit_value(&self, value: f64) -> MeritValue {
        match self.size_param {
            SizeParam::Ordinary { .. } => MeritValue::Scalar(value),
            SizeParam::Embedded { max_level, .. } => {
                MeritValue::PerLevel(vec![value; max_level as usize + 1])
            }
        }
    }
}

/// Lazy stride-permuted view over a stored vector.
#[derive(Debug, Clone, Copy)]
pub struct Strided<'a> {
    storage: &'a Storage,
    v: &'a [f64],
    stride: u64,
}

impl Strided<'_> {
    /// Element at stored index `i`.
    #[inline]
    pub fn get(&self, i: usize) -> f64 {
        self.v[self.storage.stride_index(i, self.stride)]
    }

    /// Number of elements (the stored size).
    pub fn len(&self) -> usize {
        self.v.len()
    }

    /// Whether the view is empty.
    pub fn is_empty(&self) -> bool {
        self.v.is_empty()
    }

    /// Copies the view into an owned vector.
    pub fn materialize(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

/// Lazy natural-order view over a stored vector.
#[derive(Debug, Clone, Copy)]
pub struct Unpermuted<'a> {
    storage: &'a Storage,
    v: &'a [f64],
}

impl Unpermuted<'_> {
    /// Value for lattice point `i / n`.
    #[inline]
    pub fn get(&self, i: u64) -> f64 {
        let n = self.storage.virtual_size();
        let rep = self.storage.compression.compress_index(i, n);
        self.v[self.storage.position(rep)]
    }

    /// Number of elements (the virtual size).
    pub fn len(&self) -> u64 {
        self.storage.virtual_size()
    }

    /// Copies the view into an owned vector in natural point order.
    pub fn materialize(&self) -> Vec<f64> {
        (0..self.len()).map(|i| self.get(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ordinary(n: u64, compression: Compression) -> Storage {
        Storage::new(SizeParam::ordinary(n).unwrap(), compression)
    }

    fn embedded(base: u64, max_level: u32, compression: Compression) -> Storage {
        Storage::new(SizeParam::embedded(base, max_level).unwrap(), compression)
    }

    #[test]
    fn test_uncompressed_sizes() {
        for n in [1u64, 2, 7, 12, 13, 64] {
            let st = ordinary(n, Compression::None);
            assert_eq!(st.size() as u64, n);
            assert_eq!(st.virtual_size(), n);
        }
    }

    #[test]
    fn test_symmetric_sizes() {
        // Odd n: (n + 1) / 2. Even n: n / 2 + 1.
        for n in [3u64, 7, 13, 101] {
            assert_eq!(ordinary(n, Compression::Symmetric).size() as u64, (n + 1) / 2);
        }
        for n in [2u64, 8, 12, 64] {
            assert_eq!(ordinary(n, Compression::Symmetric).size() as u64, n / 2 + 1);
        }
    }

    #[test]
    fn test_compress_index_mirrors() {
        let c = Compression::Symmetric;
        assert_eq!(c.compress_index(3, 13), 3);
        assert_eq!(c.compress_index(10, 13), 3);
        assert_eq!(c.compress_index(0, 13), 0);
        assert_eq!(c.compress_index(4, 8), 4);
    }

    #[test]
    fn test_index_compression_ratio() {
        let c = Compression::Symmetric;
        let ratios: Vec<u64> = (0..c.size(8)).map(|i| c.index_compression_ratio(i, 8)).collect();
        assert_eq!(ratios, vec![1, 2, 2, 2, 1]);
        let ratios: Vec<u64> = (0..c.size(13)).map(|i| c.index_compression_ratio(i, 13)).collect();
        assert_eq!(ratios, vec![1, 2, 2, 2, 2, 2, 2]);
        // Ratios account for every virtual index exactly once
        for n in [8u64, 13] {
            let total: u64 = (0..c.size(n)).map(|i| c.index_compression_ratio(i, n)).sum();
            assert_eq!(total, n);
        }
    }

    #[test]
    fn test_strided_ordinary_uncompressed() {
        let st = ordinary(8, Compression::None);
        let v: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let strided = st.strided(&v, 3);
        let out = strided.materialize();
        let expected: Vec<f64> = (0..8).map(|i| ((i * 3) % 8) as f64).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_strided_symmetric_matches_uncompressed() {
        // The compressed strided view must agree with the uncompressed one
        // for a symmetric value vector.
        let n = 13u64;
        let full: Vec<f64> = (0..n)
            .map(|i| {
                let x = i as f64 / n as f64;
                (x - 0.5).powi(2)
            })
            .collect();
        let st_none = ordinary(n, Compression::None);
        let st_sym = ordinary(n, Compression::Symmetric);
        let half: Vec<f64> = (0..st_sym.size()).map(|i| full[i]).collect();
        for stride in 1..n {
            let a = st_none.strided(&full, stride);
            let b = st_sym.strided(&half, stride);
            for i in 0..st_sym.size() {
                assert!((a.get(i) - b.get(i)).abs() < 1e-15);
            }
        }
    }

    #[test]
    fn test_unpermuted_round_trip() {
        let st = ordinary(12, Compression::Symmetric);
        let v: Vec<f64> = (0..st.size()).map(|i| i as f64).collect();
        let un = st.unpermuted(&v);
        assert_eq!(un.len(), 12);
        for i in 0..12u64 {
            assert_eq!(un.get(i), i.min(12 - i) as f64);
        }
    }

    #[test]
    #[should_panic(expected = "vector length != size()")]
    fn test_strided_wrong_length_panics() {
        let st = ordinary(8, Compression::Symmetric);
        let v = vec![0.0; 8]; // stored size is 5
        let _ = st.strided(&v, 1);
    }

    #[test]
    fn test_level_ranges_partition() {
        for (base, max_level) in [(2u64, 1u32), (2, 3), (2, 6), (3, 2), (3, 4), (5, 3)] {
            for compression in [Compression::None, Compression::Symmetric] {
                let st = embedded(base, max_level, compression);
                let ranges = st.level_ranges();
                assert_eq!(ranges.len(), max_level as usize + 1);
                let mut expected_start = 0;
                for r in &ranges {
                    assert_eq!(r.start, expected_start, "gap or overlap in level ranges");
                    expected_start = r.end;
                }
                assert_eq!(expected_start, st.size(), "ranges do not cover storage");
            }
        }
    }

    #[test]
    fn test_level_ranges_match_compressed_prefix_sizes() {
        // The first l+1 ranges together must cover exactly the compressed
        // size of the level-l sub-lattice.
        let st = embedded(3, 3, Compression::Symmetric);
        let ranges = st.level_ranges();
        let mut points = 1u64;
        for r in &ranges {
            assert_eq!(r.end as u64, Compression::Symmetric.size(points));
            points *= 3;
        }
    }

    #[test]
    fn test_embedded_virtual_indices_unique() {
        let st = embedded(2, 4, Compression::Symmetric);
        let mut reps: Vec<u64> = (0..st.size()).map(|i| st.virtual_index(i)).collect();
        reps.sort_unstable();
        reps.dedup();
        assert_eq!(reps.len(), st.size());
    }

    #[test]
    fn test_embedded_strided_stays_on_level() {
        // A unit stride times a generator coprime to the base keeps every
        // entry on its own level.
        let st = embedded(2, 4, Compression::None);
        let ranges = st.level_ranges();
        for stride in [1u64, 3, 5, 7, 9, 11, 13, 15] {
            for (level, r) in ranges.iter().enumerate() {
                for i in r.clone() {
                    let j = st.stride_index(i, stride);
                    assert!(
                        r.contains(&j),
                        "stride {} moved index {} off level {}",
                        stride,
                        i,
                        level
                    );
                }
            }
        }
    }

    #[test]
    fn test_embedded_unpermuted() {
        let st = embedded(2, 3, Compression::None);
        let v: Vec<f64> = (0..st.size()).map(|i| st.virtual_index(i) as f64).collect();
        let un = st.unpermuted(&v);
        for i in 0..8u64 {
            assert_eq!(un.get(i), i as f64);
        }
    }
}
