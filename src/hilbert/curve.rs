use super::batch::{decode_batch, encode_batch, par_decode_batch, par_encode_batch};
use super::decode::{decode, decode_unchecked};
use super::encode::{encode, validate_bits};
use crate::config::{CurveConfig, DEFAULT_PARALLEL_THRESHOLD};
use crate::error::CurveResult;

/// A Peano-Hilbert curve over a `2^bits` cubed grid
///
/// Holds a resolution that has already been validated, so callers working at
/// a fixed resolution only deal with coordinate errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HilbertCurve {
    bits: u32,
    parallel_threshold: usize,
}

impl HilbertCurve {
    pub fn new(bits: u32) -> CurveResult<Self> {
        validate_bits(bits)?;
        Ok(Self {
            bits,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        })
    }

    pub fn from_config(config: &CurveConfig) -> CurveResult<Self> {
        Ok(Self::new(config.bits)?.with_parallel_threshold(config.parallel_threshold))
    }

    /// Minimum batch length at which the `_auto` helpers switch to rayon
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Cells per axis (`2^bits`)
    pub fn side(&self) -> u32 {
        1 << self.bits
    }

    /// Total number of grid cells (`8^bits`)
    pub fn num_cells(&self) -> u64 {
        1 << (3 * self.bits)
    }

    /// Largest key produced at this resolution
    pub fn max_key(&self) -> u64 {
        self.num_cells() - 1
    }

    pub fn encode(&self, x: u32, y: u32, z: u32) -> CurveResult<u64> {
        encode(x, y, z, self.bits)
    }

    pub fn decode(&self, key: u64) -> CurveResult<(u32, u32, u32)> {
        decode(key, self.bits)
    }

    pub fn encode_batch(&self, xs: &[u32], ys: &[u32], zs: &[u32]) -> CurveResult<Vec<u64>> {
        encode_batch(xs, ys, zs, self.bits)
    }

    pub fn decode_batch(&self, keys: &[u64]) -> CurveResult<(Vec<u32>, Vec<u32>, Vec<u32>)> {
        decode_batch(keys, self.bits)
    }

    /// Encode a batch, going parallel once it reaches the configured threshold
    pub fn encode_batch_auto(
        &self,
        xs: &[u32],
        ys: &[u32],
        zs: &[u32],
    ) -> CurveResult<Vec<u64>> {
        if xs.len() >= self.parallel_threshold {
            par_encode_batch(xs, ys, zs, self.bits)
        } else {
            encode_batch(xs, ys, zs, self.bits)
        }
    }

    /// Decode a batch, going parallel once it reaches the configured threshold
    pub fn decode_batch_auto(&self, keys: &[u64]) -> CurveResult<(Vec<u32>, Vec<u32>, Vec<u32>)> {
        if keys.len() >= self.parallel_threshold {
            par_decode_batch(keys, self.bits)
        } else {
            decode_batch(keys, self.bits)
        }
    }

    /// Iterate over every grid cell in curve order
    pub fn iter(&self) -> CurveIter {
        CurveIter {
            bits: self.bits,
            front: 0,
            back: self.num_cells(),
        }
    }
}

impl IntoIterator for &HilbertCurve {
    type Item = (u32, u32, u32);
    type IntoIter = CurveIter;

    fn into_iter(self) -> CurveIter {
        self.iter()
    }
}

/// Iterator over the cells of a grid in Peano-Hilbert order
/// Consecutive items are face-adjacent cells.
#[derive(Debug, Clone)]
pub struct CurveIter {
    bits: u32,
    front: u64,
    back: u64,
}

impl Iterator for CurveIter {
    type Item = (u32, u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let point = decode_unchecked(self.front, self.bits);
        self.front += 1;
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back - self.front).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for CurveIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(decode_unchecked(self.back, self.bits))
    }
}

impl ExactSizeIterator for CurveIter {}
