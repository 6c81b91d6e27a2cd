/// Inverse mapping: Peano-Hilbert key -> grid point
///
/// Decoding replays the encoder's state machine, reading three key bits per
/// level and recovering the octant selector bits from an inverse table.

use lazy_static::lazy_static;

use super::encode::validate_bits;
use super::tables::{next_state, sense_flip, NUM_OCTANTS, NUM_STATES, QUADRANTS};
use crate::error::{CurveError, CurveResult};

/// Maps (state, curve position) back to the (bitx, bity, bitz) selector.
///
/// Built once per process from `QUADRANTS` and read-only afterwards.
#[derive(Debug)]
pub struct InverseLookupCache {
    selectors: [[(u8, u8, u8); NUM_OCTANTS]; NUM_STATES],
}

lazy_static! {
    static ref INVERSE_LOOKUP: InverseLookupCache = InverseLookupCache::build();
}

impl InverseLookupCache {
    fn build() -> Self {
        let mut selectors = [[(0u8, 0u8, 0u8); NUM_OCTANTS]; NUM_STATES];
        for (state, table) in QUADRANTS.iter().enumerate() {
            for (bx, plane) in table.iter().enumerate() {
                for (by, row) in plane.iter().enumerate() {
                    for (bz, &quad) in row.iter().enumerate() {
                        selectors[state][quad as usize] = (bx as u8, by as u8, bz as u8);
                    }
                }
            }
        }
        log::debug!(
            "Built Hilbert inverse lookup cache ({} states x {} octants)",
            NUM_STATES,
            NUM_OCTANTS
        );
        Self { selectors }
    }

    /// Process-wide cache, built on first access
    pub fn global() -> &'static InverseLookupCache {
        &INVERSE_LOOKUP
    }

    /// Selector bits that produce curve position `octant` in `state`
    #[inline(always)]
    pub fn selector(&self, state: u8, octant: u8) -> (u8, u8, u8) {
        self.selectors[state as usize][octant as usize]
    }
}

/// Force the inverse cache to be built now, e.g. before spawning workers
pub fn warm_up() {
    lazy_static::initialize(&INVERSE_LOOKUP);
}

/// Check that `key` has no bits at or above position `3 * bits`
pub fn validate_key(key: u64, bits: u32) -> CurveResult<()> {
    validate_bits(bits)?;
    if key >> (3 * bits) != 0 {
        return Err(CurveError::KeyOutOfDomain { key, bits });
    }
    Ok(())
}

/// Decode a Peano-Hilbert key back into its grid point
pub fn decode(key: u64, bits: u32) -> CurveResult<(u32, u32, u32)> {
    validate_key(key, bits)?;
    Ok(decode_unchecked(key, bits))
}

/// Decode without validating input. Callers must have checked the key.
#[inline]
pub(crate) fn decode_unchecked(key: u64, bits: u32) -> (u32, u32, u32) {
    let cache = InverseLookupCache::global();
    let (mut x, mut y, mut z) = (0u32, 0u32, 0u32);
    let mut state = 0u8;
    let mut sense = 1i8;

    for level in (0..bits).rev() {
        let keypart = ((key >> (3 * level)) & 7) as u8;
        let quad = if sense == 1 { keypart } else { 7 - keypart };

        let (bx, by, bz) = cache.selector(state, quad);
        x = (x << 1) | bx as u32;
        y = (y << 1) | by as u32;
        z = (z << 1) | bz as u32;

        sense *= sense_flip(quad);
        state = next_state(state, quad);
    }

    (x, y, z)
}
