/// Forward mapping: grid point -> Peano-Hilbert key
///
/// Walks the octree from the coarsest level to the finest, emitting three
/// key bits per level.

use super::tables::{next_state, octant, sense_flip};
use crate::error::{Axis, CurveError, CurveResult};

/// Smallest supported resolution
pub const MIN_BITS: u32 = 1;

/// Largest supported resolution; `3 * MAX_BITS` key bits fit in an `i64`/`u64`
pub const MAX_BITS: u32 = 21;

/// Check that `bits` is a supported resolution
#[inline]
pub fn validate_bits(bits: u32) -> CurveResult<()> {
    if (MIN_BITS..=MAX_BITS).contains(&bits) {
        Ok(())
    } else {
        Err(CurveError::InvalidResolution {
            bits,
            max: MAX_BITS,
        })
    }
}

/// Exclusive upper bound for each coordinate at resolution `bits` (`2^bits`)
pub fn domain_bound(bits: u32) -> CurveResult<u32> {
    validate_bits(bits)?;
    Ok(1u32 << bits)
}

/// Check that every coordinate of the point lies in `[0, 2^bits)`
pub fn validate_point(x: u32, y: u32, z: u32, bits: u32) -> CurveResult<()> {
    let bound = domain_bound(bits)?;
    for (axis, value) in [(Axis::X, x), (Axis::Y, y), (Axis::Z, z)] {
        if value >= bound {
            return Err(CurveError::CoordinateOutOfDomain {
                axis,
                value,
                bits,
                bound,
            });
        }
    }
    Ok(())
}

/// Encode a 3D point into its Peano-Hilbert key.
///
/// The result has exactly `3 * bits` significant bits; the most significant
/// group of three belongs to the coarsest octree level.
pub fn encode(x: u32, y: u32, z: u32, bits: u32) -> CurveResult<u64> {
    validate_point(x, y, z, bits)?;
    Ok(encode_unchecked(x, y, z, bits))
}

/// Encode without validating input. Callers must have checked the point.
#[inline]
pub(crate) fn encode_unchecked(x: u32, y: u32, z: u32, bits: u32) -> u64 {
    let mut key = 0u64;
    let mut state = 0u8;
    let mut sense = 1i8;

    for level in (0..bits).rev() {
        let bitx = (x >> level) & 1;
        let bity = (y >> level) & 1;
        let bitz = (z >> level) & 1;

        let quad = octant(state, bitx, bity, bitz);
        let digit = if sense == 1 { quad } else { 7 - quad };
        key = (key << 3) | digit as u64;

        sense *= sense_flip(quad);
        state = next_state(state, quad);
    }

    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regression_vector() {
        assert_eq!(encode(7, 126, 255, 8).unwrap(), 14680266);
    }

    #[test]
    fn test_origin_is_zero() {
        for bits in MIN_BITS..=MAX_BITS {
            assert_eq!(encode(0, 0, 0, bits).unwrap(), 0);
        }
    }

    #[test]
    fn test_first_level_order() {
        // Order of the eight cells of the 2x2x2 grid
        let expected = [
            (0, 0, 0),
            (0, 1, 0),
            (1, 1, 0),
            (1, 0, 0),
            (1, 0, 1),
            (1, 1, 1),
            (0, 1, 1),
            (0, 0, 1),
        ];
        for (key, &(x, y, z)) in expected.iter().enumerate() {
            assert_eq!(encode(x, y, z, 1).unwrap(), key as u64);
        }
    }

    #[test]
    fn test_rejects_bad_resolution() {
        assert!(matches!(
            encode(0, 0, 0, 0),
            Err(CurveError::InvalidResolution { bits: 0, .. })
        ));
        assert!(matches!(
            encode(0, 0, 0, MAX_BITS + 1),
            Err(CurveError::InvalidResolution { .. })
        ));
    }

    #[test]
    fn test_bound_is_power_of_two() {
        // 26 < 3^3 but not < 2^3
        assert!(matches!(
            encode(0, 0, 26, 3),
            Err(CurveError::CoordinateOutOfDomain {
                axis: Axis::Z,
                value: 26,
                bound: 8,
                ..
            })
        ));
        assert!(encode(7, 7, 7, 3).is_ok());
        assert!(matches!(
            encode(8, 0, 0, 3),
            Err(CurveError::CoordinateOutOfDomain { axis: Axis::X, .. })
        ));
    }

    #[test]
    fn test_max_resolution_fits_63_bits() {
        let max = (1u32 << MAX_BITS) - 1;
        for &(x, y, z) in &[(max, max, max), (max, 0, max), (0, max, 0)] {
            let key = encode(x, y, z, MAX_BITS).unwrap();
            assert!(key < 1u64 << 63);
        }
    }
}
