/// Batch encoding/decoding over parallel coordinate arrays
///
/// Every element is handled independently. Calls are all-or-nothing: inputs
/// are validated up front and outputs are only written once every element is
/// known to be valid. A failure reports the lowest failing index.

use rayon::prelude::*;

use super::decode::{decode_unchecked, validate_key, warm_up};
use super::encode::{encode_unchecked, validate_bits, validate_point};
use crate::error::{CurveError, CurveErrorContext, CurveResult};

fn check_input_lengths(xs: &[u32], ys: &[u32], zs: &[u32]) -> CurveResult<usize> {
    if xs.len() != ys.len() || xs.len() != zs.len() {
        return Err(CurveError::LengthMismatch {
            xs: xs.len(),
            ys: ys.len(),
            zs: zs.len(),
        });
    }
    Ok(xs.len())
}

fn check_output_length(expected: usize, actual: usize) -> CurveResult<()> {
    if expected != actual {
        return Err(CurveError::OutputLengthMismatch { expected, actual });
    }
    Ok(())
}

fn validate_points(xs: &[u32], ys: &[u32], zs: &[u32], bits: u32) -> CurveResult<()> {
    for (i, ((&x, &y), &z)) in xs.iter().zip(ys).zip(zs).enumerate() {
        validate_point(x, y, z, bits).at_index(i)?;
    }
    Ok(())
}

fn par_validate_points(xs: &[u32], ys: &[u32], zs: &[u32], bits: u32) -> CurveResult<()> {
    let failing = (0..xs.len())
        .into_par_iter()
        .position_first(|i| validate_point(xs[i], ys[i], zs[i], bits).is_err());
    match failing {
        Some(i) => validate_point(xs[i], ys[i], zs[i], bits).at_index(i),
        None => Ok(()),
    }
}

fn validate_keys(keys: &[u64], bits: u32) -> CurveResult<()> {
    for (i, &key) in keys.iter().enumerate() {
        validate_key(key, bits).at_index(i)?;
    }
    Ok(())
}

fn par_validate_keys(keys: &[u64], bits: u32) -> CurveResult<()> {
    let failing = keys
        .par_iter()
        .position_first(|&key| validate_key(key, bits).is_err());
    match failing {
        Some(i) => validate_key(keys[i], bits).at_index(i),
        None => Ok(()),
    }
}

/// Encode each `(xs[i], ys[i], zs[i])` into `out[i]`
pub fn encode_batch_into(
    xs: &[u32],
    ys: &[u32],
    zs: &[u32],
    bits: u32,
    out: &mut [u64],
) -> CurveResult<()> {
    let len = check_input_lengths(xs, ys, zs)?;
    check_output_length(len, out.len())?;
    validate_bits(bits)?;
    validate_points(xs, ys, zs, bits)?;

    for (i, key) in out.iter_mut().enumerate() {
        *key = encode_unchecked(xs[i], ys[i], zs[i], bits);
    }
    Ok(())
}

/// Encode parallel coordinate arrays into a vector of keys
pub fn encode_batch(xs: &[u32], ys: &[u32], zs: &[u32], bits: u32) -> CurveResult<Vec<u64>> {
    let mut keys = vec![0u64; xs.len()];
    encode_batch_into(xs, ys, zs, bits, &mut keys)?;
    Ok(keys)
}

/// Decode each `keys[i]` into `(xs[i], ys[i], zs[i])`
pub fn decode_batch_into(
    keys: &[u64],
    bits: u32,
    xs: &mut [u32],
    ys: &mut [u32],
    zs: &mut [u32],
) -> CurveResult<()> {
    check_output_length(keys.len(), xs.len())?;
    check_output_length(keys.len(), ys.len())?;
    check_output_length(keys.len(), zs.len())?;
    validate_bits(bits)?;
    validate_keys(keys, bits)?;

    for (i, &key) in keys.iter().enumerate() {
        let (x, y, z) = decode_unchecked(key, bits);
        xs[i] = x;
        ys[i] = y;
        zs[i] = z;
    }
    Ok(())
}

/// Decode a slice of keys into parallel coordinate vectors
pub fn decode_batch(keys: &[u64], bits: u32) -> CurveResult<(Vec<u32>, Vec<u32>, Vec<u32>)> {
    let n = keys.len();
    let (mut xs, mut ys, mut zs) = (vec![0u32; n], vec![0u32; n], vec![0u32; n]);
    decode_batch_into(keys, bits, &mut xs, &mut ys, &mut zs)?;
    Ok((xs, ys, zs))
}

/// Rayon-parallel `encode_batch`; results are identical to the sequential path
pub fn par_encode_batch(xs: &[u32], ys: &[u32], zs: &[u32], bits: u32) -> CurveResult<Vec<u64>> {
    check_input_lengths(xs, ys, zs)?;
    validate_bits(bits)?;
    par_validate_points(xs, ys, zs, bits)?;

    let keys: Vec<u64> = xs
        .par_iter()
        .zip(ys.par_iter())
        .zip(zs.par_iter())
        .map(|((&x, &y), &z)| encode_unchecked(x, y, z, bits))
        .collect();
    log::trace!("Encoded {} points in parallel at {} bits", xs.len(), bits);
    Ok(keys)
}

/// Rayon-parallel `decode_batch`; results are identical to the sequential path
pub fn par_decode_batch(keys: &[u64], bits: u32) -> CurveResult<(Vec<u32>, Vec<u32>, Vec<u32>)> {
    validate_bits(bits)?;
    par_validate_keys(keys, bits)?;

    // Build the inverse table before the workers race for it
    warm_up();

    let n = keys.len();
    let (mut xs, mut ys, mut zs) = (vec![0u32; n], vec![0u32; n], vec![0u32; n]);
    xs.par_iter_mut()
        .zip(ys.par_iter_mut())
        .zip(zs.par_iter_mut())
        .zip(keys.par_iter())
        .for_each(|(((x, y), z), &key)| {
            let (dx, dy, dz) = decode_unchecked(key, bits);
            *x = dx;
            *y = dy;
            *z = dz;
        });
    log::trace!("Decoded {} keys in parallel at {} bits", n, bits);
    Ok((xs, ys, zs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilbert::{decode, encode};

    #[test]
    fn test_empty_batch() {
        assert!(encode_batch(&[], &[], &[], 4).unwrap().is_empty());
        let (xs, ys, zs) = decode_batch(&[], 4).unwrap();
        assert!(xs.is_empty() && ys.is_empty() && zs.is_empty());
    }

    #[test]
    fn test_batch_matches_pointwise() {
        let xs = [0, 7, 3, 15];
        let ys = [0, 12, 9, 15];
        let zs = [0, 1, 14, 0];
        let keys = encode_batch(&xs, &ys, &zs, 4).unwrap();
        for i in 0..xs.len() {
            assert_eq!(keys[i], encode(xs[i], ys[i], zs[i], 4).unwrap());
            assert_eq!(decode(keys[i], 4).unwrap(), (xs[i], ys[i], zs[i]));
        }
        let (dx, dy, dz) = decode_batch(&keys, 4).unwrap();
        assert_eq!((dx.as_slice(), dy.as_slice(), dz.as_slice()), (&xs[..], &ys[..], &zs[..]));
    }

    #[test]
    fn test_reports_first_failing_index() {
        let xs = [0, 1, 16, 2, 99];
        let ys = [0; 5];
        let zs = [0; 5];
        let err = encode_batch(&xs, &ys, &zs, 4).unwrap_err();
        assert_eq!(err.batch_index(), Some(2));
        assert!(matches!(err.root(), CurveError::CoordinateOutOfDomain { value: 16, .. }));

        let err = par_encode_batch(&xs, &ys, &zs, 4).unwrap_err();
        assert_eq!(err.batch_index(), Some(2));
    }

    #[test]
    fn test_failed_batch_leaves_output_untouched() {
        let mut out = [42u64; 3];
        let res = encode_batch_into(&[1, 2, 300], &[0, 0, 0], &[0, 0, 0], 8, &mut out);
        assert!(res.is_err());
        assert_eq!(out, [42; 3]);

        let (mut xs, mut ys, mut zs) = ([9u32; 2], [9u32; 2], [9u32; 2]);
        let res = decode_batch_into(&[1, 1 << 12], 4, &mut xs, &mut ys, &mut zs);
        assert_eq!(res.unwrap_err().batch_index(), Some(1));
        assert_eq!(xs, [9; 2]);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(matches!(
            encode_batch(&[0, 1], &[0], &[0, 1], 4),
            Err(CurveError::LengthMismatch { xs: 2, ys: 1, zs: 2 })
        ));
        let mut out = [0u64; 1];
        assert!(matches!(
            encode_batch_into(&[0, 1], &[0, 1], &[0, 1], 4, &mut out),
            Err(CurveError::OutputLengthMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_invalid_resolution_is_not_per_element() {
        let err = encode_batch(&[], &[], &[], 0).unwrap_err();
        assert!(matches!(err, CurveError::InvalidResolution { bits: 0, .. }));
        assert!(par_decode_batch(&[0], 22).is_err());
    }
}
