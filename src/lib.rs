pub mod config;
pub mod error;
pub mod hilbert;

pub use config::CurveConfig;
pub use error::{Axis, CurveError, CurveResult};
pub use hilbert::{
    decode, decode_batch, decode_batch_into, encode, encode_batch, encode_batch_into,
    par_decode_batch, par_encode_batch, CurveIter, HilbertCurve, MAX_BITS, MIN_BITS,
};

// Hilbert keys give a locality-preserving total order over a cubic grid:
// sort particles or cells by key for cache-friendly traversal, or cut the
// key range into contiguous pieces for domain decomposition.
//
// Keys at resolution `bits` have exactly 3 * bits significant bits, so any
// resolution up to MAX_BITS = 21 fits in 63 bits.
