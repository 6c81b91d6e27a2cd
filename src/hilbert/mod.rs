//! Peano-Hilbert keys for 3D grid coordinates
//!
//! This module maps integer points of a `2^bits` cubed grid onto positions
//! along a 3D Hilbert curve and back. Unlike a Morton (Z-order) key, two
//! consecutive Hilbert keys always belong to face-adjacent cells, which makes
//! key order a good traversal and partitioning order for spatial data.

pub mod batch;
pub mod curve;
pub mod decode;
pub mod encode;
pub mod tables;

pub use batch::{
    decode_batch, decode_batch_into, encode_batch, encode_batch_into, par_decode_batch,
    par_encode_batch,
};
pub use curve::{CurveIter, HilbertCurve};
pub use decode::{decode, warm_up, InverseLookupCache};
pub use encode::{domain_bound, encode, validate_bits, MAX_BITS, MIN_BITS};

// Both directions run the same finite-state machine over (rotation state,
// sense), starting at (0, +1) and stepping once per octree level:
//
// - the octant along the curve is looked up in the table of the current state
// - odd sense stores the complement 7 - octant, keeping the curve continuous
// - the visited octant drives the next state through one table lookup
