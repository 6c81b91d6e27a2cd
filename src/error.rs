//! Error types for key encoding and decoding
//!
//! Every public operation returns a `CurveResult`. Invalid input is reported
//! as a recoverable error instead of aborting or truncating the key.

use std::fmt;

/// Coordinate axis, used to point at the offending component of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Errors produced by the Hilbert key codec
#[derive(Debug, thiserror::Error)]
pub enum CurveError {
    #[error("invalid resolution: bits = {bits}, supported range is 1..={max}")]
    InvalidResolution { bits: u32, max: u32 },

    #[error("{axis} coordinate {value} is outside the domain [0, {bound}) for bits = {bits}")]
    CoordinateOutOfDomain {
        axis: Axis,
        value: u32,
        bits: u32,
        bound: u32,
    },

    #[error("key {key} has bits set above the {width}-bit range for bits = {bits}", width = 3 * .bits)]
    KeyOutOfDomain { key: u64, bits: u32 },

    #[error("coordinate arrays differ in length: xs = {xs}, ys = {ys}, zs = {zs}")]
    LengthMismatch { xs: usize, ys: usize, zs: usize },

    #[error("output buffer length {actual} does not match input length {expected}")]
    OutputLengthMismatch { expected: usize, actual: usize },

    #[error("batch element {index} failed: {source}")]
    BatchElement {
        index: usize,
        #[source]
        source: Box<CurveError>,
    },

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type CurveResult<T> = Result<T, CurveError>;

impl CurveError {
    /// Index of the failing element when this error came out of a batch call
    pub fn batch_index(&self) -> Option<usize> {
        match self {
            CurveError::BatchElement { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Innermost error, unwrapping any batch position wrapper
    pub fn root(&self) -> &CurveError {
        match self {
            CurveError::BatchElement { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Helper trait for tagging per-element failures with their batch position
pub trait CurveErrorContext<T> {
    fn at_index(self, index: usize) -> CurveResult<T>;
}

impl<T> CurveErrorContext<T> for CurveResult<T> {
    fn at_index(self, index: usize) -> CurveResult<T> {
        self.map_err(|e| CurveError::BatchElement {
            index,
            source: Box::new(e),
        })
    }
}

/// Create a configuration error
pub fn config_error(message: impl fmt::Display) -> CurveError {
    CurveError::Config {
        message: message.to_string(),
    }
}
