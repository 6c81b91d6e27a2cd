//! Curve configuration
//!
//! Resolution and batch tuning can be read from TOML, e.g.
//!
//! ```toml
//! bits = 10
//! parallel_threshold = 4096
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{config_error, CurveResult};
use crate::hilbert::validate_bits;

/// Default resolution: a 1024^3 grid
pub const DEFAULT_BITS: u32 = 10;

/// Batches at least this long are processed on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Octree levels per axis
    pub bits: u32,
    pub parallel_threshold: usize,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_BITS,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl CurveConfig {
    pub fn from_toml_str(raw: &str) -> CurveResult<Self> {
        let config: CurveConfig = toml::from_str(raw).map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file
    pub fn load(path: impl AsRef<Path>) -> CurveResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        log::info!(
            "Loaded curve config from {}: bits = {}, parallel_threshold = {}",
            path.display(),
            config.bits,
            config.parallel_threshold
        );
        Ok(config)
    }

    pub fn validate(&self) -> CurveResult<()> {
        validate_bits(self.bits)
    }

    pub fn to_toml_string(&self) -> CurveResult<String> {
        toml::to_string(self).map_err(config_error)
    }
}
