//! Configuration Module
//!
//! Handles loading and validating cache eviction settings, either from
//! defaults or from environment variables.

use std::env::{self, VarError};
use std::str::FromStr;

use crate::error::{CacheError, Result};

// == Defaults ==
/// Default hard cap on the number of entries (`0` disables the cap)
pub const DEFAULT_MAX_ENTRIES: usize = 1024 * 4;

/// Default range size of the sweep draw
pub const DEFAULT_SWEEP_DIVISOR: u32 = 1000;

/// Default upper bound (inclusive) of a draw that triggers a sweep
pub const DEFAULT_SWEEP_THRESHOLD: u32 = 1;

/// Cache eviction configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entry count above which the next write flushes the whole cache
    pub max_entries: usize,
    /// Each write draws a uniform integer in `[0, sweep_divisor)`
    pub sweep_divisor: u32,
    /// A draw at or below this value flushes the whole cache
    pub sweep_threshold: u32,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `VOLATILE_CACHE_MAX_ENTRIES` - Hard entry cap (default: 4096, 0 disables)
    /// - `VOLATILE_CACHE_SWEEP_DIVISOR` - Sweep draw range (default: 1000)
    /// - `VOLATILE_CACHE_SWEEP_THRESHOLD` - Sweep trigger bound (default: 1)
    ///
    /// Unset variables fall back to their defaults; a variable that is set but
    /// cannot be parsed, or a combination that fails validation, is an error.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            max_entries: env_or("VOLATILE_CACHE_MAX_ENTRIES", DEFAULT_MAX_ENTRIES)?,
            sweep_divisor: env_or("VOLATILE_CACHE_SWEEP_DIVISOR", DEFAULT_SWEEP_DIVISOR)?,
            sweep_threshold: env_or("VOLATILE_CACHE_SWEEP_THRESHOLD", DEFAULT_SWEEP_THRESHOLD)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the hard entry cap. `0` disables it.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Sets the sweep draw range and trigger bound.
    pub fn with_sweep(mut self, divisor: u32, threshold: u32) -> Self {
        self.sweep_divisor = divisor;
        self.sweep_threshold = threshold;
        self
    }

    /// Checks that the sweep settings describe a usable draw.
    pub fn validate(&self) -> Result<()> {
        if self.sweep_divisor == 0 {
            return Err(CacheError::InvalidConfig(
                "sweep divisor must be greater than zero".to_string(),
            ));
        }

        if self.sweep_threshold >= self.sweep_divisor {
            return Err(CacheError::InvalidConfig(format!(
                "sweep threshold {} must be below sweep divisor {}",
                self.sweep_threshold, self.sweep_divisor
            )));
        }

        Ok(())
    }

    /// Mean number of writes between two sweep flushes.
    pub fn expected_sweep_interval(&self) -> f64 {
        f64::from(self.sweep_divisor) / (f64::from(self.sweep_threshold) + 1.0)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            sweep_divisor: DEFAULT_SWEEP_DIVISOR,
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!("{} has unparsable value {:?}", name, raw))
        }),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(raw)) => Err(CacheError::InvalidConfig(format!(
            "{} is not valid unicode: {:?}",
            name, raw
        ))),
    }
}
