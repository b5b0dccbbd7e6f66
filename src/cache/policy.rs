//! Eviction Policy Module
//!
//! Decides when a write must flush the whole cache. There is no per-entry
//! bookkeeping: either the entry count is over the hard cap, or a random
//! draw falls under the sweep threshold.

use std::fmt;

use serde::Serialize;

use crate::cache::Sampler;
use crate::config::CacheConfig;
use crate::error::Result;

// == Flush Reason ==
/// Why the cache was emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlushReason {
    /// Entry count exceeded the hard cap
    Capacity,
    /// Random sweep fired
    Sweep,
    /// Caller invoked `clear`
    Manual,
}

impl fmt::Display for FlushReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlushReason::Capacity => "capacity",
            FlushReason::Sweep => "sweep",
            FlushReason::Manual => "manual",
        };
        f.write_str(name)
    }
}

// == Eviction Policy ==
/// Full-flush eviction rules evaluated at the start of every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionPolicy {
    max_entries: usize,
    sweep_divisor: u32,
    sweep_threshold: u32,
}

impl EvictionPolicy {
    // == Constructor ==
    /// Builds a policy from a configuration, rejecting unusable sweep settings.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            max_entries: config.max_entries,
            sweep_divisor: config.sweep_divisor,
            sweep_threshold: config.sweep_threshold,
        })
    }

    /// Returns true when the hard cap is enabled and `len` is above it.
    pub fn exceeds_capacity(&self, len: usize) -> bool {
        self.max_entries > 0 && len > self.max_entries
    }

    /// Returns true when a sweep draw should flush the cache.
    pub fn sweep_fires(&self, draw: u32) -> bool {
        draw <= self.sweep_threshold
    }

    // == Evaluate ==
    /// Decides whether the next write must flush the cache.
    ///
    /// The hard cap is checked first; the sampler is only consulted when the
    /// cap does not fire, so each write consumes at most one draw.
    pub fn evaluate<S: Sampler + ?Sized>(&self, len: usize, sampler: &mut S) -> Option<FlushReason> {
        if self.exceeds_capacity(len) {
            return Some(FlushReason::Capacity);
        }

        if self.sweep_fires(sampler.sample(self.sweep_divisor)) {
            return Some(FlushReason::Sweep);
        }

        None
    }
}

impl Default for EvictionPolicy {
    fn default() -> Self {
        let config = CacheConfig::default();
        Self {
            max_entries: config.max_entries,
            sweep_divisor: config.sweep_divisor,
            sweep_threshold: config.sweep_threshold,
        }
    }
}
