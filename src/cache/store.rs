//! Cache Store Module
//!
//! Main cache engine: a string map behind a reader/writer lock, emptied
//! wholesale by the eviction policy instead of tracking individual entries.

use std::collections::HashMap;
use std::fmt;
use std::mem;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, trace};

use crate::cache::stats::StatsRecorder;
use crate::cache::{CacheStats, EvictionPolicy, FlushReason, Keyable, RandomSampler, Sampler};
use crate::config::CacheConfig;
use crate::error::Result;

// == Entries ==
/// Map state guarded by the cache lock.
#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, String>,
    last_flush_at: Option<DateTime<Utc>>,
}

impl Entries {
    /// Swaps in a fresh map and drops the old one. Returns the evicted count.
    fn flush(&mut self) -> usize {
        let evicted = mem::take(&mut self.map).len();
        self.last_flush_at = Some(Utc::now());
        evicted
    }
}

// == Volatile Cache ==
/// Thread-safe string cache with full-flush eviction.
///
/// Reads share the lock; writes and clears take it exclusively. Values are
/// handed out as owned copies, so a flush never affects values a caller
/// already holds.
pub struct VolatileCache<S = RandomSampler> {
    /// Key-value storage
    entries: RwLock<Entries>,
    /// Random source for the sweep, only locked while `entries` is held for writing
    sampler: Mutex<S>,
    /// Flush rules evaluated on every write
    policy: EvictionPolicy,
    /// Settings the policy was built from
    config: CacheConfig,
    /// Activity counters
    stats: StatsRecorder,
}

impl VolatileCache<RandomSampler> {
    // == Constructor ==
    /// Creates an empty cache with default settings and an entropy-seeded sampler.
    pub fn new() -> Self {
        Self::build(
            CacheConfig::default(),
            EvictionPolicy::default(),
            RandomSampler::from_entropy(),
        )
    }

    /// Creates an empty cache from a configuration.
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_sampler(config, RandomSampler::from_entropy())
    }
}

impl Default for VolatileCache<RandomSampler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sampler> VolatileCache<S> {
    /// Creates an empty cache drawing sweep samples from `sampler`.
    pub fn with_sampler(config: CacheConfig, sampler: S) -> Result<Self> {
        let policy = EvictionPolicy::from_config(&config)?;
        info!(
            "Volatile cache configured: max_entries={}, sweep={}/{}",
            config.max_entries,
            config.sweep_threshold + 1,
            config.sweep_divisor
        );
        Ok(Self::build(config, policy, sampler))
    }

    fn build(config: CacheConfig, policy: EvictionPolicy, sampler: S) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            sampler: Mutex::new(sampler),
            policy,
            config,
            stats: StatsRecorder::default(),
        }
    }

    // == Read ==
    /// Looks up the value cached for `key_source`.
    ///
    /// Returns `None` when the key is empty, was never written, or was
    /// flushed. Lookups do not influence eviction.
    pub fn read<K: Keyable + ?Sized>(&self, key_source: &K) -> Option<String> {
        let key = key_source.cache_key();
        if key.is_empty() {
            trace!("Read with empty cache key treated as miss");
            self.stats.record_miss();
            return None;
        }

        let value = self.entries.read().map.get(&key).cloned();

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Write ==
    /// Stores `value` under the key derived from `key_source`, overwriting
    /// any previous value.
    ///
    /// The eviction policy runs first, so the value being written always
    /// survives its own write. An empty key drops the value without taking
    /// the lock or running the policy.
    pub fn write<K: Keyable + ?Sized>(&self, key_source: &K, value: impl Into<String>) {
        let key = key_source.cache_key();
        if key.is_empty() {
            trace!("Write with empty cache key dropped");
            self.stats.record_skipped_write();
            return;
        }

        let mut entries = self.entries.write();

        let len = entries.map.len();
        let decision = self.policy.evaluate(len, &mut *self.sampler.lock());
        if let Some(reason) = decision {
            let evicted = entries.flush();
            self.stats.record_flush(reason, evicted);
            debug!(%reason, evicted, "Cache flushed");
        }

        entries.map.insert(key, value.into());
        self.stats.record_write();
    }

    // == Clear ==
    /// Empties the cache by replacing the map with a new one.
    pub fn clear(&self) {
        let evicted = self.entries.write().flush();
        self.stats.record_flush(FlushReason::Manual, evicted);
        debug!(reason = %FlushReason::Manual, evicted, "Cache flushed");
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.read();
        self.stats.snapshot(entries.map.len(), entries.last_flush_at)
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.read().map.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().map.is_empty()
    }

    /// Returns the settings this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }
}

impl<S> fmt::Debug for VolatileCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolatileCache")
            .field("config", &self.config)
            .field("len", &self.entries.read().map.len())
            .finish_non_exhaustive()
    }
}
