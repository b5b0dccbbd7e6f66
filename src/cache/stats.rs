//! Cache Statistics Module
//!
//! Tracks cache activity: hits, misses, writes and flushes.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::FlushReason;

// == Cache Stats ==
/// Point-in-time snapshot of cache activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of reads that found a value
    pub hits: u64,
    /// Number of reads that found nothing (absent, flushed or empty key)
    pub misses: u64,
    /// Number of writes that stored a value
    pub writes: u64,
    /// Number of writes dropped because the key was empty
    pub skipped_writes: u64,
    /// Flushes caused by the hard entry cap
    pub capacity_flushes: u64,
    /// Flushes caused by the random sweep
    pub sweep_flushes: u64,
    /// Explicit `clear` calls
    pub manual_clears: u64,
    /// Entries discarded across all flushes
    pub evicted_entries: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// When the cache was last emptied
    pub last_flush_at: Option<DateTime<Utc>>,
}

impl CacheStats {
    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Total number of times the cache was emptied, for any reason.
    pub fn total_flushes(&self) -> u64 {
        self.capacity_flushes + self.sweep_flushes + self.manual_clears
    }
}

// == Stats Recorder ==
/// Lock-free counters shared by concurrent readers and writers.
#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    skipped_writes: AtomicU64,
    capacity_flushes: AtomicU64,
    sweep_flushes: AtomicU64,
    manual_clears: AtomicU64,
    evicted_entries: AtomicU64,
}

impl StatsRecorder {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_skipped_write(&self) {
        self.skipped_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_flush(&self, reason: FlushReason, evicted: usize) {
        let counter = match reason {
            FlushReason::Capacity => &self.capacity_flushes,
            FlushReason::Sweep => &self.sweep_flushes,
            FlushReason::Manual => &self.manual_clears,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.evicted_entries
            .fetch_add(evicted as u64, Ordering::Relaxed);
    }

    /// Copies the counters into a snapshot.
    pub(crate) fn snapshot(
        &self,
        total_entries: usize,
        last_flush_at: Option<DateTime<Utc>>,
    ) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            skipped_writes: self.skipped_writes.load(Ordering::Relaxed),
            capacity_flushes: self.capacity_flushes.load(Ordering::Relaxed),
            sweep_flushes: self.sweep_flushes.load(Ordering::Relaxed),
            manual_clears: self.manual_clears.load(Ordering::Relaxed),
            evicted_entries: self.evicted_entries.load(Ordering::Relaxed),
            total_entries,
            last_flush_at,
        }
    }
}
