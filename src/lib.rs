//! Volatile Cache - A lightweight in-process string cache
//!
//! Maps caller-derived keys to string values behind a reader/writer lock and
//! evicts by flushing the whole map, either past a hard entry cap or at random.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheStats, Keyable, RandomSampler, Sampler, VolatileCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
