//! Cache Module
//!
//! Provides an in-process string cache that evicts by flushing everything,
//! either when a hard entry cap is exceeded or when a random sweep fires.

mod keyable;
mod policy;
mod sampler;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use keyable::Keyable;
pub use policy::{EvictionPolicy, FlushReason};
pub use sampler::{RandomSampler, Sampler};
pub use stats::CacheStats;
pub use store::VolatileCache;
