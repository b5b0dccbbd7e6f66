//! Cache Key Module
//!
//! Defines the capability callers implement to turn their values into cache keys.

// == Keyable ==
/// A value that can derive its own cache key.
///
/// The key must be deterministic: values with the same logical content must
/// produce the same key. The cache treats the key as an opaque string and
/// never builds one itself. An empty key means "not cacheable" and turns
/// reads and writes into misses.
pub trait Keyable {
    /// Returns the cache key for this value.
    fn cache_key(&self) -> String;
}

impl Keyable for str {
    fn cache_key(&self) -> String {
        self.to_owned()
    }
}

impl Keyable for String {
    fn cache_key(&self) -> String {
        self.clone()
    }
}
