//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a plain HashMap model.

use proptest::prelude::*;
use std::collections::HashMap;

use crate::cache::{Sampler, VolatileCache};
use crate::config::CacheConfig;

// == Test Configuration ==
const TEST_MAX_ENTRIES: usize = 100;

/// Sampler whose draws never reach the sweep threshold.
struct NeverSweep;

impl Sampler for NeverSweep {
    fn sample(&mut self, bound: u32) -> u32 {
        bound - 1
    }
}

fn quiet_cache(max_entries: usize) -> VolatileCache<NeverSweep> {
    let config = CacheConfig::default().with_max_entries(max_entries);
    VolatileCache::with_sampler(config, NeverSweep).unwrap()
}

// == Strategies ==
/// Generates non-empty cache keys
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,16}".prop_map(|s| s)
}

/// Generates cache values, including the empty string
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,64}".prop_map(|s| s)
}

#[derive(Debug, Clone)]
enum CacheOp {
    Write { key: String, value: String },
    Read { key: String },
    Clear,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (valid_key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Write { key, value }),
        4 => valid_key_strategy().prop_map(|key| CacheOp::Read { key }),
        1 => Just(CacheOp::Clear),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Without any eviction firing, the cache behaves exactly like a map that
    // is emptied on clear.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..100)) {
        let cache = quiet_cache(0);
        let mut model: HashMap<String, String> = HashMap::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Write { key, value } => {
                    cache.write(&key, value.clone());
                    model.insert(key, value);
                }
                CacheOp::Read { key } => {
                    let expected = model.get(&key).cloned();
                    if expected.is_some() {
                        expected_hits += 1;
                    } else {
                        expected_misses += 1;
                    }
                    prop_assert_eq!(cache.read(&key), expected);
                }
                CacheOp::Clear => {
                    cache.clear();
                    model.clear();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, model.len(), "Total entries mismatch");
    }

    // A written value reads back unchanged.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in value_strategy()) {
        let cache = quiet_cache(TEST_MAX_ENTRIES);

        cache.write(&key, value.clone());

        prop_assert_eq!(cache.read(&key), Some(value), "Round-trip value mismatch");
    }

    // The last write to a key wins.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let cache = quiet_cache(TEST_MAX_ENTRIES);

        cache.write(&key, value1);
        cache.write(&key, value2.clone());

        prop_assert_eq!(cache.read(&key), Some(value2), "Overwrite should return new value");
        prop_assert_eq!(cache.len(), 1, "Should have exactly one entry after overwrite");
    }

    // An empty-key write leaves every other key as it was, even when the
    // map is over the cap and a real write would flush it.
    #[test]
    fn prop_empty_key_is_noop(
        entries in prop::collection::vec((valid_key_strategy(), value_strategy()), 0..20),
        ghost in value_strategy(),
        max_entries in 1usize..4
    ) {
        let cache = quiet_cache(max_entries);
        for (key, value) in &entries {
            cache.write(key, value.clone());
        }
        let snapshot: Vec<(String, Option<String>)> = entries
            .iter()
            .map(|(key, _)| (key.clone(), cache.read(key)))
            .collect();

        cache.write("", ghost);

        prop_assert_eq!(cache.read(""), None);
        for (key, before) in snapshot {
            prop_assert_eq!(cache.read(&key), before, "Key {} changed", key);
        }
    }

    // The map can only ever hold one entry more than the cap: the write that
    // finds it over the cap starts again from empty.
    #[test]
    fn prop_capacity_enforcement(
        keys in prop::collection::vec(valid_key_strategy(), 1..200),
        max_entries in 1usize..20
    ) {
        let cache = quiet_cache(max_entries);

        for key in keys {
            cache.write(&key, "value");
            prop_assert!(
                cache.len() <= max_entries + 1,
                "Cache size {} exceeds cap {} by more than one",
                cache.len(),
                max_entries
            );
            prop_assert_eq!(cache.read(&key), Some("value".to_string()));
        }
    }
}
