//! Proptest strategies for descriptor names and operation tokens

use proptest::prelude::*;

/// CamelCase words such as `CacheStore`
pub fn camel_case_stem_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Z][a-z]{1,8}", 1..4).prop_map(|words| words.concat())
}

/// Conventional suffixes, in any case
pub fn suffix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("Redis".to_string()),
        Just("Godredis".to_string()),
        Just("GODREDIS".to_string()),
        Just("redis".to_string()),
    ]
}

/// Operation names that are plain identifiers, optionally predicates
pub fn operation_name_strategy() -> impl Strategy<Value = String> {
    ("[a-z][a-z_]{0,15}", any::<bool>()).prop_map(|(name, predicate)| {
        if predicate {
            format!("{name}?")
        } else {
            name
        }
    })
}
