//! Helpers for building and combining the `extra` channel's key-value maps.

use rustc_hash::FxHashMap;
use serde_json::{Number, Value};

/// Creates an empty extra map using the crate's standard hasher.
#[must_use]
pub fn new_extra_map() -> FxHashMap<String, Value> {
    FxHashMap::default()
}

/// Builds an extra map from an iterator of key/value pairs.
#[must_use]
pub fn extra_map_from_pairs<'a, I>(pairs: I) -> FxHashMap<String, Value>
where
    I: IntoIterator<Item = (&'a str, Value)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Shallow-merges any number of extra maps, later maps winning on key
/// collisions.
#[must_use]
pub fn merge_extra_maps<'a, I>(maps: I) -> FxHashMap<String, Value>
where
    I: IntoIterator<Item = &'a FxHashMap<String, Value>>,
{
    let mut merged = FxHashMap::default();
    for map in maps {
        for (k, v) in map {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}

/// Convenience accessors for the `extra` channel's map type.
pub trait ExtraMapExt {
    fn insert_string(&mut self, key: &str, value: &str);
    fn insert_number<N: Into<Number>>(&mut self, key: &str, value: N);
    fn insert_bool(&mut self, key: &str, value: bool);
    fn get_string(&self, key: &str) -> Option<&str>;
    fn get_number(&self, key: &str) -> Option<Number>;
    fn get_bool(&self, key: &str) -> Option<bool>;
}

impl ExtraMapExt for FxHashMap<String, Value> {
    fn insert_string(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), Value::String(value.to_string()));
    }

    fn insert_number<N: Into<Number>>(&mut self, key: &str, value: N) {
        self.insert(key.to_string(), Value::Number(value.into()));
    }

    fn insert_bool(&mut self, key: &str, value: bool) {
        self.insert(key.to_string(), Value::Bool(value));
    }

    fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn get_number(&self, key: &str) -> Option<Number> {
        self.get(key).and_then(Value::as_number).cloned()
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}
