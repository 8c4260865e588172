//! # State
//!
//! [`State`] is the component's typed mirror of its attributes. Every schema
//! attribute always has an entry; other keys may be stored too (loading flags,
//! cached data) and are never written to the attribute store.
//!
//! [`Patch`] is a partial update: an ordered list of `(name, value)` pairs that
//! is shallow-merged into state. Keys not in the patch keep their value.

use crate::attributes::{AttrValue, Schema};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    values: BTreeMap<String, AttrValue>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// State holding every schema default.
    pub fn from_defaults(schema: &Schema) -> Self {
        let values = schema
            .iter()
            .map(|spec| (spec.name.clone(), spec.default.clone()))
            .collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(AttrValue::as_bool)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(AttrValue::as_str)
    }

    pub fn get_json(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(AttrValue::as_json)
    }

    /// Deserialize a stored value into `T`. `Ok(None)` if the key is unset
    /// or the value is [`AttrValue::Missing`].
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.get(name) {
            Some(value) => value.deserialize(),
            None => Ok(None),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Set a single entry, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) -> Option<AttrValue> {
        self.values.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.values.remove(name)
    }

    /// Shallow merge: every key in the patch overwrites, everything else stays.
    pub fn merge(&mut self, patch: Patch) {
        for (name, value) in patch.entries {
            self.values.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A partial state update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patch {
    entries: Vec<(String, AttrValue)>,
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an entry. Order of first insertion is kept.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut AttrValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Every entry of a state, e.g. for a full attribute sync.
impl From<&State> for Patch {
    fn from(state: &State) -> Self {
        Self {
            entries: state
                .values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Patch {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut patch = Patch::new();
        for (k, v) in iter {
            patch.insert(k, v.into());
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_cover_every_schema_key() {
        let schema = Schema::builder()
            .bool("open", false)
            .json("count", json!(0))
            .build();
        let state = State::from_defaults(&schema);
        assert_eq!(state.len(), 2);
        assert_eq!(state.get_bool("open"), Some(false));
        assert_eq!(state.get_json("count"), Some(&json!(0)));
    }

    #[test]
    fn merge_is_shallow() {
        let mut state = State::new();
        state.insert("open", AttrValue::Bool(false));
        state.insert("label", AttrValue::Str("a".into()));

        state.merge(Patch::new().set("open", true).set("extra", json!([1])));

        assert_eq!(state.get_bool("open"), Some(true));
        assert_eq!(state.get_str("label"), Some("a"));
        assert_eq!(state.get_json("extra"), Some(&json!([1])));
    }

    #[test]
    fn patch_set_replaces_but_keeps_position() {
        let patch = Patch::new().set("a", 1).set("b", 2).set("a", 3);
        let entries: Vec<_> = patch.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), AttrValue::from(3)),
                ("b".to_string(), AttrValue::from(2)),
            ]
        );
    }

    #[test]
    fn get_as_deserializes() {
        let mut state = State::new();
        state.insert("items", AttrValue::Json(json!(["x", "y"])));
        state.insert("gone", AttrValue::Missing);

        let items: Option<Vec<String>> = state.get_as("items").unwrap();
        assert_eq!(items, Some(vec!["x".to_string(), "y".to_string()]));

        let gone: Option<Vec<String>> = state.get_as("gone").unwrap();
        assert_eq!(gone, None);

        let unset: Option<u32> = state.get_as("unset").unwrap();
        assert_eq!(unset, None);
    }

    #[test]
    fn patch_from_state_copies_all_entries() {
        let mut state = State::new();
        state.insert("a", AttrValue::Bool(true));
        state.insert("b", AttrValue::Str("x".into()));
        let patch = Patch::from(&state);
        assert_eq!(patch.len(), 2);
        assert_eq!(patch.get("b"), Some(&AttrValue::Str("x".into())));
    }

    #[test]
    fn patch_collects_from_pairs() {
        let patch: Patch = vec![("open", true), ("closed", false)].into_iter().collect();
        assert_eq!(patch.get("open"), Some(&AttrValue::Bool(true)));
        assert_eq!(patch.len(), 2);
    }
}
