//! Handler parameters.
//!
//! Captured groups and static route parameters end up in one map. Captures
//! go in first and static values are applied on top, so on a name clash the
//! static value is what the handler sees.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named parameters passed to a handler, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Merge captured groups with a route's static parameters.
    pub fn merged<I>(captured: I, statics: &Params) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params: Map<String, Value> = captured
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();

        for (key, value) in statics.iter() {
            params.insert(key.clone(), value.clone());
        }

        Self(params)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a parameter if it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
