//! Flat field -> value snapshot attached to an audit record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// What an admin action touched: field name mapped to a stringified
/// description of the new value.
///
/// This is a snapshot of the written values, not a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet(BTreeMap<String, String>);

impl ChangeSet {
    /// An empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field, stringifying the value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl ToString) {
        self.0.insert(field.into(), value.to_string());
    }

    /// Builder form of [`ChangeSet::insert`].
    pub fn with(mut self, field: impl Into<String>, value: impl ToString) -> Self {
        self.insert(field, value);
        self
    }

    /// Look up the recorded value of a field.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// JSON object form, as stored in the `changes` column.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect(),
        )
    }

    /// Parse the stored JSON object. Non-string values are stringified.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut changes = Self::new();
        if let serde_json::Value::Object(map) = value {
            for (field, value) in map {
                match value {
                    serde_json::Value::String(s) => changes.insert(field.clone(), s),
                    other => changes.insert(field.clone(), other),
                }
            }
        }
        changes
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut changes = Self::new();
        for (field, value) in iter {
            changes.insert(field, value);
        }
        changes
    }
}
