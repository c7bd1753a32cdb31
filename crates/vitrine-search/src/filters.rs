//! Filter sets: one chosen value per attribute

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

/// Untrusted attribute/value mapping as produced by interpretation.
///
/// Keys are raw strings; anything that is not a known attribute is dropped
/// during validation.
pub type CandidateFilters = BTreeMap<String, String>;

/// A partial assignment of values to attributes.
///
/// Ordered by attribute priority so query strings and audit output are stable.
/// A present key always carries a non-empty value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    values: BTreeMap<Attribute, String>,
}

impl FilterSet {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `attribute` to `value`. Empty values are ignored; returns whether the
    /// value was stored.
    pub fn insert(&mut self, attribute: Attribute, value: impl Into<String>) -> bool {
        let value = value.into();
        if value.is_empty() {
            return false;
        }
        self.values.insert(attribute, value);
        true
    }

    /// Builder-style insert
    pub fn with(mut self, attribute: Attribute, value: impl Into<String>) -> Self {
        self.insert(attribute, value);
        self
    }

    /// Copy of this set with `attribute` replaced by `value`
    pub fn with_value(&self, attribute: Attribute, value: impl Into<String>) -> Self {
        self.clone().with(attribute, value)
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.values.get(&attribute).map(String::as_str)
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.values.contains_key(&attribute)
    }

    pub fn remove(&mut self, attribute: Attribute) -> Option<String> {
        self.values.remove(&attribute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.values.iter().map(|(a, v)| (*a, v.as_str()))
    }

    /// The least important attribute still present, i.e. the next one to relax
    pub fn lowest_priority(&self) -> Option<Attribute> {
        Attribute::relaxation_order().find(|a| self.contains(*a))
    }

    /// `(wire name, value)` pairs for a query string
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        self.values
            .iter()
            .map(|(a, v)| (a.as_str(), v.as_str()))
            .collect()
    }
}

impl FromIterator<(Attribute, String)> for FilterSet {
    fn from_iter<I: IntoIterator<Item = (Attribute, String)>>(iter: I) -> Self {
        let mut set = FilterSet::new();
        for (attribute, value) in iter {
            set.insert(attribute, value);
        }
        set
    }
}
